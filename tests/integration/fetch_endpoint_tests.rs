//! Fetch endpoint integration tests
//!
//! Drive `POST /` and `GET /` end to end. Tests marked `unix` run a real
//! child process through `sh`.

#[cfg(test)]
mod tests {
    use crate::common::{RecordingFetchTool, shell_dispatcher, test_app_state};
    use actix_web::{test, web};
    use fetch_gateway::FetchDispatcher;
    use fetch_gateway::config::ResponseFormat;
    use fetch_gateway::server::HttpServer;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    // ==================== JSON Profile ====================

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_json_success_envelope() {
        let state = test_app_state(
            ResponseFormat::Json,
            shell_dispatcher("printf ok", Duration::from_secs(10)),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({"url": "http://example.com"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 200);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"returncode": 0, "stdout": "ok", "stderr": ""}));
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_tool_receives_normalized_url() {
        let state = test_app_state(
            ResponseFormat::Json,
            shell_dispatcher(r#"printf '%s' "$1""#, Duration::from_secs(10)),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({"url": "HTTP://Example.COM/a b"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["stdout"], "http://example.com/a%20b");
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_metadata_url_never_starts_a_process() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran");
        let script = format!("touch {}", marker.display());
        let state = test_app_state(
            ResponseFormat::Json,
            shell_dispatcher(&script, Duration::from_secs(10)),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({"url": "http://169.254.169.254/"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Invalid or disallowed URL");
        assert!(body["reason"].as_str().unwrap().contains("169.254.169.254"));
        assert!(!marker.exists(), "fetch tool ran for a rejected URL");
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_timeout_returns_504_and_kills_tool() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = dir.path().join("pid");
        let script = format!("echo $$ > {}; exec sleep 30", pid_file.display());
        let state = test_app_state(
            ResponseFormat::Json,
            shell_dispatcher(&script, Duration::from_millis(500)),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let started = Instant::now();
        let req = test::TestRequest::get()
            .uri("/?url=http://example.com/")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 504);
        assert!(started.elapsed() < Duration::from_secs(10));

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"error": "Timeout fetching URL"}));

        #[cfg(target_os = "linux")]
        {
            let pid = std::fs::read_to_string(&pid_file).unwrap();
            let proc_path = format!("/proc/{}", pid.trim());
            assert!(!std::path::Path::new(&proc_path).exists());
        }
    }

    #[actix_web::test]
    async fn test_missing_tool_is_internal_error() {
        let fetcher = Arc::new(FetchDispatcher::new(
            "fetch-gateway-test-missing-tool",
            Duration::from_secs(5),
        ));
        let state = test_app_state(ResponseFormat::Json, fetcher);
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({"url": "https://example.com/"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 500);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "Internal error");
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("fetch-gateway-test-missing-tool")
        );
    }

    #[actix_web::test]
    async fn test_resolution_failure_is_400() {
        let fetcher = RecordingFetchTool::returning(0, "ok", "");
        let state = test_app_state(ResponseFormat::Json, fetcher.clone());
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::post()
            .uri("/")
            .set_json(json!({"url": "https://nxdomain.test/"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"error": "Invalid or disallowed URL", "reason": "Hostname resolution failed"})
        );
        assert_eq!(fetcher.calls(), 0);
    }

    #[actix_web::test]
    async fn test_service_stays_available_after_failures() {
        let fetcher = RecordingFetchTool::returning(0, "ok", "");
        let state = test_app_state(ResponseFormat::Json, fetcher.clone());
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        for url in ["http://mixed.test/", "not a url", "http://public.test/"] {
            let req = test::TestRequest::post()
                .uri("/")
                .set_json(json!({"url": url}))
                .to_request();
            let _ = test::call_service(&app, req).await;
        }

        assert_eq!(fetcher.calls(), 1);
    }

    // ==================== HTML Profile ====================

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_html_passthrough_is_verbatim() {
        let page = "<!doctype html>\n<title>Example</title>\n<p>caf\u{e9}</p>\n";
        let script = format!("printf '%s' '{}'", page);
        let state = test_app_state(
            ResponseFormat::Html,
            shell_dispatcher(&script, Duration::from_secs(10)),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/?url=http://example.com")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 200);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        assert!(res.headers().contains_key("content-security-policy"));

        let body = test::read_body(res).await;
        assert_eq!(body, page);
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn test_html_failure_returns_stderr() {
        let state = test_app_state(
            ResponseFormat::Html,
            shell_dispatcher("printf 'connection refused' >&2; exit 7", Duration::from_secs(10)),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get()
            .uri("/?url=http://example.com")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 500);

        let body = test::read_body(res).await;
        assert_eq!(body, "connection refused");
    }

    #[actix_web::test]
    async fn test_html_missing_url_is_plain_text() {
        let state = test_app_state(
            ResponseFormat::Html,
            RecordingFetchTool::returning(0, "ok", ""),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::get().uri("/?url=").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 400);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "text/plain; charset=utf-8"
        );

        let body = test::read_body(res).await;
        assert_eq!(body, "Missing 'url' parameter");
    }

    // ==================== Routing ====================

    #[actix_web::test]
    async fn test_other_methods_are_not_allowed() {
        let state = test_app_state(
            ResponseFormat::Json,
            RecordingFetchTool::returning(0, "ok", ""),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state))).await;

        let req = test::TestRequest::delete().uri("/").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 405);
    }
}
