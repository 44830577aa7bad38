//! Configuration integration tests

#[cfg(test)]
mod tests {
    use fetch_gateway::config::{Config, LogFormat, ResponseFormat};
    use fetch_gateway::server::ServerBuilder;

    #[test]
    fn test_deployment_profile_from_yaml() {
        let config = Config::from_yaml(
            r#"
server:
  port: 8081
fetch:
  tool: curl_chrome116
  timeout_secs: 30
api:
  response_format: html
logging:
  level: "fetch_gateway=debug"
  format: json
"#,
        )
        .unwrap();

        assert_eq!(config.server().port, 8081);
        assert_eq!(config.fetch().tool, "curl_chrome116");
        assert_eq!(config.fetch().timeout().as_secs(), 30);
        assert_eq!(config.api().response_format, ResponseFormat::Html);
        assert_eq!(config.logging().format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_response_format_is_rejected() {
        assert!(Config::from_yaml("api:\n  response_format: xml\n").is_err());
    }

    #[test]
    fn test_builder_validates_config() {
        let mut config = Config::default();
        config.gateway.server.port = 0;
        assert!(ServerBuilder::new().with_config(config).build().is_err());
    }
}
