//! Security headers middleware

use crate::config::SecurityHeadersConfig;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::warn;

/// Adds the configured security headers to every response.
///
/// Headers a handler already set are left untouched.
#[derive(Clone, Default)]
pub struct SecurityHeadersMiddleware {
    headers: Rc<Vec<(HeaderName, HeaderValue)>>,
}

impl SecurityHeadersMiddleware {
    pub fn from_config(config: &SecurityHeadersConfig) -> Self {
        let mut headers = Vec::new();
        for (name, value) in config.headers() {
            match HeaderValue::from_str(value) {
                Ok(value) => headers.push((HeaderName::from_static(name), value)),
                Err(_) => warn!(header = name, "Skipping invalid security header value"),
            }
        }

        Self {
            headers: Rc::new(headers),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeadersMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddlewareService {
            service,
            headers: Rc::clone(&self.headers),
        }))
    }
}

/// Service implementation for security headers middleware
pub struct SecurityHeadersMiddlewareService<S> {
    service: S,
    headers: Rc<Vec<(HeaderName, HeaderValue)>>,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let headers = Rc::clone(&self.headers);
        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;

            let response_headers = res.headers_mut();
            for (name, value) in headers.iter() {
                if !response_headers.contains_key(name) {
                    response_headers.insert(name.clone(), value.clone());
                }
            }

            Ok(res)
        })
    }
}
