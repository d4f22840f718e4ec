//! Browser-facing hardening headers on every response
//!
//! Headers a handler already set are left alone, so a download keeps its
//! own content headers.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue},
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

const BASELINE: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("content-security-policy", "default-src 'none'; frame-ancestors 'none'"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("x-dns-prefetch-control", "off"),
    ("x-download-options", "noopen"),
    ("x-permitted-cross-domain-policies", "none"),
    ("x-xss-protection", "0"),
];

const STRICT_TRANSPORT: (&str, &str) = (
    "strict-transport-security",
    "max-age=15552000; includeSubDomains",
);

/// Middleware factory adding the security header set
#[derive(Debug, Clone, Copy, Default)]
pub struct SecurityHeaders {
    /// Also send HSTS; only meaningful behind TLS
    strict_transport: bool,
}

impl SecurityHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    /// HSTS on top of the baseline, for production deployments
    pub fn with_strict_transport(mut self, enabled: bool) -> Self {
        self.strict_transport = enabled;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersService {
            service: Rc::new(service),
            strict_transport: self.strict_transport,
        }))
    }
}

pub struct SecurityHeadersService<S> {
    service: Rc<S>,
    strict_transport: bool,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let strict_transport = self.strict_transport;

        Box::pin(async move {
            let mut response = service.call(req).await?;
            apply(response.headers_mut(), strict_transport);
            Ok(response)
        })
    }
}

fn apply(headers: &mut HeaderMap, strict_transport: bool) {
    let extra = strict_transport.then_some(STRICT_TRANSPORT);
    for (name, value) in BASELINE.iter().copied().chain(extra) {
        let name = HeaderName::from_static(name);
        if !headers.contains_key(&name) {
            headers.insert(name, HeaderValue::from_static(value));
        }
    }
}
