// src/web/security_headers.rs

//! Response middleware stamping the hardening header set.
//!
//! Every response leaves with clickjacking, MIME-sniffing and CSP
//! protections. Headers a handler already set are left alone. HSTS is
//! only meaningful over TLS, so plain-HTTP responses carry a
//! development warning instead.

use actix_web::{
  dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
  http::header::{
    HeaderMap, HeaderName, HeaderValue, CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
  },
  Error,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};

const CSP_VALUE: &str = "default-src 'self'; script-src 'self' 'unsafe-inline'; \
style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self'; \
font-src 'self'; object-src 'none'; base-uri 'self'; form-action 'self'; \
frame-ancestors 'none'";

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";
const DEV_WARNING_VALUE: &str = "HSTS no está habilitado en desarrollo";

fn insert_if_absent(headers: &mut HeaderMap, name: HeaderName, value: &'static str) {
  if !headers.contains_key(&name) {
    headers.insert(name, HeaderValue::from_static(value));
  }
}

/// Stamps the fixed header set onto `headers`.
///
/// Fixed headers are set only when absent, so a handler's own value
/// wins. The development warning on insecure requests is always
/// written.
pub fn apply_security_headers(request_was_secure: bool, headers: &mut HeaderMap) {
  insert_if_absent(headers, X_FRAME_OPTIONS, "DENY");
  insert_if_absent(headers, X_CONTENT_TYPE_OPTIONS, "nosniff");
  insert_if_absent(headers, X_XSS_PROTECTION, "1; mode=block");
  insert_if_absent(headers, REFERRER_POLICY, "same-origin");
  insert_if_absent(headers, CONTENT_SECURITY_POLICY, CSP_VALUE);

  if request_was_secure {
    insert_if_absent(headers, STRICT_TRANSPORT_SECURITY, HSTS_VALUE);
  } else {
    // The warning text is UTF-8; from_static only admits visible ASCII.
    if let Ok(value) = HeaderValue::from_bytes(DEV_WARNING_VALUE.as_bytes()) {
      headers.insert(HeaderName::from_static("x-development-warning"), value);
    }
  }
}

/// Actix middleware wrapping [`apply_security_headers`] around every
/// response.
pub struct SecurityHeaders;

impl<S, B> Transform<S, ServiceRequest> for SecurityHeaders
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Transform = SecurityHeadersMiddleware<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(SecurityHeadersMiddleware { service }))
  }
}

pub struct SecurityHeadersMiddleware<S> {
  service: S,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddleware<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<B>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let request_was_secure = req.connection_info().scheme() == "https";
    let fut = self.service.call(req);

    Box::pin(async move {
      let mut res = fut.await?;
      apply_security_headers(request_was_secure, res.headers_mut());
      Ok(res)
    })
  }
}
