//! Security headers middleware for XSS, clickjacking, and isolation protection.
//!
//! The storefront serves no inline scripts or styles: htmx and the panel
//! script are loaded from `/static`, so the CSP stays on `'self'`.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, VARY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

/// Content Security Policy for every response.
pub const CONTENT_SECURITY_POLICY_VALUE: &str = "default-src 'none'; \
     script-src 'self'; \
     style-src 'self'; \
     font-src 'self'; \
     img-src 'self' https://cdn.shopify.com; \
     connect-src 'self'; \
     frame-src 'none'; \
     object-src 'none'; \
     base-uri 'self'; \
     form-action 'self'; \
     frame-ancestors 'none'";

/// Headers applied to every response, in insertion order.
const STATIC_HEADERS: &[(HeaderName, &str)] = &[
    (X_FRAME_OPTIONS, "DENY"),
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY_VALUE),
    // Header fragments depend on the session, never cache them.
    (CACHE_CONTROL, "no-store, max-age=0"),
    // Full pages and htmx fragments share URLs with different bodies.
    (VARY, "HX-Request"),
];

/// Add security headers to all responses.
///
/// `/static` responses keep their own cache headers.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let is_static = request.uri().path().starts_with("/static/");
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in STATIC_HEADERS {
        if is_static && (*name == CACHE_CONTROL || *name == VARY) {
            continue;
        }
        headers.insert(name.clone(), HeaderValue::from_static(value));
    }

    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(
            "camera=(), geolocation=(), microphone=(), payment=(), usb=(), interest-cohort=()",
        ),
    );

    headers.insert(
        HeaderName::from_static("cross-origin-opener-policy"),
        HeaderValue::from_static("same-origin"),
    );

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request as HttpRequest, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/", get(|| async { "home" }))
            .route("/static/app.css", get(|| async { "body{}" }))
            .layer(axum::middleware::from_fn(security_headers_middleware))
    }

    #[tokio::test]
    async fn test_headers_on_pages() {
        let response = app()
            .oneshot(HttpRequest::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers.get(CONTENT_SECURITY_POLICY).and_then(|v| v.to_str().ok()),
            Some(CONTENT_SECURITY_POLICY_VALUE)
        );
        assert_eq!(
            headers.get(X_FRAME_OPTIONS).and_then(|v| v.to_str().ok()),
            Some("DENY")
        );
        assert_eq!(
            headers.get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some("no-store, max-age=0")
        );
    }

    #[tokio::test]
    async fn test_static_assets_keep_cache_headers() {
        let response = app()
            .oneshot(
                HttpRequest::get("/static/app.css")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(CACHE_CONTROL).is_none());
        assert!(response.headers().get(CONTENT_SECURITY_POLICY).is_some());
    }
}
