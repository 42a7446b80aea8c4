//! Per-request correlation: request id and page session.
//!
//! Each request gets an `x-request-id` (kept from upstream when present) that
//! is echoed in the response. Fragment requests also carry the page session
//! id in `X-Page-Id`; when it parses, it is recorded next to the request id
//! so every log line and Sentry event of a page session can be grouped.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

use crate::page::{PAGE_ID_HEADER, PageId};

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation ids of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub page_id: Option<PageId>,
}

impl RequestContext {
    /// Read the correlation ids from request headers, minting a request id
    /// when none was supplied.
    #[must_use]
    pub fn from_request(request: &Request) -> Self {
        let headers = request.headers();
        let request_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .filter(|id| !id.is_empty())
            .map_or_else(|| Uuid::new_v4().to_string(), String::from);
        let page_id = headers
            .get(PAGE_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|raw| raw.parse().ok());

        Self {
            request_id,
            page_id,
        }
    }

    fn record(&self) {
        let span = Span::current();
        span.record("request_id", self.request_id.as_str());
        if let Some(page_id) = self.page_id {
            span.record("page_id", tracing::field::display(page_id));
        }

        sentry::configure_scope(|scope| {
            scope.set_tag("request_id", &self.request_id);
            match self.page_id {
                Some(page_id) => scope.set_tag("page_id", page_id),
                None => scope.remove_tag("page_id"),
            }
        });
    }
}

/// Record the request's correlation ids and echo the request id back.
pub async fn request_context_middleware(request: Request, next: Next) -> Response {
    let context = RequestContext::from_request(&request);
    context.record();

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&context.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request as HttpRequest, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request {
        let mut builder = HttpRequest::get("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_context_reads_page_id() {
        let page_id = PageId::generate();
        let context = RequestContext::from_request(&request(&[
            (REQUEST_ID_HEADER, "edge-1"),
            (PAGE_ID_HEADER, &page_id.to_string()),
        ]));

        assert_eq!(context.request_id, "edge-1");
        assert_eq!(context.page_id, Some(page_id));
    }

    #[test]
    fn test_context_ignores_malformed_page_id() {
        let context = RequestContext::from_request(&request(&[(PAGE_ID_HEADER, "nope")]));

        assert_eq!(context.page_id, None);
        assert!(Uuid::parse_str(&context.request_id).is_ok());
    }

    #[tokio::test]
    async fn test_middleware_echoes_request_id() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_context_middleware));

        let generated = app.clone().oneshot(request(&[])).await.unwrap();
        let id = generated.headers().get(REQUEST_ID_HEADER).unwrap();
        assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());

        let upstream = app
            .oneshot(request(&[(REQUEST_ID_HEADER, "edge-1234")]))
            .await
            .unwrap();
        assert_eq!(
            upstream.headers().get(REQUEST_ID_HEADER).unwrap(),
            "edge-1234"
        );
    }
}
