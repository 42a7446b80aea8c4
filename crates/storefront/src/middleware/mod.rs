//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request context (request id and page session id)
//! 4. Security headers (CSP, frame and referrer policy)

pub mod request_context;
pub mod security_headers;

pub use request_context::request_context_middleware;
pub use security_headers::security_headers_middleware;
