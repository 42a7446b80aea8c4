//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Storefront page (starts a page session)
//! GET  /health                    - Health check
//! GET  /loading                   - Loading indicator state (JSON)
//!
//! # Catalog (HTMX fragments, require X-Page-Id)
//! GET  /catalog/categories        - Category navigator list
//! GET  /catalog/plants            - Plant grid for all plants
//! GET  /catalog/plants?category=N - Plant grid for one category
//!
//! # Cart (HTMX fragments, require X-Page-Id)
//! GET  /cart                      - Cart panel
//! POST /cart/add                  - Add one unit (form: name, price)
//! POST /cart/remove               - Remove a line (form: index)
//! ```

pub mod cart;
pub mod catalog;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::categories))
        .route("/plants", get(catalog::plants))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Storefront page
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/loading", get(catalog::loading))
        // Catalog fragments
        .nest("/catalog", catalog_routes())
        // Cart fragments
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the catalog.
async fn health() -> &'static str {
    "ok"
}
