//! Storefront page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Storefront page template.
///
/// Renders the page shell; the category list and plant grid are loaded by
/// HTMX as soon as the page is displayed.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page_id: String,
    pub cart: CartView,
}

/// Display the storefront page.
///
/// Each visit starts a new page session with an empty cart.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let (page_id, page) = state.pages().open().await;
    let cart = CartView::from(&page.lock().await.cart.snapshot());

    HomeTemplate {
        page_id: page_id.to_string(),
        cart,
    }
}
