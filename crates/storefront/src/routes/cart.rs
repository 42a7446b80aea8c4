//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! Every mutation responds with the fully redrawn cart panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use plantshop_core::{CartSnapshot, Price};

use crate::error::add_breadcrumb;
use crate::page::CurrentPage;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Position in the cart, posted back by the remove button.
    pub index: usize,
    pub name: String,
    pub price: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot
                .lines
                .iter()
                .enumerate()
                .map(|(index, line)| CartItemView {
                    index,
                    name: line.name.clone(),
                    price: line.price.to_string(),
                    quantity: line.quantity,
                })
                .collect(),
            total: snapshot.total.to_string(),
            item_count: snapshot.item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub name: String,
    #[serde(default)]
    pub price: String,
}

/// Remove from cart form data.
///
/// The index is kept as posted; anything that is not a line position leaves
/// the cart unchanged.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    #[serde(default)]
    pub index: String,
}

impl RemoveFromCartForm {
    /// The posted line position, if it is a non-negative integer.
    #[must_use]
    pub fn line_index(&self) -> Option<usize> {
        self.index.trim().parse().ok()
    }
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Redrawn cart panel plus the `cart-updated` trigger.
fn cart_updated(snapshot: &CartSnapshot) -> Response {
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(snapshot),
        },
    )
        .into_response()
}

/// Display the cart panel (HTMX).
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn show(page: CurrentPage) -> impl IntoResponse {
    let snapshot = page.state.lock().await.cart.snapshot();
    CartItemsTemplate {
        cart: CartView::from(&snapshot),
    }
}

/// Add one unit of a plant to the cart (HTMX).
///
/// The posted price is coerced to an integer; unpriced plants leave the cart
/// unchanged.
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn add(page: CurrentPage, Form(form): Form<AddToCartForm>) -> Response {
    let price = Price::parse_lenient(&form.price);
    if price.is_on_request() {
        tracing::debug!(name = %form.name, "Ignoring add to cart for unpriced plant");
    } else {
        add_breadcrumb("cart", "Added to cart", Some(&[("name", form.name.as_str())]));
    }

    let snapshot = page.state.lock().await.cart.add(&form.name, price);
    cart_updated(&snapshot)
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(page), fields(page_id = %page.id))]
pub async fn remove(page: CurrentPage, Form(form): Form<RemoveFromCartForm>) -> Response {
    let mut guard = page.state.lock().await;
    let snapshot = match form.line_index() {
        Some(index) => guard.cart.remove(index),
        None => {
            tracing::debug!(index = %form.index, "Ignoring remove with invalid line index");
            guard.cart.snapshot()
        }
    };
    drop(guard);

    cart_updated(&snapshot)
}
