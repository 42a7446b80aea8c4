//! Integration test support for the plant storefront.
//!
//! Tests drive the real storefront router with `tower::ServiceExt::oneshot`
//! while a fake catalog, built with axum, listens on an ephemeral local port.
//!
//! ```rust,ignore
//! let catalog = FakeCatalog::new().categories(json!({...})).spawn().await;
//! let app = storefront(&catalog.base_url);
//! let page = open_page(&app).await;
//! let (status, _, body) = get(&app, "/catalog/categories", &page).await;
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::Path,
    http::{HeaderMap, Request, StatusCode},
    routing,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt;

use plantshop_storefront::config::StorefrontConfig;
use plantshop_storefront::page::PAGE_ID_HEADER;
use plantshop_storefront::state::AppState;

/// A canned catalog response, optionally delayed.
#[derive(Clone)]
struct Canned {
    body: Value,
    delay: Duration,
}

impl Canned {
    async fn respond(self) -> Json<Value> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Json(self.body)
    }
}

/// Builder for a fake catalog API.
pub struct FakeCatalog {
    categories: Canned,
    plants: Canned,
    by_category: HashMap<i32, Canned>,
}

/// A running fake catalog.
pub struct RunningCatalog {
    /// Base URL to hand to the storefront, e.g. `http://127.0.0.1:41234/api`.
    pub base_url: String,
}

impl Default for FakeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeCatalog {
    /// A catalog with no categories and no plants.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: Canned {
                body: json!({"status": true, "categories": []}),
                delay: Duration::ZERO,
            },
            plants: Canned {
                body: json!({"status": true, "plants": []}),
                delay: Duration::ZERO,
            },
            by_category: HashMap::new(),
        }
    }

    /// Body served at `/api/categories`.
    #[must_use]
    pub fn categories(mut self, body: Value) -> Self {
        self.categories.body = body;
        self
    }

    /// Body served at `/api/plants`.
    #[must_use]
    pub fn plants(mut self, body: Value) -> Self {
        self.plants.body = body;
        self
    }

    /// Delay before `/api/plants` responds.
    #[must_use]
    pub const fn plants_delay(mut self, delay: Duration) -> Self {
        self.plants.delay = delay;
        self
    }

    /// Body served at `/api/category/{id}`, after `delay`.
    #[must_use]
    pub fn category(mut self, id: i32, body: Value, delay: Duration) -> Self {
        self.by_category.insert(id, Canned { body, delay });
        self
    }

    /// Serve the catalog on an ephemeral port.
    pub async fn spawn(self) -> RunningCatalog {
        let categories = self.categories;
        let plants = self.plants;
        let by_category = Arc::new(self.by_category);

        let router = Router::new()
            .route("/api/categories", routing::get(move || categories.clone().respond()))
            .route("/api/plants", routing::get(move || plants.clone().respond()))
            .route(
                "/api/category/{id}",
                routing::get(move |Path(id): Path<i32>| {
                    let canned = by_category.get(&id).cloned().unwrap_or(Canned {
                        body: json!({"status": false, "message": "no category"}),
                        delay: Duration::ZERO,
                    });
                    canned.respond()
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        RunningCatalog {
            base_url: format!("http://{addr}/api"),
        }
    }
}

/// Base URL of a port nothing listens on.
pub async fn unreachable_catalog() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Build the storefront app against a catalog base URL.
#[must_use]
pub fn storefront(catalog_url: &str) -> (AppState, Router) {
    let catalog_url = catalog_url.to_string();
    let config = StorefrontConfig::from_lookup(|key| {
        (key == "PLANTSHOP_CATALOG_URL").then(|| catalog_url.clone())
    })
    .unwrap();
    let state = AppState::new(&config);
    let app = plantshop_storefront::app(state.clone());
    (state, app)
}

/// Send a request and collect status, headers and body text.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Load the storefront page and return its page id.
pub async fn open_page(app: &Router) -> String {
    let (status, _, body) = send(app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    page_id_from(&body)
}

/// Extract the page id from the rendered page's `hx-headers` attribute.
#[must_use]
pub fn page_id_from(html: &str) -> String {
    let marker = r#""X-Page-Id": ""#;
    let start = html.find(marker).unwrap() + marker.len();
    html.get(start..start + 36).unwrap().to_string()
}

/// GET a fragment on behalf of a page.
pub async fn get(app: &Router, uri: &str, page_id: &str) -> (StatusCode, HeaderMap, String) {
    let request = Request::get(uri)
        .header(PAGE_ID_HEADER, page_id)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a url-encoded form on behalf of a page.
pub async fn post_form(
    app: &Router,
    uri: &str,
    page_id: &str,
    form: &str,
) -> (StatusCode, HeaderMap, String) {
    let request = Request::post(uri)
        .header(PAGE_ID_HEADER, page_id)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}
