//! Per-page session state.
//!
//! Every load of the storefront page starts a new page session with its own
//! category navigator and an empty cart. HTMX sends the page's id back on
//! every fragment request in the `X-Page-Id` header, and [`CurrentPage`]
//! resolves it to the shared state. Nothing outlives the page: reloading
//! mints a fresh id, and idle sessions are evicted from memory.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use moka::future::Cache;
use tokio::sync::Mutex;
use uuid::Uuid;

use plantshop_core::{CartStore, CategoryNavigator};

use crate::config::PageConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the page id on fragment requests.
pub const PAGE_ID_HEADER: &str = "x-page-id";

/// Identifier of one page load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId(Uuid);

impl PageId {
    /// Generate a new random page id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Mutable state owned by one page.
#[derive(Debug, Default)]
pub struct PageState {
    pub navigator: CategoryNavigator,
    pub cart: CartStore,
}

/// Page state shared between concurrent requests from the same page.
///
/// Hold the lock only for synchronous work; never across a catalog fetch.
pub type SharedPage = Arc<Mutex<PageState>>;

/// In-memory registry of live page sessions.
#[derive(Clone)]
pub struct PageRegistry {
    pages: Cache<PageId, SharedPage>,
}

impl PageRegistry {
    /// Create a registry with the configured idle timeout and capacity.
    #[must_use]
    pub fn new(config: &PageConfig) -> Self {
        let pages = Cache::builder()
            .max_capacity(config.max_pages)
            .time_to_idle(config.idle_timeout)
            .build();

        Self { pages }
    }

    /// Start a new page session.
    pub async fn open(&self) -> (PageId, SharedPage) {
        let id = PageId::generate();
        let page = SharedPage::default();
        self.pages.insert(id, Arc::clone(&page)).await;
        tracing::debug!(page_id = %id, "Opened page session");
        (id, page)
    }

    /// Look up a page session, starting a fresh one if it has expired.
    pub async fn get_or_create(&self, id: PageId) -> SharedPage {
        self.pages
            .get_with(id, async move {
                tracing::debug!(page_id = %id, "Page session unknown or expired, starting fresh");
                SharedPage::default()
            })
            .await
    }

}

/// Extractor resolving the requesting page's session.
///
/// Rejects requests without a valid `X-Page-Id` header with 400.
pub struct CurrentPage {
    pub id: PageId,
    pub state: SharedPage,
}

impl FromRequestParts<AppState> for CurrentPage {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(PAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest("missing page id".to_string()))?;

        let id = raw
            .parse::<PageId>()
            .map_err(|_| AppError::BadRequest("invalid page id".to_string()))?;

        let page = state.pages().get_or_create(id).await;
        Ok(Self { id, state: page })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use plantshop_core::Price;

    use super::*;

    fn registry() -> PageRegistry {
        PageRegistry::new(&PageConfig {
            idle_timeout: Duration::from_secs(60),
            max_pages: 100,
        })
    }

    #[test]
    fn test_page_id_round_trip() {
        let id = PageId::generate();
        assert_eq!(id.to_string().parse::<PageId>().unwrap(), id);
        assert!("not-a-uuid".parse::<PageId>().is_err());
    }

    #[tokio::test]
    async fn test_open_registers_fresh_state() {
        let pages = registry();
        let (id, page) = pages.open().await;

        assert!(page.lock().await.cart.is_empty());
        let found = pages.get_or_create(id).await;
        assert!(Arc::ptr_eq(&found, &page));
    }

    #[tokio::test]
    async fn test_pages_are_isolated() {
        let pages = registry();
        let (_, first) = pages.open().await;
        let (_, second) = pages.open().await;

        first.lock().await.cart.add("Mango", Price::new(100));

        assert_eq!(first.lock().await.cart.len(), 1);
        assert!(second.lock().await.cart.is_empty());
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_existing() {
        let pages = registry();
        let (id, page) = pages.open().await;

        let again = pages.get_or_create(id).await;
        assert!(Arc::ptr_eq(&again, &page));
    }

    #[tokio::test]
    async fn test_get_or_create_unknown_id_starts_fresh() {
        let pages = registry();
        let id = PageId::generate();

        let page = pages.get_or_create(id).await;
        assert!(page.lock().await.cart.is_empty());
        assert!(Arc::ptr_eq(&pages.get_or_create(id).await, &page));
    }
}
