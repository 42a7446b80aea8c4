//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::loading::LoadingIndicator;
use crate::page::PageRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the catalog client and page sessions.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogClient,
    pages: PageRegistry,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog, LoadingIndicator::new());
        let pages = PageRegistry::new(&config.pages);

        Self {
            inner: Arc::new(AppStateInner { catalog, pages }),
        }
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the page session registry.
    #[must_use]
    pub fn pages(&self) -> &PageRegistry {
        &self.inner.pages
    }
}
