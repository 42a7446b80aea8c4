//! Remote plant catalog client.
//!
//! # Endpoints
//!
//! ```text
//! GET {base}/categories      - all categories
//! GET {base}/plants          - all plants
//! GET {base}/category/{id}   - plants in one category
//! ```
//!
//! Every request shows the shared [`LoadingIndicator`] until it completes.
//! There are no retries, timeouts, or caching: each call is a single GET.
//!
//! Callers receive a typed result so failures stay visible to tests and
//! logs, but the storefront renders a failed listing exactly like an empty
//! one (see [`items_or_empty`]).

mod wire;

use std::sync::Arc;

use thiserror::Error;
use tracing::instrument;
use url::Url;

use plantshop_core::{Category, CategoryId, Plant};

use crate::config::CatalogConfig;
use crate::loading::LoadingIndicator;

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request could not be built or completed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint URL could not be formed.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-success status with a body that is not JSON.
    #[error("Catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// The body was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A parsed catalog listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The response carried a usable listing (possibly empty).
    Loaded(Vec<T>),
    /// The response was not marked successful or had no listing array.
    Unavailable,
}

/// Collapse a catalog result into the items to display.
///
/// Failures are logged as errors and unusable responses as warnings; both
/// yield an empty list, exactly like a legitimately empty listing.
pub fn items_or_empty<T>(result: Result<Fetched<T>, CatalogError>, context: &str) -> Vec<T> {
    match result {
        Ok(Fetched::Loaded(items)) => items,
        Ok(Fetched::Unavailable) => {
            tracing::warn!("{context}: response had no usable listing");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "{context}");
            Vec::new()
        }
    }
}

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the plant catalog API.
///
/// Cheaply cloneable; clones share the HTTP connection pool and the loading
/// indicator.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    loading: LoadingIndicator,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig, loading: LoadingIndicator) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                loading,
            }),
        }
    }

    /// The loading indicator toggled by this client.
    #[must_use]
    pub fn loading(&self) -> &LoadingIndicator {
        &self.inner.loading
    }

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Fetched<Category>, CatalogError> {
        let body = self.get_json("categories").await?;
        let fetched = wire::parse_categories(&body);
        if let Fetched::Loaded(categories) = &fetched {
            tracing::debug!(count = categories.len(), "Fetched categories");
        }
        Ok(fetched)
    }

    /// Fetch plants, optionally filtered to one category.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails or the body is not JSON.
    #[instrument(skip(self))]
    pub async fn list_plants(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Fetched<Plant>, CatalogError> {
        let path = category.map_or_else(|| "plants".to_string(), |id| format!("category/{id}"));
        let body = self.get_json(&path).await?;
        let fetched = wire::parse_plants(&body);
        if let Fetched::Loaded(plants) = &fetched {
            tracing::debug!(count = plants.len(), "Fetched plants");
        }
        Ok(fetched)
    }

    /// GET an endpoint relative to the base URL and parse the body as JSON.
    ///
    /// The status code is not checked up front: the catalog reports failures
    /// in the body's `status` field, so any JSON body is handed to the parser.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, CatalogError> {
        let _loading = self.inner.loading.begin();

        let url = self.inner.base_url.join(path)?;
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        match serde_json::from_str(&text) {
            Ok(body) => {
                if !status.is_success() {
                    tracing::warn!(status = %status, "Catalog returned non-success status");
                }
                Ok(body)
            }
            Err(_) if !status.is_success() => {
                tracing::error!(
                    status = %status,
                    body = %text.chars().take(200).collect::<String>(),
                    "Catalog returned non-success status"
                );
                Err(CatalogError::Status(status))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(200).collect::<String>(),
                    "Failed to parse catalog response"
                );
                Err(CatalogError::Parse(e))
            }
        }
    }
}
