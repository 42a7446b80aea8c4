//! Catalog route handlers: the category navigator and the plant grid.
//!
//! Listing selections go through the page's [`CategoryNavigator`], which
//! stamps each one with a generation. When a listing response comes back
//! after a newer selection was made, it is dropped instead of overwriting the
//! newer grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use plantshop_core::{CategoryId, CategoryNavigator, NavEntry, NavTarget, Plant};

use crate::catalog::{Fetched, items_or_empty};
use crate::error::Result;
use crate::page::CurrentPage;
use crate::state::AppState;

/// Navigator entry display data for templates.
#[derive(Clone)]
pub struct CategoryEntryView {
    pub label: String,
    pub url: String,
    pub active: bool,
}

/// Plant card display data for templates.
#[derive(Clone)]
pub struct PlantCardView {
    pub name: String,
    pub image: String,
    /// Truncated description, empty when the plant has none.
    pub excerpt: String,
    /// Integer amount posted with the add-to-cart form.
    pub price: i64,
    pub label: String,
    pub can_purchase: bool,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&NavEntry> for CategoryEntryView {
    fn from(entry: &NavEntry) -> Self {
        Self {
            label: entry.label.clone(),
            url: plants_url(entry.target),
            active: entry.active,
        }
    }
}

impl From<&Plant> for PlantCardView {
    fn from(plant: &Plant) -> Self {
        Self {
            name: plant.name.clone(),
            image: plant.image.clone(),
            excerpt: plant.excerpt().unwrap_or_default(),
            price: plant.price.amount(),
            label: plant.purchase_label(),
            can_purchase: plant.can_purchase(),
        }
    }
}

/// Grid URL for a navigator target.
fn plants_url(target: NavTarget) -> String {
    match target {
        NavTarget::All => "/catalog/plants".to_string(),
        NavTarget::Category(id) => format!("/catalog/plants?category={id}"),
    }
}

fn entry_views(navigator: &CategoryNavigator) -> Vec<CategoryEntryView> {
    navigator
        .entries()
        .iter()
        .map(CategoryEntryView::from)
        .collect()
}

/// Plant listing query parameters.
#[derive(Debug, Deserialize)]
pub struct PlantsQuery {
    pub category: Option<CategoryId>,
}

/// Loading indicator state.
#[derive(Debug, Serialize)]
pub struct LoadingStatus {
    pub visible: bool,
}

/// Category navigator list fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/category_list.html")]
pub struct CategoryListTemplate {
    pub entries: Vec<CategoryEntryView>,
    /// Render as an out-of-band swap.
    pub oob: bool,
}

/// Plant grid fragment template (for HTMX).
///
/// When `oob` is set the navigator list is appended out-of-band so its
/// highlight follows the displayed listing.
#[derive(Template, WebTemplate)]
#[template(path = "partials/plant_grid.html")]
pub struct PlantGridTemplate {
    pub plants: Vec<PlantCardView>,
    pub entries: Vec<CategoryEntryView>,
    pub oob: bool,
}

/// Load the category navigator (HTMX).
///
/// Renders "All Trees" followed by each category. When the catalog fails or
/// returns no usable listing, the list is left empty.
#[instrument(skip(state, page), fields(page_id = %page.id))]
pub async fn categories(State(state): State<AppState>, page: CurrentPage) -> Response {
    let entries = match state.catalog().list_categories().await {
        Ok(Fetched::Loaded(categories)) => {
            let mut page = page.state.lock().await;
            page.navigator.load_categories(categories);
            entry_views(&page.navigator)
        }
        Ok(Fetched::Unavailable) => {
            tracing::warn!("Error fetching categories: response had no usable listing");
            Vec::new()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching categories");
            Vec::new()
        }
    };

    CategoryListTemplate {
        entries,
        oob: false,
    }
    .into_response()
}

/// Select a navigator entry and render its plant grid (HTMX).
///
/// Returns 204 with `HX-Reswap: none` when a newer selection was made while
/// the catalog request was in flight.
///
/// # Errors
///
/// Returns `AppError::Navigator` (404) for a category the navigator does not
/// list.
#[instrument(skip(state, page), fields(page_id = %page.id))]
pub async fn plants(
    State(state): State<AppState>,
    page: CurrentPage,
    Query(query): Query<PlantsQuery>,
) -> Result<Response> {
    let target = query.category.map_or(NavTarget::All, NavTarget::Category);
    let selection = page.state.lock().await.navigator.select(target)?;

    let context = match target.category() {
        None => "Error fetching all plants".to_string(),
        Some(id) => format!("Error fetching plants for category {id}"),
    };
    let result = state.catalog().list_plants(target.category()).await;
    let plants = items_or_empty(result, &context);

    let guard = page.state.lock().await;
    if !guard.navigator.is_current(&selection) {
        tracing::debug!(?selection, "Discarding listing for superseded selection");
        return Ok((StatusCode::NO_CONTENT, AppendHeaders([("HX-Reswap", "none")])).into_response());
    }
    let oob = guard.navigator.is_loaded();
    let entries = if oob {
        entry_views(&guard.navigator)
    } else {
        Vec::new()
    };
    drop(guard);

    Ok(PlantGridTemplate {
        plants: plants.iter().map(PlantCardView::from).collect(),
        entries,
        oob,
    }
    .into_response())
}

/// Report whether a catalog request is in flight.
pub async fn loading(State(state): State<AppState>) -> Json<LoadingStatus> {
    Json(LoadingStatus {
        visible: state.catalog().loading().is_visible(),
    })
}

#[cfg(test)]
mod tests {
    use plantshop_core::{Category, Price};

    use super::*;

    fn plant(name: &str, price: i64, description: Option<&str>) -> Plant {
        Plant {
            name: name.to_string(),
            image: format!("https://img.example/{name}.png"),
            description: description.map(String::from),
            price: Price::new(price),
        }
    }

    #[test]
    fn test_plants_url() {
        assert_eq!(plants_url(NavTarget::All), "/catalog/plants");
        assert_eq!(
            plants_url(NavTarget::Category(CategoryId::new(3))),
            "/catalog/plants?category=3"
        );
    }

    #[test]
    fn test_plant_card_view_unpriced() {
        let view = PlantCardView::from(&plant("Banyan", 0, None));
        assert_eq!(view.label, "Price on request");
        assert!(!view.can_purchase);
        assert_eq!(view.price, 0);
        assert_eq!(view.excerpt, "");
    }

    #[test]
    fn test_plant_grid_placeholder_when_empty() {
        let html = PlantGridTemplate {
            plants: Vec::new(),
            entries: Vec::new(),
            oob: false,
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains("No plants available."));
        assert!(!html.contains("category-list"));
    }

    #[test]
    fn test_plant_grid_renders_cards() {
        let plants = [
            plant("Mango", 100, Some("A tropical fruit tree")),
            plant("Banyan", 0, None),
        ];
        let html = PlantGridTemplate {
            plants: plants.iter().map(PlantCardView::from).collect(),
            entries: Vec::new(),
            oob: false,
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains("Add to Cart (৳100)"));
        assert!(html.contains("A tropical fruit tree..."));
        assert!(html.contains("disabled>Price on request"));
        assert!(!html.contains("disabled>Add to Cart"));
        assert!(!html.contains("No plants available."));
    }

    #[test]
    fn test_plant_grid_escapes_catalog_text() {
        let html = PlantGridTemplate {
            plants: vec![PlantCardView::from(&plant("<script>", 10, None))],
            entries: Vec::new(),
            oob: false,
        }
        .render()
        .unwrap_or_default();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_plant_grid_with_out_of_band_navigator() {
        let mut navigator = CategoryNavigator::new();
        navigator.load_categories(vec![Category {
            id: CategoryId::new(1),
            name: "Fruit".to_string(),
        }]);
        let html = PlantGridTemplate {
            plants: Vec::new(),
            entries: entry_views(&navigator),
            oob: true,
        }
        .render()
        .unwrap_or_default();

        assert!(html.contains(r#"hx-swap-oob="true""#));
        assert!(html.contains("All Trees"));
        assert!(html.contains("Fruit"));
    }

    #[test]
    fn test_category_list_marks_single_active_entry() {
        let mut navigator = CategoryNavigator::new();
        navigator.load_categories(vec![Category {
            id: CategoryId::new(1),
            name: "Fruit".to_string(),
        }]);
        let html = CategoryListTemplate {
            entries: entry_views(&navigator),
            oob: false,
        }
        .render()
        .unwrap_or_default();

        assert_eq!(html.matches("bg-green-700").count(), 1);
        assert_eq!(html.matches("<li>").count(), 2);
        assert!(!html.contains("hx-swap-oob"));
    }
}
