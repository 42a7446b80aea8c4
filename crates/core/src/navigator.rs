//! Category navigation state.
//!
//! The navigator always offers a synthetic "All Trees" entry followed by the
//! catalog's categories, and keeps exactly one entry active. Each selection
//! is stamped with a generation number so that a slow listing response for an
//! earlier selection can be recognised and discarded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Category;
use crate::types::CategoryId;

/// Label of the unfiltered entry.
pub const ALL_ENTRY_LABEL: &str = "All Trees";

/// Errors raised by navigator selection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigatorError {
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),
}

/// What a navigator entry lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NavTarget {
    #[default]
    All,
    Category(CategoryId),
}

impl NavTarget {
    /// Category filter to pass to the catalog, if any.
    #[must_use]
    pub const fn category(&self) -> Option<CategoryId> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(*id),
        }
    }
}

/// A renderable navigator entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub label: String,
    pub target: NavTarget,
    pub active: bool,
}

/// Ticket returned by a selection; compare with [`CategoryNavigator::is_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub target: NavTarget,
    pub generation: u64,
}

/// Navigator state for one page session.
#[derive(Debug, Clone, Default)]
pub struct CategoryNavigator {
    categories: Vec<Category>,
    loaded: bool,
    active: NavTarget,
    generation: u64,
}

impl CategoryNavigator {
    /// Create a navigator with only the "All" entry, which starts active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the catalog's categories.
    ///
    /// Repeated ids keep only their first entry. The generation is left
    /// untouched so in-flight selections stay valid; an active category
    /// missing from the new list falls back to "All".
    pub fn load_categories(&mut self, categories: Vec<Category>) {
        let mut seen = HashSet::new();
        self.categories = categories
            .into_iter()
            .filter(|category| seen.insert(category.id))
            .collect();
        self.loaded = true;

        if self.active.category().is_some_and(|id| !self.lists(id)) {
            self.active = NavTarget::All;
        }
    }

    /// Whether the category list has been installed.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The currently highlighted entry.
    #[must_use]
    pub const fn active(&self) -> NavTarget {
        self.active
    }

    /// Entries in display order: "All" first, then catalog order.
    #[must_use]
    pub fn entries(&self) -> Vec<NavEntry> {
        std::iter::once(NavEntry {
            label: ALL_ENTRY_LABEL.to_string(),
            target: NavTarget::All,
            active: self.active == NavTarget::All,
        })
        .chain(self.categories.iter().map(|category| {
            let target = NavTarget::Category(category.id);
            NavEntry {
                label: category.name.clone(),
                target,
                active: self.active == target,
            }
        }))
        .collect()
    }

    /// Highlight the "All" entry.
    pub fn select_all(&mut self) -> Selection {
        self.activate(NavTarget::All)
    }

    /// Highlight a category entry.
    ///
    /// # Errors
    ///
    /// Returns `NavigatorError::UnknownCategory` if categories are loaded and
    /// none has `id`. The active entry is not changed in that case. Before
    /// the list is loaded any id is accepted.
    pub fn select_category(&mut self, id: CategoryId) -> Result<Selection, NavigatorError> {
        if self.loaded && !self.lists(id) {
            return Err(NavigatorError::UnknownCategory(id));
        }
        Ok(self.activate(NavTarget::Category(id)))
    }

    /// Highlight whichever entry `target` names.
    ///
    /// # Errors
    ///
    /// See [`CategoryNavigator::select_category`].
    pub fn select(&mut self, target: NavTarget) -> Result<Selection, NavigatorError> {
        match target {
            NavTarget::All => Ok(self.select_all()),
            NavTarget::Category(id) => self.select_category(id),
        }
    }

    /// Whether `selection` is still the latest one made.
    #[must_use]
    pub const fn is_current(&self, selection: &Selection) -> bool {
        selection.generation == self.generation
    }

    fn lists(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|category| category.id == id)
    }

    fn activate(&mut self, target: NavTarget) -> Selection {
        self.active = target;
        self.generation = self.generation.wrapping_add(1);
        Selection {
            target,
            generation: self.generation,
        }
    }
}
