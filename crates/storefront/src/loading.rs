//! Process-wide loading indicator.
//!
//! A single visibility flag shared by every catalog fetch. Showing and hiding
//! are idempotent toggles rather than a counter, so when fetches overlap the
//! first one to finish hides the indicator.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared loading indicator state.
#[derive(Debug, Clone, Default)]
pub struct LoadingIndicator {
    visible: Arc<AtomicBool>,
}

impl LoadingIndicator {
    /// Create a hidden indicator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the indicator visible. No-op if already shown.
    pub fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            tracing::debug!("loading indicator shown");
        }
    }

    /// Hide the indicator. No-op if already hidden.
    pub fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            tracing::debug!("loading indicator hidden");
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Show the indicator until the returned guard is dropped.
    #[must_use = "the indicator is hidden as soon as the guard is dropped"]
    pub fn begin(&self) -> LoadingGuard {
        self.show();
        LoadingGuard {
            indicator: self.clone(),
        }
    }
}

/// Hides the indicator when dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    indicator: LoadingIndicator,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_hidden() {
        assert!(!LoadingIndicator::new().is_visible());
    }

    #[test]
    fn test_show_and_hide_are_idempotent() {
        let indicator = LoadingIndicator::new();
        indicator.show();
        indicator.show();
        assert!(indicator.is_visible());

        indicator.hide();
        assert!(!indicator.is_visible());
        indicator.hide();
        assert!(!indicator.is_visible());
    }

    #[test]
    fn test_clones_share_state() {
        let indicator = LoadingIndicator::new();
        let other = indicator.clone();
        other.show();
        assert!(indicator.is_visible());
    }

    #[test]
    fn test_guard_hides_on_drop() {
        let indicator = LoadingIndicator::new();
        {
            let _guard = indicator.begin();
            assert!(indicator.is_visible());
        }
        assert!(!indicator.is_visible());
    }

    #[test]
    fn test_overlapping_guards_do_not_stack() {
        let indicator = LoadingIndicator::new();
        let first = indicator.begin();
        let second = indicator.begin();

        drop(first);
        assert!(!indicator.is_visible());

        drop(second);
        assert!(!indicator.is_visible());
    }
}
