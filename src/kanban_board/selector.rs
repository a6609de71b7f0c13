use std::collections::BTreeSet;

use tracing::debug;

use super::BoardStore;

const RECENT_LIMIT: usize = 3;

/// Which category the board shows, plus the navbar's recent/starred lists.
///
/// Selecting never touches the store.
#[derive(Debug, Clone, Default)]
pub struct CategorySelector {
    active: String,
    recent: Vec<String>,
    starred: BTreeSet<String>,
}

impl CategorySelector {
    /// Start on `preferred` when the store has it, else on the first category.
    pub fn new(store: &BoardStore, preferred: Option<&str>) -> Self {
        let mut selector = Self::default();
        selector.select(store, preferred.unwrap_or_default());
        selector
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Make `name` active. Unknown names fall back to the first category
    /// in insertion order.
    pub fn select(&mut self, store: &BoardStore, name: &str) -> &str {
        let resolved = match store.category(name) {
            Some(cat) => cat.name.clone(),
            None => {
                let fallback = store
                    .first_category()
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                debug!(requested = name, fallback = %fallback, "unknown category, falling back");
                fallback
            }
        };

        self.recent.retain(|r| *r != resolved);
        self.recent.insert(0, resolved.clone());
        self.recent.truncate(RECENT_LIMIT);
        self.active = resolved;
        &self.active
    }

    /// Most recently selected categories, newest first.
    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    pub fn starred(&self) -> impl Iterator<Item = &str> {
        self.starred.iter().map(String::as_str)
    }

    pub fn is_starred(&self, name: &str) -> bool {
        self.starred.contains(name)
    }

    /// Star or unstar a category; returns the new state.
    pub fn toggle_star(&mut self, name: &str) -> bool {
        if self.starred.remove(name) {
            false
        } else {
            self.starred.insert(name.to_string());
            true
        }
    }
}
