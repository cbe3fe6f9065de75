//! Coverage trackers: "seen every item in a category" meta-unlocks.
//!
//! Per-item flags live in a host-persisted key-value store keyed
//! `"<category>_<itemId>"`. The core only ever reads a flag or sets it to
//! true; it assumes nothing about durability beyond the current session.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::detect::{Detector, InputEvent};
use crate::game::achievements::ids;

/// Client-side persistent flag store.
pub trait FlagStore {
    fn get(&self, key: &str) -> Option<bool>;
    fn set(&mut self, key: &str);
}

/// In-memory flags mirrored to the host's localStorage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalFlags(BTreeMap<String, bool>);

impl LocalFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge previously persisted flags. Only `true` entries are kept; a flag
    /// once set is never cleared.
    pub fn restore(&mut self, flags: BTreeMap<String, bool>) {
        for (key, value) in flags {
            if value {
                self.0.insert(key, true);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FlagStore for LocalFlags {
    fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    fn set(&mut self, key: &str) {
        self.0.insert(key.to_string(), true);
    }
}

pub fn flag_key(category: &str, item: &str) -> String {
    format!("{category}_{item}")
}

/// Achievement granted for covering a known category.
pub fn achievement_for(category: &str) -> Option<&'static str> {
    match category {
        "projects" => Some(ids::PROJECT_EXPLORER),
        "skills" => Some(ids::SKILL_COLLECTOR),
        "experience" => Some(ids::CAREER_HISTORIAN),
        _ => None,
    }
}

#[derive(Debug, Clone)]
struct CoverageCategory {
    name: String,
    items: Vec<String>,
    achievement: &'static str,
}

/// Progress on one category, for the HUD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageProgress {
    pub category: String,
    pub seen: usize,
    pub total: usize,
}

#[derive(Debug, Default)]
pub struct CoverageBoard<S: FlagStore = LocalFlags> {
    store: S,
    categories: Vec<CoverageCategory>,
}

impl<S: FlagStore> CoverageBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            categories: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Register (or replace) the item set of a category. Returns false when
    /// the category has no associated achievement.
    pub fn register(&mut self, category: &str, items: Vec<String>) -> bool {
        let Some(achievement) = achievement_for(category) else {
            return false;
        };
        self.categories.retain(|c| c.name != category);
        debug!(category, items = items.len(), "coverage category registered");
        self.categories.push(CoverageCategory {
            name: category.to_string(),
            items,
            achievement,
        });
        true
    }

    fn is_covered(&self, category: &CoverageCategory) -> bool {
        !category.items.is_empty()
            && category
                .items
                .iter()
                .all(|item| self.store.get(&flag_key(&category.name, item)) == Some(true))
    }

    pub fn progress(&self) -> Vec<CoverageProgress> {
        self.categories
            .iter()
            .map(|c| CoverageProgress {
                category: c.name.clone(),
                seen: c
                    .items
                    .iter()
                    .filter(|item| self.store.get(&flag_key(&c.name, item)) == Some(true))
                    .count(),
                total: c.items.len(),
            })
            .collect()
    }
}

impl<S: FlagStore> Detector for CoverageBoard<S> {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn observe(&mut self, event: &InputEvent, _now: u64) -> Option<&'static str> {
        let InputEvent::Interact { category, item } = event else {
            return None;
        };
        self.store.set(&flag_key(category, item));
        let cat = self.categories.iter().find(|c| &c.name == category)?;
        if self.is_covered(cat) {
            info!(category = %category, "category fully covered");
            return Some(cat.achievement);
        }
        None
    }

    /// Flags are persisted state, not a window; nothing to clear.
    fn reset(&mut self) {}
}
