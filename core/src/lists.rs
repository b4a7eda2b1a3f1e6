//! User-defined list names and the deduplicated registry of known lists.
//!
//! Lists are independent of tasks: a registry entry may have zero tasks, and
//! a task may carry a list name the registry has never seen (the registry
//! absorbs it opportunistically on the next reconciliation).

use crate::task::Task;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normalized form of a list name used for every equality comparison in the
/// system: internal whitespace collapsed to single spaces, trimmed,
/// lowercased.
pub fn normalize_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The deduplicated set of known list display names, most recently added
/// first.
///
/// Invariant: no two entries share a normalized key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ListRegistry {
    names: Vec<String>,
}

impl ListRegistry {
    pub fn new() -> ListRegistry {
        ListRegistry::default()
    }

    /// Rebuilds a registry from stored display names, dropping empty names
    /// and later duplicates so the normalized-key invariant holds even if
    /// the persisted data was tampered with.
    pub fn from_names(names: Vec<String>) -> ListRegistry {
        let mut registry = ListRegistry::new();
        for name in names {
            let display = name.trim();
            if display.is_empty() {
                continue;
            }
            let key = normalize_key(display);
            if registry.names.iter().any(|n| normalize_key(n) == key) {
                continue;
            }
            registry.names.push(display.to_string());
        }
        registry
    }

    /// Adds a display name unless its normalized key is already present.
    /// Returns whether the registry changed.
    pub fn register(&mut self, name: &str) -> bool {
        let display = name.trim();
        if display.is_empty() {
            return false;
        }
        let key = normalize_key(display);
        if self.names.iter().any(|n| normalize_key(n) == key) {
            return false;
        }
        self.names.insert(0, display.to_string());
        true
    }

    /// Removes the entry matching `name` by normalized key. Tasks referencing
    /// the name are left untouched. Returns whether an entry was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = normalize_key(name);
        let before = self.names.len();
        self.names.retain(|n| normalize_key(n) != key);
        self.names.len() != before
    }

    /// Registers `new` (if absent) and removes `old`. The caller is
    /// responsible for moving tasks from `old` to `new`; the registry only
    /// tracks names.
    pub fn rename(&mut self, old: &str, new: &str) {
        self.register(new);
        if normalize_key(old) != normalize_key(new) {
            self.remove(old);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let key = normalize_key(name);
        self.names.iter().any(|n| normalize_key(n) == key)
    }

    /// Display names, most recently added first.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reconciliation step: absorbs every task list name not yet registered.
    /// Returns how many names were added.
    pub fn absorb(&mut self, tasks: &[Task]) -> usize {
        let mut added = 0;
        for task in tasks {
            if let Some(list) = &task.list {
                if self.register(list) {
                    added += 1;
                }
            }
        }
        added
    }
}
