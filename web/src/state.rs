//! Client-side application state: the cached task collection, the list
//! registry, toasts, and the persisted UI settings.
//!
//! The task cache is the single in-memory source of truth for every derived
//! view; all aggregates are computed through the pure selectors in
//! `taskdeck_core`. Each persisted setting lives under its own namespaced
//! localStorage key and is loaded/saved independently.

use crate::api::{self, ApiError, NewTaskPayload, TaskPatchPayload};
use dioxus::prelude::*;
use gloo_storage::{LocalStorage, Storage};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use taskdeck_core::{
    BucketCounts, ListRegistry, Task, TaskId, derived, normalize_key,
};
use thiserror::Error;

const LISTS_KEY: &str = "tm_user_lists_v1";
const THEME_KEY: &str = "tm_theme_v1";
const CALENDAR_MODE_KEY: &str = "tm_calendar_mode";
const REMINDERS_KEY: &str = "tm_reminders_v1";

/// How long a freshly created task keeps its "just added" animation flag.
const JUST_CREATED_MS: u32 = 1600;
/// Toast lifetime before auto-dismissal.
const TOAST_MS: u32 = 3200;

/// Errors surfaced by the mutation coordinator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The id is absent from the local cache; no server round-trip is
    /// attempted.
    #[error("Task not found")]
    NotInCache,
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Aggregate result of a best-effort list rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: usize,
    pub failed: usize,
}

/// Application store: cached tasks plus the list registry, with the mutation
/// coordinator keeping both consistent after every change.
#[derive(Clone, Copy)]
pub struct TasksStore {
    tasks: Signal<Vec<Task>>,
    loading: Signal<bool>,
    load_error: Signal<bool>,
    selected_list: Signal<Option<String>>,
    registry: Signal<ListRegistry>,
}

/// Provides the store to the component tree and kicks off the initial load.
pub fn use_tasks_provider() -> TasksStore {
    let store = use_context_provider(|| TasksStore {
        tasks: Signal::new(Vec::new()),
        loading: Signal::new(true),
        load_error: Signal::new(false),
        selected_list: Signal::new(None),
        registry: Signal::new(initial_registry()),
    });
    use_effect(move || {
        spawn(async move {
            store.load().await;
        });
    });
    store
}

pub fn use_tasks_store() -> TasksStore {
    use_context()
}

impl TasksStore {
    /// Fetches the full collection. A failed load degrades to an empty
    /// cache with the error flag set; the view renders, it never crashes.
    pub async fn load(mut self) {
        self.loading.set(true);
        match api::fetch_tasks().await {
            Ok(grouped) => {
                let tasks = grouped.flatten();
                self.absorb_lists(&tasks);
                self.tasks.set(tasks);
                self.load_error.set(false);
            }
            Err(err) => {
                tracing::error!("failed to load tasks: {err}");
                self.tasks.set(Vec::new());
                self.load_error.set(true);
            }
        }
        self.loading.set(false);
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    pub fn loading(&self) -> bool {
        *self.loading.read()
    }

    pub fn load_error(&self) -> bool {
        *self.load_error.read()
    }

    pub fn find(&self, id: TaskId) -> Option<Task> {
        self.tasks.read().iter().find(|t| t.id == id).cloned()
    }

    pub fn counts(&self) -> BucketCounts {
        derived::bucket_counts(&self.tasks.read())
    }

    pub fn list_counts(&self) -> HashMap<String, usize> {
        derived::list_counts(&self.tasks.read())
    }

    pub fn selected_list(&self) -> Option<String> {
        self.selected_list.read().clone()
    }

    pub fn set_selected_list(&mut self, list: Option<String>) {
        self.selected_list.set(list);
    }

    /// Registered list display names, most recently added first.
    pub fn lists(&self) -> Vec<String> {
        self.registry.read().names().to_vec()
    }

    /// Explicit list creation. Returns false when the name normalizes to an
    /// existing entry (or is blank).
    pub fn create_list(&mut self, name: &str) -> bool {
        let added = self.registry.with_mut(|registry| registry.register(name));
        if added {
            self.persist_lists();
        }
        added
    }

    /// Removes only the registry entry. Tasks keep their list string.
    pub fn remove_list(&mut self, name: &str) {
        self.registry.with_mut(|registry| {
            registry.remove(name);
        });
        self.persist_lists();
    }

    /// Creates a task. On success the cache is prepended with the task
    /// carrying its transient just-created flag, the list registry absorbs
    /// any new list name, and the flag is cleared after a fixed delay.
    pub async fn add(mut self, payload: NewTaskPayload) -> Result<Task, StoreError> {
        let mut created = api::create_task(&payload).await?;
        created.just_created = true;
        if let Some(list) = created.list.clone() {
            self.register_list(&list);
        }
        self.tasks.with_mut(|tasks| tasks.insert(0, created.clone()));

        let store = self;
        let id = created.id;
        spawn(async move {
            TimeoutFuture::new(JUST_CREATED_MS).await;
            store.clear_just_created(id);
        });

        Ok(created)
    }

    /// Flips `completed`, reading the current value from the cache. An id
    /// absent from the cache fails without a server round-trip.
    pub async fn toggle_complete(mut self, id: TaskId) -> Result<Task, StoreError> {
        let current = self.find(id).ok_or(StoreError::NotInCache)?;
        let patch = TaskPatchPayload {
            completed: Some(!current.completed),
            ..Default::default()
        };
        let updated = api::update_task(id, &patch).await?;
        self.replace(updated.clone());
        Ok(updated)
    }

    pub async fn update(mut self, id: TaskId, patch: TaskPatchPayload) -> Result<Task, StoreError> {
        let updated = api::update_task(id, &patch).await?;
        if let Some(list) = updated.list.clone() {
            self.register_list(&list);
        }
        self.replace(updated.clone());
        Ok(updated)
    }

    pub async fn remove(mut self, id: TaskId) -> Result<(), StoreError> {
        api::delete_task(id).await?;
        self.tasks.with_mut(|tasks| tasks.retain(|t| t.id != id));
        Ok(())
    }

    /// Renames a list: registers the new name, drops the old one, then
    /// moves every matching task over, one at a time. A failure on one task
    /// never aborts the rest; the outcome is reported in aggregate.
    pub async fn rename_list(mut self, old: &str, new: &str) -> RenameReport {
        self.registry.with_mut(|registry| registry.rename(old, new));
        self.persist_lists();

        let old_key = normalize_key(old);
        let targets: Vec<TaskId> = self
            .tasks
            .read()
            .iter()
            .filter(|t| {
                t.list
                    .as_deref()
                    .is_some_and(|list| normalize_key(list) == old_key)
            })
            .map(|t| t.id)
            .collect();

        let mut report = RenameReport::default();
        for id in targets {
            let patch = TaskPatchPayload {
                list: Some(Some(new.trim().to_string())),
                ..Default::default()
            };
            match api::update_task(id, &patch).await {
                Ok(updated) => {
                    self.replace(updated);
                    report.renamed += 1;
                }
                Err(err) => {
                    tracing::error!("failed to move task {id} to list {new:?}: {err}");
                    report.failed += 1;
                }
            }
        }
        report
    }

    fn replace(&mut self, task: Task) {
        self.tasks.with_mut(|tasks| {
            if let Some(slot) = tasks.iter_mut().find(|t| t.id == task.id) {
                *slot = task;
            }
        });
    }

    fn clear_just_created(mut self, id: TaskId) {
        self.tasks.with_mut(|tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.just_created = false;
            }
        });
    }

    fn register_list(&mut self, name: &str) {
        if self.registry.with_mut(|registry| registry.register(name)) {
            self.persist_lists();
        }
    }

    fn absorb_lists(&mut self, tasks: &[Task]) {
        if self.registry.with_mut(|registry| registry.absorb(tasks)) > 0 {
            self.persist_lists();
        }
    }

    fn persist_lists(&self) {
        let _ = LocalStorage::set(LISTS_KEY, self.registry.read().names());
    }
}

fn initial_registry() -> ListRegistry {
    match LocalStorage::get::<Vec<String>>(LISTS_KEY) {
        Ok(stored) => ListRegistry::from_names(stored),
        Err(_) => {
            // First run: seed the starter lists.
            let registry = ListRegistry::from_names(vec![
                "Personal".to_string(),
                "Work".to_string(),
            ]);
            let _ = LocalStorage::set(LISTS_KEY, registry.names());
            registry
        }
    }
}

/// Reminder preferences, persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    pub minutes_before: u32,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        ReminderSettings {
            enabled: false,
            minutes_before: 30,
        }
    }
}

/// Theme preference, stored as `"light"` / `"dark"`.
pub fn use_theme() -> UsePersistent<String> {
    use_persistent(THEME_KEY, || "light".to_string())
}

/// Calendar display mode, stored as `"span"` / `"start"`.
pub fn use_calendar_mode() -> UsePersistent<String> {
    use_persistent(CALENDAR_MODE_KEY, || "span".to_string())
}

pub fn use_reminder_settings() -> UsePersistent<ReminderSettings> {
    use_persistent(REMINDERS_KEY, ReminderSettings::default)
}

/// A single transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
        }
    }
}

/// Transient notifications with auto-dismissal.
#[derive(Clone, Copy)]
pub struct ToastStore {
    toasts: Signal<Vec<Toast>>,
    next_id: Signal<u32>,
}

pub fn use_toasts_provider() -> ToastStore {
    use_context_provider(|| ToastStore {
        toasts: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    })
}

pub fn use_toasts() -> ToastStore {
    use_context()
}

impl ToastStore {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.read().clone()
    }

    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        let id = self.next_id.with_mut(|next| {
            *next = next.wrapping_add(1);
            *next
        });
        self.toasts.with_mut(|toasts| {
            toasts.insert(
                0,
                Toast {
                    id,
                    message: message.into(),
                    kind,
                },
            );
        });

        let mut store = *self;
        spawn(async move {
            TimeoutFuture::new(TOAST_MS + 200).await;
            store.dismiss(id);
        });
    }

    pub fn dismiss(&mut self, id: u32) {
        self.toasts.with_mut(|toasts| toasts.retain(|t| t.id != id));
    }
}

/// A persistent storage hook that can be used to store data across
/// application reloads.
pub fn use_persistent<T: Serialize + DeserializeOwned + Default + 'static>(
    key: impl ToString,
    init: impl FnOnce() -> T,
) -> UsePersistent<T> {
    let state = use_signal(move || {
        let key = key.to_string();
        let value = LocalStorage::get(key.as_str()).ok().unwrap_or_else(init);
        StorageEntry { key, value }
    });
    UsePersistent { inner: state }
}

#[derive(Debug)]
struct StorageEntry<T> {
    key: String,
    value: T,
}

/// Storage that persists across application reloads.
pub struct UsePersistent<T: 'static> {
    inner: Signal<StorageEntry<T>>,
}

impl<T: 'static> Clone for UsePersistent<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for UsePersistent<T> {}

impl<T: Serialize + DeserializeOwned + Clone + 'static> UsePersistent<T> {
    /// Gets a cloned value snapshot.
    pub fn get(&self) -> T {
        self.inner.read().value.clone()
    }

    /// Replaces the stored value and persists.
    pub fn set(&mut self, value: T) {
        let mut inner = self.inner.write();
        let _ = LocalStorage::set(inner.key.as_str(), &value);
        inner.value = value;
    }

    /// Applies a closure to mutate the value in-place and persists
    /// afterwards.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        let mut inner = self.inner.write();
        f(&mut inner.value);
        let _ = LocalStorage::set(inner.key.as_str(), &inner.value);
    }
}
