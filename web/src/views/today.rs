use crate::Route;
use crate::api::TaskPatchPayload;
use crate::components::{ErrorMessage, Header, LoadingSpinner, TaskCard};
use crate::state::{ToastKind, use_tasks_store, use_toasts};
use dioxus::prelude::*;
use taskdeck_core::{Bucket, TaskId, derived};

/// Tasks in the `today` bucket, ordered by start date.
#[component]
pub fn TodayPage() -> Element {
    let store = use_tasks_store();
    let toasts = use_toasts();
    let navigator = use_navigator();

    let tasks = store.tasks();
    let todays = derived::tasks_in_bucket(&tasks, Bucket::Today);
    let counts = store.counts();

    let on_toggle = move |id: TaskId| {
        spawn(async move {
            let mut toasts = toasts;
            if let Err(err) = store.toggle_complete(id).await {
                toasts.show(err.to_string(), ToastKind::Error);
            }
        });
    };
    let on_delete = move |id: TaskId| {
        spawn(async move {
            let mut toasts = toasts;
            match store.remove(id).await {
                Ok(()) => toasts.show("Task deleted", ToastKind::Info),
                Err(err) => toasts.show(err.to_string(), ToastKind::Error),
            }
        });
    };
    let on_edit = move |(id, title): (TaskId, String)| {
        spawn(async move {
            let mut toasts = toasts;
            let patch = TaskPatchPayload {
                title: Some(title),
                ..Default::default()
            };
            if let Err(err) = store.update(id, patch).await {
                toasts.show(err.to_string(), ToastKind::Error);
            }
        });
    };

    rsx! {
        div { class: "page",
            Header { title: "Today", count: counts.today }

            if store.load_error() {
                ErrorMessage { message: "Failed to load tasks" }
            }

            if store.loading() {
                LoadingSpinner { message: "Loading tasks..." }
            } else {
                TaskCard {
                    title: "Today",
                    tasks: todays,
                    on_toggle,
                    on_delete,
                    on_edit,
                    on_open: move |id| {
                        navigator.push(Route::TaskDetails { id });
                    },
                }
            }
        }
    }
}
