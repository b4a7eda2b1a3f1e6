use crate::api::{self, TaskPatchPayload};
use crate::components::{Header, LoadingSpinner};
use crate::state::{ToastKind, use_tasks_store, use_toasts};
use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use taskdeck_core::Task;

fn long_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// Single-task view: cache-first, falling back to a server fetch when the
/// task is not in the local collection.
#[component]
pub fn TaskDetails(id: i32) -> Element {
    let store = use_tasks_store();
    let toasts = use_toasts();
    let navigator = use_navigator();
    let mut task = use_signal(|| None::<Task>);
    let mut loading = use_signal(|| true);
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);

    use_effect(move || {
        if let Some(cached) = store.find(id) {
            task.set(Some(cached));
            loading.set(false);
            return;
        }
        spawn(async move {
            match api::fetch_tasks().await {
                Ok(grouped) => {
                    let found = grouped.flatten().into_iter().find(|t| t.id == id);
                    task.set(found);
                }
                Err(err) => {
                    tracing::error!("failed to fetch task {id}: {err}");
                    task.set(None);
                }
            }
            loading.set(false);
        });
    });

    let handle_toggle = move |_| {
        spawn(async move {
            let mut toasts = toasts;
            match store.toggle_complete(id).await {
                Ok(updated) => task.set(Some(updated)),
                Err(err) => toasts.show(err.to_string(), ToastKind::Error),
            }
        });
    };
    let handle_delete = move |_| {
        spawn(async move {
            let mut toasts = toasts;
            match store.remove(id).await {
                Ok(()) => {
                    toasts.show("Task deleted", ToastKind::Info);
                    navigator.go_back();
                }
                Err(err) => toasts.show(err.to_string(), ToastKind::Error),
            }
        });
    };
    let handle_edit = move |evt: FormEvent| {
        evt.prevent_default();
        let title = draft().trim().to_string();
        if title.is_empty() {
            return;
        }
        editing.set(false);
        spawn(async move {
            let mut toasts = toasts;
            let patch = TaskPatchPayload {
                title: Some(title),
                ..Default::default()
            };
            match store.update(id, patch).await {
                Ok(updated) => task.set(Some(updated)),
                Err(err) => toasts.show(err.to_string(), ToastKind::Error),
            }
        });
    };

    rsx! {
        div { class: "page",
            Header { title: "Task details" }
            div { class: "toolbar",
                button { class: "mini-btn", onclick: move |_| { navigator.go_back(); }, "Back" }
            }

            if loading() {
                LoadingSpinner { message: "Loading..." }
            } else if let Some(task_value) = task() {
                div { class: "task-details",
                    if editing() {
                        form { class: "task-edit", onsubmit: handle_edit,
                            input {
                                r#type: "text",
                                value: "{draft}",
                                oninput: move |evt| draft.set(evt.value()),
                                autofocus: true,
                            }
                            button { r#type: "submit", class: "mini-btn", "Save" }
                            button {
                                r#type: "button",
                                class: "mini-btn",
                                onclick: move |_| editing.set(false),
                                "Cancel"
                            }
                        }
                    } else {
                        h2 { "{task_value.title}" }
                    }

                    div { class: "task-meta",
                        if let Some(list) = &task_value.list {
                            span { "List: " strong { "{list}" } }
                        }
                        span { "Bucket: " strong { "{task_value.bucket.as_str()}" } }
                        if let Some(start) = task_value.start_date {
                            span { "Start: {long_time(start)}" }
                        }
                        if let Some(due) = task_value.expected_completion {
                            span { "Expected: {long_time(due)}" }
                        }
                    }

                    div { class: "task-description",
                        if task_value.description.is_empty() {
                            em { "No description" }
                        } else {
                            "{task_value.description}"
                        }
                    }

                    div { class: "task-actions",
                        button { class: "mini-btn", onclick: handle_toggle,
                            if task_value.completed { "Mark incomplete" } else { "Mark complete" }
                        }
                        {
                            let current_title = task_value.title.clone();
                            rsx! {
                                button {
                                    class: "mini-btn",
                                    onclick: move |_| {
                                        draft.set(current_title.clone());
                                        editing.set(true);
                                    },
                                    "Edit"
                                }
                            }
                        }
                        button { class: "mini-btn", onclick: handle_delete, "Delete" }
                    }
                }
            } else {
                div { class: "empty", "Task not found" }
            }
        }
    }
}
