use crate::Route;
use crate::api::TaskPatchPayload;
use crate::components::{ErrorMessage, Header, LoadingSpinner, TaskCard};
use crate::state::{ToastKind, use_tasks_store, use_toasts};
use dioxus::prelude::*;
use taskdeck_core::{TaskId, derived, normalize_key};

/// All tasks, with the registry's lists summarized up top.
#[component]
pub fn ListsPage() -> Element {
    rsx! {
        ListView { name: None::<String> }
    }
}

/// Tasks filtered to a single list.
#[component]
pub fn ListDetailPage(name: String) -> Element {
    rsx! {
        ListView { name: Some(name) }
    }
}

#[component]
fn ListView(name: Option<String>) -> Element {
    let store = use_tasks_store();
    let toasts = use_toasts();
    let navigator = use_navigator();
    let mut renaming = use_signal(|| false);
    let mut rename_draft = use_signal(String::new);

    let tasks = store.tasks();
    let filtered = match &name {
        Some(list) => derived::filter_by_list(&tasks, list),
        None => tasks.clone(),
    };
    let title = match &name {
        Some(list) => format!("List: {list}"),
        None => "All Tasks".to_string(),
    };
    let card_title = match &name {
        Some(list) => format!("Tasks in {list}"),
        None => "All tasks".to_string(),
    };
    let registered = name
        .as_deref()
        .map(|list| store.lists().iter().any(|n| normalize_key(n) == normalize_key(list)))
        .unwrap_or(false);

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

    let rename_from = name.clone();
    let handle_rename = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(old) = rename_from.clone() else {
            return;
        };
        let new = rename_draft().trim().to_string();
        if new.is_empty() {
            return;
        }
        renaming.set(false);
        spawn(async move {
            let mut toasts = toasts;
            let report = store.rename_list(&old, &new).await;
            if report.failed > 0 {
                toasts.show(
                    format!(
                        "Renamed {} task(s), {} failed",
                        report.renamed, report.failed
                    ),
                    ToastKind::Error,
                );
            } else {
                toasts.show(
                    format!("List renamed to \"{new}\" ({} task(s))", report.renamed),
                    ToastKind::Success,
                );
            }
            navigator.push(Route::ListDetailPage { name: new });
        });
    };

    rsx! {
        div { class: "page",
            Header { title, count: filtered.len() }

            if store.load_error() {
                ErrorMessage { message: "Failed to load tasks" }
            }

            if let Some(list) = &name {
                div { class: "toolbar",
                    if renaming() {
                        form { class: "rename-form", onsubmit: handle_rename,
                            input {
                                r#type: "text",
                                value: "{rename_draft}",
                                oninput: move |evt| rename_draft.set(evt.value()),
                                autofocus: true,
                            }
                            button { r#type: "submit", class: "mini-btn", "Rename" }
                            button {
                                r#type: "button",
                                class: "mini-btn",
                                onclick: move |_| renaming.set(false),
                                "Cancel"
                            }
                        }
                    } else {
                        {
                            let current = list.clone();
                            rsx! {
                                button {
                                    class: "mini-btn",
                                    onclick: move |_| {
                                        rename_draft.set(current.clone());
                                        renaming.set(true);
                                    },
                                    "Rename list"
                                }
                            }
                        }
                    }
                    if !registered {
                        span { class: "muted-badge", "not in registry" }
                    }
                }
            }

            if store.loading() {
                LoadingSpinner { message: "Loading tasks..." }
            } else {
                TaskCard {
                    title: card_title,
                    tasks: filtered,
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
