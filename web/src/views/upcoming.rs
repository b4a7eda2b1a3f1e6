use crate::Route;
use crate::api::{NewTaskPayload, TaskPatchPayload};
use crate::components::{AddTaskModal, ErrorMessage, Header, LoadingSpinner, TaskCard};
use crate::state::{ToastKind, use_tasks_store, use_toasts};
use chrono::Utc;
use dioxus::prelude::*;
use taskdeck_core::{Bucket, TaskId, derived};

/// Dashboard: the in-progress / upcoming partition plus the week column.
#[component]
pub fn UpcomingPage() -> Element {
    let store = use_tasks_store();
    let toasts = use_toasts();
    let navigator = use_navigator();
    let mut show_modal = use_signal(|| false);

    let tasks = store.tasks();
    let now = Utc::now();
    let in_progress = derived::in_progress(&tasks, now);
    let upcoming = derived::upcoming(&tasks, now);
    let this_week = derived::tasks_in_bucket(&tasks, Bucket::Week);
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
    let on_open = move |id: TaskId| {
        navigator.push(Route::TaskDetails { id });
    };

    rsx! {
        div { class: "dashboard",
            Header { title: "Upcoming", count: counts.total }

            if store.load_error() {
                ErrorMessage { message: "Failed to load tasks" }
            }

            div { class: "toolbar",
                button { class: "btn-add", onclick: move |_| show_modal.set(true), "+ Add New Task" }
            }

            if store.loading() {
                LoadingSpinner { message: "Loading tasks..." }
            } else {
                div { class: "columns",
                    div { class: "col-left",
                        TaskCard {
                            title: "In Progress",
                            tasks: in_progress,
                            on_toggle,
                            on_delete,
                            on_edit,
                            on_open,
                        }
                        TaskCard {
                            title: "Upcoming",
                            tasks: upcoming,
                            on_toggle,
                            on_delete,
                            on_edit,
                            on_open,
                        }
                    }
                    div { class: "col-right",
                        TaskCard {
                            title: "This Week",
                            tasks: this_week,
                            on_toggle,
                            on_delete,
                            on_edit,
                            on_open,
                        }
                    }
                }
            }

            AddTaskModal {
                open: show_modal(),
                on_close: move |_| show_modal.set(false),
                on_confirm: move |payload: NewTaskPayload| {
                    let list = payload.list.clone();
                    show_modal.set(false);
                    spawn(async move {
                        let mut toasts = toasts;
                        let mut store = store;
                        match store.add(payload).await {
                            Ok(_) => {
                                toasts.show("Task added", ToastKind::Success);
                                if let Some(list) = list {
                                    store.set_selected_list(Some(list.clone()));
                                    navigator.push(Route::ListDetailPage { name: list });
                                }
                            }
                            Err(err) => toasts.show(err.to_string(), ToastKind::Error),
                        }
                    });
                },
            }
        }
    }
}
