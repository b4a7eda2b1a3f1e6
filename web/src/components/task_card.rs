use chrono::{DateTime, Utc};
use dioxus::prelude::*;
use taskdeck_core::{Task, TaskId};

fn short_time(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M").to_string()
}

/// A titled section of task rows with toggle / edit / delete actions.
#[component]
pub fn TaskCard(
    title: String,
    tasks: Vec<Task>,
    on_toggle: EventHandler<TaskId>,
    on_delete: EventHandler<TaskId>,
    on_edit: EventHandler<(TaskId, String)>,
    on_open: EventHandler<TaskId>,
) -> Element {
    rsx! {
        section { class: "task-card",
            div { class: "task-card-title", "{title}" }
            if tasks.is_empty() {
                div { class: "empty", "No tasks here yet." }
            } else {
                ul { class: "task-list",
                    for task in tasks {
                        TaskRow {
                            key: "{task.id}",
                            task: task.clone(),
                            on_toggle,
                            on_delete,
                            on_edit,
                            on_open,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TaskRow(
    task: Task,
    on_toggle: EventHandler<TaskId>,
    on_delete: EventHandler<TaskId>,
    on_edit: EventHandler<(TaskId, String)>,
    on_open: EventHandler<TaskId>,
) -> Element {
    let mut editing = use_signal(|| false);
    let mut draft = use_signal(String::new);
    let id = task.id;
    let current_title = task.title.clone();

    let row_class = if task.just_created {
        "task-row just-created"
    } else if task.completed {
        "task-row completed"
    } else {
        "task-row"
    };

    rsx! {
        li { class: "{row_class}",
            input {
                r#type: "checkbox",
                checked: task.completed,
                onchange: move |_| on_toggle.call(id),
            }
            if editing() {
                form {
                    class: "task-edit",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        let title = draft().trim().to_string();
                        if !title.is_empty() {
                            on_edit.call((id, title));
                        }
                        editing.set(false);
                    },
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
                div { class: "task-body",
                    span {
                        class: "task-title",
                        onclick: move |_| on_open.call(id),
                        "{task.title}"
                    }
                    div { class: "task-meta",
                        if let Some(list) = &task.list {
                            span { class: "badge", "{list}" }
                        }
                        if let Some(start) = task.start_date {
                            span { class: "date-badge", "Start: {short_time(start)}" }
                        }
                        if let Some(due) = task.expected_completion {
                            span { class: "date-badge", "Due: {short_time(due)}" }
                        }
                    }
                }
                div { class: "task-actions",
                    button {
                        class: "mini-btn",
                        onclick: move |_| {
                            draft.set(current_title.clone());
                            editing.set(true);
                        },
                        "Edit"
                    }
                    button {
                        class: "mini-btn",
                        onclick: move |_| on_delete.call(id),
                        "✕"
                    }
                }
            }
        }
    }
}
