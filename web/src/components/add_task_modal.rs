use crate::api::NewTaskPayload;
use dioxus::prelude::*;
use taskdeck_core::Bucket;

/// Modal form for creating a task: title, description, bucket, list, and
/// the two optional dates.
#[component]
pub fn AddTaskModal(
    open: bool,
    on_close: EventHandler<()>,
    on_confirm: EventHandler<NewTaskPayload>,
) -> Element {
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut bucket = use_signal(|| Bucket::Today);
    let mut list = use_signal(String::new);
    let mut start_date = use_signal(String::new);
    let mut expected_completion = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    if !open {
        return rsx! { div {} };
    }

    let mut reset = move || {
        title.set(String::new());
        description.set(String::new());
        bucket.set(Bucket::Today);
        list.set(String::new());
        start_date.set(String::new());
        expected_completion.set(String::new());
        error.set(None);
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let trimmed_title = title().trim().to_string();
        if trimmed_title.is_empty() {
            error.set(Some("Title is required".to_string()));
            return;
        }
        let payload = NewTaskPayload {
            title: trimmed_title,
            description: description().trim().to_string(),
            bucket: bucket(),
            list: non_empty(list()),
            start_date: non_empty(start_date()),
            expected_completion: non_empty(expected_completion()),
        };
        reset();
        on_confirm.call(payload);
    };

    let bucket_value = bucket().as_str();

    rsx! {
        div { class: "popup-overlay", onclick: move |_| on_close.call(()),
            div { class: "popup-card", onclick: move |evt| evt.stop_propagation(),
                header { class: "popup-header",
                    h3 { "Add Task" }
                    button { class: "popup-close", onclick: move |_| on_close.call(()), "✕" }
                }

                form { class: "task-form", onsubmit: handle_submit,
                    label { "Title"
                        input {
                            r#type: "text",
                            value: "{title}",
                            oninput: move |evt| title.set(evt.value()),
                            autofocus: true,
                        }
                    }
                    label { "Description"
                        textarea {
                            value: "{description}",
                            oninput: move |evt| description.set(evt.value()),
                        }
                    }
                    label { "Bucket"
                        select {
                            value: "{bucket_value}",
                            onchange: move |evt| {
                                bucket.set(Bucket::from_str_or_default(&evt.value()));
                            },
                            option { value: "today", "Today" }
                            option { value: "tomorrow", "Tomorrow" }
                            option { value: "week", "This Week" }
                        }
                    }
                    label { "List"
                        input {
                            r#type: "text",
                            placeholder: "Optional list name",
                            value: "{list}",
                            oninput: move |evt| list.set(evt.value()),
                        }
                    }
                    label { "Start"
                        input {
                            r#type: "datetime-local",
                            value: "{start_date}",
                            oninput: move |evt| start_date.set(evt.value()),
                        }
                    }
                    label { "Expected completion"
                        input {
                            r#type: "datetime-local",
                            value: "{expected_completion}",
                            oninput: move |evt| expected_completion.set(evt.value()),
                        }
                    }

                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }

                    div { class: "popup-actions",
                        button { r#type: "submit", class: "btn-add", "Add task" }
                        button {
                            r#type: "button",
                            class: "btn-cancel",
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                    }
                }
            }
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
