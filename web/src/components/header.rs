use dioxus::prelude::*;

/// Page header with a title and an optional count badge.
#[component]
pub fn Header(title: String, count: Option<usize>) -> Element {
    rsx! {
        div { class: "header",
            div { class: "title", "{title}" }
            if let Some(count) = count {
                div { class: "count-badge", "{count}" }
            }
        }
    }
}
