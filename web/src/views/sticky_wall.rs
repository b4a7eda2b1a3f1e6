use crate::components::Header;
use dioxus::prelude::*;

/// Placeholder page for sticky notes.
#[component]
pub fn StickyWall() -> Element {
    rsx! {
        div { class: "page",
            Header { title: "Sticky Wall" }
            div { class: "task-card",
                p { "This is a placeholder for sticky notes / quick reminders." }
            }
        }
    }
}
