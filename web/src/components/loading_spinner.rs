use dioxus::prelude::*;

/// A loading indicator with an optional message
#[component]
pub fn LoadingSpinner(message: String) -> Element {
    rsx! {
        div { class: "loading",
            div { class: "spinner" }
            p { "{message}" }
        }
    }
}
