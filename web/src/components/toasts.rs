use crate::state::use_toasts;
use dioxus::prelude::*;

/// Overlay rendering the active transient notifications.
#[component]
pub fn Toasts() -> Element {
    let mut toasts = use_toasts();

    rsx! {
        div { class: "toasts",
            for toast in toasts.toasts() {
                div {
                    key: "{toast.id}",
                    class: "toast {toast.kind.class()}",
                    onclick: move |_| toasts.dismiss(toast.id),
                    "{toast.message}"
                }
            }
        }
    }
}
