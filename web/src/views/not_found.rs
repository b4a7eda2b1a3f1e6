use crate::Route;
use dioxus::prelude::*;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    rsx! {
        div { class: "page not-found",
            h1 { "404" }
            h2 { "Page Not Found" }
            p { "The page you're looking for doesn't exist." }
            Link { to: Route::UpcomingPage {}, class: "btn-add", "Back to tasks" }
        }
    }
}
