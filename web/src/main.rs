use dioxus::prelude::*;

mod api;
mod components;
mod state;
mod views;

use components::{Sidebar, Toasts};
use views::{
    CalendarPage, ListDetailPage, ListsPage, NotFound, SettingsPage, StickyWall, TaskDetails,
    TodayPage, UpcomingPage,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppShell)]
    #[route("/")]
    UpcomingPage {},
    #[route("/today")]
    TodayPage {},
    #[route("/calendar")]
    CalendarPage {},
    #[route("/sticky")]
    StickyWall {},
    #[route("/lists")]
    ListsPage {},
    #[route("/lists/:name")]
    ListDetailPage { name: String },
    #[route("/tasks/:id")]
    TaskDetails { id: i32 },
    #[route("/settings")]
    SettingsPage {},
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

/// Layout shared by every page: theme root, sidebar, toast overlay.
#[component]
fn AppShell() -> Element {
    state::use_tasks_provider();
    state::use_toasts_provider();
    let theme = state::use_theme();

    rsx! {
        div { class: "app theme-{theme.get()}",
            Sidebar {}
            main { class: "main-area", Outlet::<Route> {} }
            Toasts {}
        }
    }
}
