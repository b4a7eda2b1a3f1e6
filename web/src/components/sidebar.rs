use crate::Route;
use crate::state::{ToastKind, use_tasks_store, use_toasts};
use dioxus::prelude::*;
use taskdeck_core::normalize_key;

/// Navigation plus the user-defined lists section with per-list counts.
#[component]
pub fn Sidebar() -> Element {
    let mut store = use_tasks_store();
    let mut toasts = use_toasts();
    let navigator = use_navigator();
    let mut new_list = use_signal(String::new);

    let lists = store.lists();
    let counts = store.list_counts();
    let total = store.counts().total;

    rsx! {
        aside { class: "sidebar",
            div { class: "menu-title", h2 { "Taskdeck" } }

            nav { class: "menu",
                Link { to: Route::UpcomingPage {}, class: "menu-link", "Upcoming" }
                Link { to: Route::TodayPage {}, class: "menu-link", "Today" }
                Link { to: Route::CalendarPage {}, class: "menu-link", "Calendar" }
                Link { to: Route::StickyWall {}, class: "menu-link", "Sticky Wall" }
                Link { to: Route::SettingsPage {}, class: "menu-link", "Settings" }
            }

            div { class: "section",
                div { class: "menu-title",
                    h3 { "Lists" }
                }
                ul { class: "lists",
                    for list in lists {
                        {
                            let count = counts.get(&normalize_key(&list)).copied().unwrap_or(0);
                            let select_name = list.clone();
                            let remove_name = list.clone();
                            rsx! {
                                li { key: "{list}", class: "list-item",
                                    span {
                                        class: "list-name",
                                        onclick: move |_| {
                                            store.set_selected_list(Some(select_name.clone()));
                                            navigator.push(Route::ListDetailPage { name: select_name.clone() });
                                        },
                                        "{list}"
                                    }
                                    span { class: "muted-badge", "{count}" }
                                    button {
                                        class: "mini-btn",
                                        onclick: move |_| {
                                            store.remove_list(&remove_name);
                                            toasts.show(format!("Removed list \"{remove_name}\""), ToastKind::Info);
                                        },
                                        "✕"
                                    }
                                }
                            }
                        }
                    }
                    li { class: "list-item",
                        span {
                            class: "list-name",
                            onclick: move |_| {
                                store.set_selected_list(None);
                                navigator.push(Route::ListsPage {});
                            },
                            "All / Unassigned"
                        }
                        span { class: "muted-badge", "{total}" }
                    }
                }
                form {
                    class: "add-list",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        let name = new_list().trim().to_string();
                        if name.is_empty() {
                            return;
                        }
                        if store.create_list(&name) {
                            new_list.set(String::new());
                            navigator.push(Route::ListDetailPage { name });
                        } else {
                            toasts.show("List already exists", ToastKind::Error);
                        }
                    },
                    input {
                        r#type: "text",
                        placeholder: "New list name",
                        value: "{new_list}",
                        oninput: move |evt| new_list.set(evt.value()),
                    }
                    button { r#type: "submit", class: "mini-btn", "＋" }
                }
            }
        }
    }
}
