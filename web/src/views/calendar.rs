use crate::components::Header;
use crate::state::use_calendar_mode;
use crate::state::use_tasks_store;
use chrono::{Datelike, NaiveDate, Utc};
use dioxus::prelude::*;
use taskdeck_core::calendar::{CalendarMode, day_buckets, month_grid};
use taskdeck_core::Task;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Month view; the display mode (span vs. start-only) is persisted locally.
#[component]
pub fn CalendarPage() -> Element {
    let store = use_tasks_store();
    let mut mode_setting = use_calendar_mode();
    let today = Utc::now().date_naive();
    let mut view_year = use_signal(|| today.year());
    let mut view_month = use_signal(|| today.month());
    let mut selected_day = use_signal(|| None::<NaiveDate>);

    let mode = CalendarMode::from_str_or_default(&mode_setting.get());
    let tasks = store.tasks();
    let by_day = day_buckets(&tasks, mode);
    let grid = month_grid(view_year(), view_month());
    let month_name = MONTH_NAMES[(view_month() as usize).saturating_sub(1) % 12];

    let go_prev = move |_| {
        if view_month() == 1 {
            view_month.set(12);
            view_year.set(view_year() - 1);
        } else {
            view_month.set(view_month() - 1);
        }
        selected_day.set(None);
    };
    let go_next = move |_| {
        if view_month() == 12 {
            view_month.set(1);
            view_year.set(view_year() + 1);
        } else {
            view_month.set(view_month() + 1);
        }
        selected_day.set(None);
    };

    rsx! {
        div { class: "page",
            Header { title: "Calendar" }

            div { class: "calendar-toolbar",
                div { class: "month-nav",
                    button { class: "mini-btn", onclick: go_prev, "◀" }
                    div { class: "month-label", "{month_name} {view_year}" }
                    button { class: "mini-btn", onclick: go_next, "▶" }
                }
                div { class: "mode-select",
                    span { "Mode:" }
                    select {
                        value: "{mode.as_str()}",
                        onchange: move |evt| mode_setting.set(evt.value()),
                        option { value: "span", "Span (start → expected)" }
                        option { value: "start", "Start only" }
                    }
                }
            }

            div { class: "calendar",
                div { class: "calendar-weekdays",
                    for day in WEEKDAYS {
                        div { key: "{day}", class: "weekday", "{day}" }
                    }
                }
                div { class: "calendar-grid",
                    for (week_index, week) in grid.iter().enumerate() {
                        for (day_index, cell) in week.iter().enumerate() {
                            {
                                let cell = *cell;
                                let cell_key = format!("{week_index}-{day_index}");
                                match cell {
                                    None => rsx! {
                                        div { key: "{cell_key}", class: "calendar-cell blank" }
                                    },
                                    Some(date) => {
                                        let tasks_for_day =
                                            by_day.get(&date).cloned().unwrap_or_default();
                                        let day_count = tasks_for_day.len();
                                        let extra = day_count.saturating_sub(3);
                                        let cell_class = if date == today {
                                            "calendar-cell today"
                                        } else {
                                            "calendar-cell"
                                        };
                                        rsx! {
                                            div {
                                                key: "{cell_key}",
                                                class: "{cell_class}",
                                                onclick: move |_| selected_day.set(Some(date)),
                                                div { class: "cell-header",
                                                    span { class: "cell-day", "{date.day()}" }
                                                    if day_count > 0 {
                                                        span { class: "badge", "{day_count}" }
                                                    }
                                                }
                                                for task in tasks_for_day.iter().take(3) {
                                                    div { key: "{task.id}", class: "cell-task", "• {task.title}" }
                                                }
                                                if extra > 0 {
                                                    div { class: "cell-more", "+{extra} more" }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            if let Some(date) = selected_day() {
                DayModal {
                    date,
                    tasks: by_day.get(&date).cloned().unwrap_or_default(),
                    on_close: move |_| selected_day.set(None),
                }
            }
        }
    }
}

#[component]
fn DayModal(date: NaiveDate, tasks: Vec<Task>, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "popup-overlay", onclick: move |_| on_close.call(()),
            div { class: "popup-card", onclick: move |evt| evt.stop_propagation(),
                header { class: "popup-header",
                    h3 { "Tasks on {date}" }
                    button { class: "popup-close", onclick: move |_| on_close.call(()), "✕" }
                }
                div { class: "popup-body",
                    if tasks.is_empty() {
                        div { class: "empty", "No tasks for this day." }
                    } else {
                        for task in tasks {
                            div { key: "{task.id}", class: "task-card",
                                div { class: "cell-header",
                                    span { class: "task-title", "{task.title}" }
                                    span { class: "muted-badge", "{task.bucket.as_str()}" }
                                }
                                if !task.description.is_empty() {
                                    p { class: "task-description", "{task.description}" }
                                }
                            }
                        }
                    }
                }
                div { class: "popup-actions",
                    button { class: "btn-cancel", onclick: move |_| on_close.call(()), "Close" }
                }
            }
        }
    }
}
