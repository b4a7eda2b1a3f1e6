//! Calendar day-bucketing and the month grid.
//!
//! A task lands on calendar days according to the active mode: either on a
//! single day derived from its dates, or spread across every day of its
//! start-to-expected-completion span.

use crate::derived::start_or_epoch;
use crate::task::Task;
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

/// How tasks are assigned to calendar days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarMode {
    /// Every day from the start date through the expected completion.
    #[default]
    Span,
    /// Only the single day the task starts (or falls back to).
    StartOnly,
}

impl CalendarMode {
    /// Persisted representation (`"span"` / `"start"`).
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarMode::Span => "span",
            CalendarMode::StartOnly => "start",
        }
    }

    /// Parses a persisted value, falling back to `Span`.
    pub fn from_str_or_default(value: &str) -> CalendarMode {
        match value.trim() {
            "start" => CalendarMode::StartOnly,
            _ => CalendarMode::Span,
        }
    }
}

/// Buckets tasks by calendar day.
///
/// Start-only mode assigns each task to the day of its start date, falling
/// back to expected completion, then creation time. Span mode walks every
/// day from start through end (expected completion first, then start, then
/// creation); an inverted range assigns only the start day. Within a day,
/// tasks are ordered by start date ascending with missing start dates
/// first.
pub fn day_buckets(tasks: &[Task], mode: CalendarMode) -> BTreeMap<NaiveDate, Vec<Task>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();

    for task in tasks {
        match mode {
            CalendarMode::StartOnly => {
                let pick = task
                    .start_date
                    .or(task.expected_completion)
                    .unwrap_or(task.created_at);
                buckets.entry(day_of(pick)).or_default().push(task.clone());
            }
            CalendarMode::Span => {
                let start = day_of(
                    task.start_date
                        .or(task.expected_completion)
                        .unwrap_or(task.created_at),
                );
                let end = day_of(
                    task.expected_completion
                        .or(task.start_date)
                        .unwrap_or(task.created_at),
                );
                if end < start {
                    buckets.entry(start).or_default().push(task.clone());
                } else {
                    let mut day = start;
                    while day <= end {
                        buckets.entry(day).or_default().push(task.clone());
                        day += Duration::days(1);
                    }
                }
            }
        }
    }

    for tasks in buckets.values_mut() {
        tasks.sort_by_key(start_or_epoch);
    }

    buckets
}

/// Rows of a Sunday-first month grid, padded with `None` before the first
/// and after the last day of the month.
pub fn month_grid(year: i32, month: u32) -> Vec<Vec<Option<NaiveDate>>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let days_in_month = match next_month {
        Some(next) => (next - first).num_days() as u32,
        None => return Vec::new(),
    };

    let mut cells: Vec<Option<NaiveDate>> = Vec::new();
    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(None);
    }
    for day in 1..=days_in_month {
        cells.push(NaiveDate::from_ymd_opt(year, month, day));
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells.chunks(7).map(|week| week.to_vec()).collect()
}

fn day_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}
