//! Pure selectors over the task collection.
//!
//! These are the UI-facing aggregates: bucket counts, per-list counts, the
//! in-progress / upcoming partition, and filtered views. Predicates that
//! depend on the current time take `now` explicitly so they stay
//! deterministic under test.

use crate::lists::normalize_key;
use crate::task::{Bucket, Task};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Per-bucket task counts plus the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    pub today: usize,
    pub tomorrow: usize,
    pub week: usize,
    pub total: usize,
}

pub fn bucket_counts(tasks: &[Task]) -> BucketCounts {
    let mut counts = BucketCounts::default();
    for task in tasks {
        match task.bucket {
            Bucket::Today => counts.today += 1,
            Bucket::Tomorrow => counts.tomorrow += 1,
            Bucket::Week => counts.week += 1,
        }
        counts.total += 1;
    }
    counts
}

/// Task counts keyed by normalized list key. Tasks without a list are not
/// counted.
pub fn list_counts(tasks: &[Task]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for task in tasks {
        if let Some(list) = &task.list {
            let key = normalize_key(list);
            if key.is_empty() {
                continue;
            }
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    counts
}

/// A task is in progress when it is not completed and its start date is
/// absent or already reached.
pub fn is_in_progress(task: &Task, now: DateTime<Utc>) -> bool {
    if task.completed {
        return false;
    }
    match task.start_date {
        None => true,
        Some(start) => start <= now,
    }
}

/// A task is upcoming when it is not completed and starts strictly after
/// `now`. Tasks without a start date are in progress, never upcoming.
pub fn is_upcoming(task: &Task, now: DateTime<Utc>) -> bool {
    if task.completed {
        return false;
    }
    match task.start_date {
        None => false,
        Some(start) => start > now,
    }
}

/// In-progress tasks ordered by start date ascending; a missing start date
/// sorts first (treated as epoch).
pub fn in_progress(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    sorted_by_start(tasks.iter().filter(|t| is_in_progress(t, now)))
}

/// Upcoming tasks ordered by start date ascending.
pub fn upcoming(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    sorted_by_start(tasks.iter().filter(|t| is_upcoming(t, now)))
}

/// Tasks in the given bucket, ordered by start date ascending.
pub fn tasks_in_bucket(tasks: &[Task], bucket: Bucket) -> Vec<Task> {
    sorted_by_start(tasks.iter().filter(|t| t.bucket == bucket))
}

/// Tasks whose list matches `name` by normalized key. A task without a list
/// never matches.
pub fn filter_by_list(tasks: &[Task], name: &str) -> Vec<Task> {
    let target = normalize_key(name);
    tasks
        .iter()
        .filter(|t| {
            t.list
                .as_deref()
                .is_some_and(|list| normalize_key(list) == target)
        })
        .cloned()
        .collect()
}

pub(crate) fn start_or_epoch(task: &Task) -> DateTime<Utc> {
    task.start_date.unwrap_or(DateTime::UNIX_EPOCH)
}

fn sorted_by_start<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut out: Vec<Task> = tasks.cloned().collect();
    out.sort_by_key(start_or_epoch);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskId;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    fn task(id: TaskId) -> Task {
        let created = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        Task {
            id,
            title: format!("task {id}"),
            description: String::new(),
            completed: false,
            bucket: Bucket::Today,
            list: None,
            start_date: None,
            expected_completion: None,
            created_at: created,
            updated_at: created,
            just_created: false,
        }
    }

    fn task_starting(id: TaskId, start: DateTime<Utc>) -> Task {
        Task {
            start_date: Some(start),
            ..task(id)
        }
    }

    #[test]
    fn bucket_counts_sum_to_total() {
        let tasks = vec![
            task(1),
            Task {
                bucket: Bucket::Tomorrow,
                ..task(2)
            },
            Task {
                bucket: Bucket::Week,
                ..task(3)
            },
            task(4),
        ];

        let counts = bucket_counts(&tasks);

        assert_eq!(counts.today, 2);
        assert_eq!(counts.tomorrow, 1);
        assert_eq!(counts.week, 1);
        assert_eq!(counts.total, 4);
    }

    #[test]
    fn list_counts_key_by_normalized_name() {
        let tasks = vec![
            Task {
                list: Some("Work".to_string()),
                ..task(1)
            },
            Task {
                list: Some(" work ".to_string()),
                ..task(2)
            },
            Task {
                list: Some("Home".to_string()),
                ..task(3)
            },
            task(4),
        ];

        let counts = list_counts(&tasks);

        assert_eq!(counts.get("work"), Some(&2));
        assert_eq!(counts.get("home"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn task_without_start_date_is_in_progress_never_upcoming() {
        let t = task(1);

        assert!(is_in_progress(&t, now()));
        assert!(!is_upcoming(&t, now()));
    }

    #[test]
    fn future_start_date_makes_task_upcoming() {
        let t = task_starting(1, now() + chrono::Duration::hours(1));

        assert!(!is_in_progress(&t, now()));
        assert!(is_upcoming(&t, now()));
    }

    #[test]
    fn completed_task_is_neither_in_progress_nor_upcoming() {
        let t = Task {
            completed: true,
            ..task(1)
        };

        assert!(!is_in_progress(&t, now()));
        assert!(!is_upcoming(&t, now()));
    }

    #[test]
    fn in_progress_sorts_missing_start_dates_first() {
        let tasks = vec![
            task_starting(1, now() - chrono::Duration::hours(1)),
            task(2),
            task_starting(3, now() - chrono::Duration::hours(5)),
        ];

        let ids: Vec<_> = in_progress(&tasks, now()).iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn filter_by_list_uses_normalized_equality() {
        let tasks = vec![
            Task {
                list: Some("Side  Projects".to_string()),
                ..task(1)
            },
            Task {
                list: Some("Work".to_string()),
                ..task(2)
            },
            task(3),
        ];

        let filtered = filter_by_list(&tasks, " side projects ");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn filter_by_list_never_matches_taskless_lists() {
        let tasks = vec![task(1), task(2)];

        assert!(filter_by_list(&tasks, "work").is_empty());
    }

    #[test]
    fn tasks_in_bucket_filters_and_sorts() {
        let tasks = vec![
            task_starting(1, now() + chrono::Duration::hours(2)),
            Task {
                bucket: Bucket::Week,
                ..task(2)
            },
            task_starting(3, now() - chrono::Duration::hours(2)),
        ];

        let ids: Vec<_> = tasks_in_bucket(&tasks, Bucket::Today)
            .iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, vec![3, 1]);
    }
}
