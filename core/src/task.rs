use chrono::{DateTime, Utc};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Store-assigned task identifier.
pub type TaskId = i32;

/// The three fixed time-scope categories a task can belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Bucket {
    #[default]
    Today,
    Tomorrow,
    Week,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown bucket: {0}")]
pub struct ParseBucketError(pub String);

impl Bucket {
    /// Returns the canonical wire/storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Bucket::Today => "today",
            Bucket::Tomorrow => "tomorrow",
            Bucket::Week => "week",
        }
    }

    /// Parses a stored bucket value, falling back to `Today` for anything
    /// unrecognized. Grouping logic relies on this default.
    pub fn from_str_or_default(value: &str) -> Bucket {
        Bucket::try_from(value).unwrap_or_default()
    }
}

impl TryFrom<&str> for Bucket {
    type Error = ParseBucketError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(Bucket::Today),
            "tomorrow" => Ok(Bucket::Tomorrow),
            "week" => Ok(Bucket::Week),
            _ => Err(ParseBucketError(value.to_string())),
        }
    }
}

/// A single task as served by the API and cached by the client.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub completed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bucket: Bucket,
    #[cfg_attr(feature = "serde", serde(default))]
    pub list: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_date: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub expected_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Transient client-side flag driving the "just added" animation.
    /// Never serialized or persisted.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub just_created: bool,
}

/// Tasks partitioned by bucket, the shape of `GET /api/tasks`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroupedTasks {
    #[cfg_attr(feature = "serde", serde(default))]
    pub today: Vec<Task>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tomorrow: Vec<Task>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub week: Vec<Task>,
}

impl GroupedTasks {
    /// Partitions tasks by bucket, preserving input order within each group.
    pub fn group(tasks: Vec<Task>) -> GroupedTasks {
        let mut grouped = GroupedTasks::default();
        for task in tasks {
            match task.bucket {
                Bucket::Today => grouped.today.push(task),
                Bucket::Tomorrow => grouped.tomorrow.push(task),
                Bucket::Week => grouped.week.push(task),
            }
        }
        grouped
    }

    /// Flattens back into a single collection: today, then tomorrow, then
    /// week. This is the order the client cache uses.
    pub fn flatten(self) -> Vec<Task> {
        let mut all = self.today;
        all.extend(self.tomorrow);
        all.extend(self.week);
        all
    }

    pub fn len(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.week.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
