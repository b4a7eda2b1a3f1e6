pub mod api;

use crate::entities::task as task_entity;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use sea_orm::{ActiveValue, DbErr, EntityTrait, QueryOrder, entity::prelude::*};
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;
use taskdeck_core::{Bucket, GroupedTasks, Task};

const MAX_TITLE_LEN: usize = 300;

/// Shared state for task routes.
#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

/// Request body for `POST /api/tasks`.
///
/// Date fields arrive as strings and are parsed leniently: an unparsable
/// value is treated as absent rather than rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub expected_completion: Option<String>,
}

/// Partial request body for `PUT /api/tasks/{id}`.
///
/// Absent fields are left untouched; an explicit `null` clears nullable
/// fields (tracked with the double-`Option`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub bucket: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub list: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub expected_completion: Option<Option<String>>,
}

/// Distinguishes a field set to `null` from a field that is absent.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Error type for task operations; every request-time failure is reported
/// through this one path as a JSON `{message}` body.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Not found")]
    NotFound,
    #[error("Database error")]
    Database(#[from] DbErr),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for TaskError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            TaskError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            TaskError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            TaskError::Database(err) => {
                tracing::error!("database error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService {
        TaskService { db }
    }

    /// Creates a task from the request payload.
    ///
    /// The title is required and must be non-empty after trimming; bucket
    /// strings outside the known set are rejected so they are never
    /// persisted.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, new_task: NewTask) -> Result<Task, TaskError> {
        let title = validated_title(new_task.title.as_deref())?;
        let bucket = validated_bucket(new_task.bucket.as_deref())?;
        let description = new_task
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let now = Utc::now();

        let active_model = task_entity::ActiveModel {
            title: ActiveValue::Set(title),
            description: ActiveValue::Set(description),
            completed: ActiveValue::Set(false),
            bucket: ActiveValue::Set(bucket.as_str().to_string()),
            list: ActiveValue::Set(normalized_list(new_task.list)),
            start_date: ActiveValue::Set(new_task.start_date.as_deref().and_then(parse_date_lenient)),
            expected_completion: ActiveValue::Set(
                new_task
                    .expected_completion
                    .as_deref()
                    .and_then(parse_date_lenient),
            ),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(to_task(created_model))
    }

    /// Retrieves all tasks ordered by creation time, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Task>, TaskError> {
        let models = task_entity::Entity::find()
            .order_by_desc(task_entity::Column::CreatedAt)
            .order_by_desc(task_entity::Column::Id)
            .all(self.db)
            .await?;
        Ok(models.into_iter().map(to_task).collect())
    }

    /// Retrieves all tasks partitioned by bucket. Any stored bucket value
    /// that no longer parses falls into `today`.
    #[tracing::instrument(skip(self))]
    pub async fn get_grouped(&self) -> Result<GroupedTasks, TaskError> {
        Ok(GroupedTasks::group(self.get_all().await?))
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Task, TaskError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskError::NotFound)?;
        Ok(to_task(model))
    }

    /// Applies a partial update. Supplied fields are validated with the same
    /// rules as `create`; every successful update refreshes `updated_at`.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, id: i32, patch: TaskPatch) -> Result<Task, TaskError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskError::NotFound)?;

        let mut active_model: task_entity::ActiveModel = model.into();
        if let Some(title) = patch.title.as_deref() {
            active_model.title = ActiveValue::Set(validated_title(Some(title))?);
        }
        if let Some(description) = patch.description.as_deref() {
            active_model.description = ActiveValue::Set(description.trim().to_string());
        }
        if let Some(completed) = patch.completed {
            active_model.completed = ActiveValue::Set(completed);
        }
        if let Some(bucket) = patch.bucket.as_deref() {
            let bucket = validated_bucket(Some(bucket))?;
            active_model.bucket = ActiveValue::Set(bucket.as_str().to_string());
        }
        if let Some(list) = patch.list {
            active_model.list = ActiveValue::Set(normalized_list(list));
        }
        if let Some(start_date) = patch.start_date {
            active_model.start_date =
                ActiveValue::Set(start_date.as_deref().and_then(parse_date_lenient));
        }
        if let Some(expected_completion) = patch.expected_completion {
            active_model.expected_completion = ActiveValue::Set(
                expected_completion.as_deref().and_then(parse_date_lenient),
            );
        }
        active_model.updated_at = ActiveValue::Set(Utc::now());

        let updated_model = active_model.update(self.db).await?;
        Ok(to_task(updated_model))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), TaskError> {
        let result = task_entity::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            return Err(TaskError::NotFound);
        }
        Ok(())
    }
}

fn validated_title(title: Option<&str>) -> Result<String, TaskError> {
    let trimmed = title.unwrap_or_default().trim();
    if trimmed.is_empty() {
        return Err(TaskError::InvalidInput("Title is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(TaskError::InvalidInput("Title is too long".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validated_bucket(bucket: Option<&str>) -> Result<Bucket, TaskError> {
    match bucket {
        None => Ok(Bucket::default()),
        Some(value) => Bucket::try_from(value)
            .map_err(|_| TaskError::InvalidInput("Invalid bucket".to_string())),
    }
}

fn normalized_list(list: Option<String>) -> Option<String> {
    list.map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Lenient date parsing: RFC 3339 first, then the common datetime-local and
/// date-only shapes. Anything else is treated as absent.
fn parse_date_lenient(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn to_task(model: task_entity::Model) -> Task {
    Task {
        id: model.id,
        title: model.title,
        description: model.description,
        completed: model.completed,
        bucket: Bucket::from_str_or_default(&model.bucket),
        list: model.list,
        start_date: model.start_date,
        expected_completion: model.expected_completion,
        created_at: model.created_at,
        updated_at: model.updated_at,
        just_created: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_parser_accepts_common_shapes() {
        assert!(parse_date_lenient("2025-01-01T10:30:00Z").is_some());
        assert!(parse_date_lenient("2025-01-01T10:30").is_some());
        assert!(parse_date_lenient("2025-01-01").is_some());
    }

    #[test]
    fn lenient_parser_treats_garbage_as_absent() {
        assert_eq!(parse_date_lenient("not a date"), None);
        assert_eq!(parse_date_lenient(""), None);
        assert_eq!(parse_date_lenient("2025-13-45"), None);
    }

    #[test]
    fn title_validation_rejects_blank_titles() {
        assert!(validated_title(None).is_err());
        assert!(validated_title(Some("")).is_err());
        assert!(validated_title(Some("   ")).is_err());
        assert_eq!(validated_title(Some("  x  ")).unwrap(), "x");
    }

    #[test]
    fn bucket_validation_rejects_unknown_values() {
        assert_eq!(validated_bucket(None).unwrap(), Bucket::Today);
        assert_eq!(validated_bucket(Some("week")).unwrap(), Bucket::Week);
        assert!(validated_bucket(Some("someday")).is_err());
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let cleared: TaskPatch = serde_json::from_str(r#"{"list": null}"#).unwrap();
        let untouched: TaskPatch = serde_json::from_str("{}").unwrap();

        assert_eq!(cleared.list, Some(None));
        assert_eq!(untouched.list, None);
    }
}
