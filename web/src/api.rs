//! Thin REST client for the tasks API.
//!
//! One canonical payload shape per operation; the server's `{message}` error
//! bodies are surfaced as [`ApiError::Api`] with the status retained.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use taskdeck_core::{Bucket, GroupedTasks, Task, TaskId};
use thiserror::Error;

const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Base URL of the API server, overridable at build time.
fn api_base() -> &'static str {
    option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE)
}

fn tasks_url() -> String {
    format!("{}/api/tasks", api_base())
}

fn task_url(id: TaskId) -> String {
    format!("{}/api/tasks/{}", api_base(), id)
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error status and (usually) a JSON
    /// `{message}` body.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Body for `POST /api/tasks`. Dates are sent as the raw strings the user
/// typed; the server parses them leniently.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskPayload {
    pub title: String,
    pub description: String,
    pub bucket: Bucket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_completion: Option<String>,
}

/// Partial body for `PUT /api/tasks/{id}`. An omitted field is untouched;
/// `Some(None)` serializes as `null` and clears the field server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatchPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<Bucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_completion: Option<Option<String>>,
}

/// Fetches all tasks, grouped by bucket.
pub async fn fetch_tasks() -> Result<GroupedTasks, ApiError> {
    let response = reqwest::get(tasks_url()).await?;
    decode(response).await
}

pub async fn create_task(payload: &NewTaskPayload) -> Result<Task, ApiError> {
    let response = reqwest::Client::new()
        .post(tasks_url())
        .json(payload)
        .send()
        .await?;
    decode(response).await
}

pub async fn update_task(id: TaskId, patch: &TaskPatchPayload) -> Result<Task, ApiError> {
    let response = reqwest::Client::new()
        .put(task_url(id))
        .json(patch)
        .send()
        .await?;
    decode(response).await
}

pub async fn delete_task(id: TaskId) -> Result<(), ApiError> {
    let response = reqwest::Client::new().delete(task_url(id)).send().await?;
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    Ok(())
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(error_from(response).await);
    }
    Ok(response.json().await?)
}

async fn error_from(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| "API error".to_string());
    ApiError::Api { status, message }
}
