use crate::task::{NewTask, TaskError, TaskPatch, TaskService, TaskState};
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use taskdeck_core::{GroupedTasks, Task, TaskId};

/// Handler for `GET /api/tasks`: all tasks grouped by bucket.
#[tracing::instrument(skip(state))]
async fn list_tasks_handler(State(state): State<TaskState>) -> Result<Json<GroupedTasks>, TaskError> {
    let service = TaskService::new(&state.db);
    let grouped = service.get_grouped().await?;
    Ok(Json(grouped))
}

/// Handler for `POST /api/tasks`: creates a task, 201 on success.
#[tracing::instrument(skip(state))]
async fn create_task_handler(
    State(state): State<TaskState>,
    Json(payload): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), TaskError> {
    let service = TaskService::new(&state.db);
    let created = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler for `GET /api/tasks/{id}`.
#[tracing::instrument(skip(state))]
async fn get_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, TaskError> {
    let id = parse_id(&id)?;
    let service = TaskService::new(&state.db);
    let task = service.get_by_id(id).await?;
    Ok(Json(task))
}

/// Handler for `PUT /api/tasks/{id}`: partial update.
#[tracing::instrument(skip(state))]
async fn update_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, TaskError> {
    let id = parse_id(&id)?;
    let service = TaskService::new(&state.db);
    let updated = service.update(id, patch).await?;
    Ok(Json(updated))
}

/// Handler for `DELETE /api/tasks/{id}`: 204 with an empty body.
#[tracing::instrument(skip(state))]
async fn delete_task_handler(
    State(state): State<TaskState>,
    Path(id): Path<String>,
) -> Result<StatusCode, TaskError> {
    let id = parse_id(&id)?;
    let service = TaskService::new(&state.db);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A malformed id is rejected before any store access.
fn parse_id(raw: &str) -> Result<TaskId, TaskError> {
    raw.parse()
        .map_err(|_| TaskError::InvalidInput("Invalid id".to_string()))
}

/// Creates the router for the tasks resource.
pub fn create_tasks_router(state: TaskState) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route(
            "/api/tasks/{id}",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
