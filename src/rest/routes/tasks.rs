// rest/routes/tasks.rs — Task CRUD routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::tasks::{NewTask, Task, TaskPatch, TaskStoreError};
use crate::AppContext;

type ApiError = (StatusCode, Json<Value>);

fn store_error(e: TaskStoreError) -> ApiError {
    let status = match e {
        TaskStoreError::EmptyTitle => StatusCode::BAD_REQUEST,
        TaskStoreError::NotFound => StatusCode::NOT_FOUND,
    };
    (status, Json(json!({ "error": e.to_string() })))
}

pub async fn create_task(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = ctx.store.create(body).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list_tasks(State(ctx): State<Arc<AppContext>>) -> Json<Vec<Task>> {
    Json(ctx.store.list().await)
}

pub async fn toggle_complete(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let task = ctx.store.toggle_complete(&id).await.map_err(store_error)?;
    Ok(Json(task))
}

pub async fn update_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    let task = ctx.store.update(&id, patch).await.map_err(store_error)?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    ctx.store.delete(&id).await.map_err(store_error)?;
    Ok(Json(json!({ "message": "Task deleted successfully" })))
}
