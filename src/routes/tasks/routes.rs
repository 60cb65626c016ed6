use axum::{Json, extract::{State, Path, Query}, http::StatusCode, response::IntoResponse};
use uuid::Uuid;
use crate::state::AppState;
use crate::routes::middleware_auth::JwtUser;
use super::dto::{CreateTask, ListParams, TaskListResponse, UpdateTask};
use super::{filter, queries, validate_title};

pub async fn list(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let search = params.search.unwrap_or_default();

    let tasks = queries::tasks_for_owner(&state.db, user_id)
        .await
        .map_err(|e| {
            eprintln!("Error listing tasks: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list tasks".to_string())
        })?;

    let tasks = filter::apply_search(tasks, &search);
    let incomplete_count = filter::incomplete_count(&tasks);

    Ok(Json(TaskListResponse {
        tasks,
        incomplete_count,
        search,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Json(body): Json<CreateTask>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    validate_title(&body.title).map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let task = queries::create_task(
        &state.db,
        user_id,
        &body.title,
        body.description.as_deref(),
        body.complete,
    )
    .await
    .map_err(|e| {
        eprintln!("Error creating task: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create task".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let task = queries::find_task(&state.db, user_id, id)
        .await
        .map_err(|e| {
            eprintln!("Error fetching task: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch task".to_string())
        })?;

    match task {
        Some(t) => Ok(Json(t)),
        None => Err((StatusCode::NOT_FOUND, "Task not found".to_string())),
    }
}

pub async fn update(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTask>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if let Some(ref title) = body.title {
        validate_title(title).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    }

    let task = queries::update_task(
        &state.db,
        user_id,
        id,
        body.title,
        body.description,
        body.complete,
    )
    .await
    .map_err(|e| {
        eprintln!("Error updating task: {}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update task".to_string())
    })?;

    match task {
        Some(t) => Ok(Json(t)),
        None => Err((StatusCode::NOT_FOUND, "Task not found".to_string())),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let deleted = queries::delete_task(&state.db, user_id, id)
        .await
        .map_err(|e| {
            eprintln!("Error deleting task: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete task".to_string())
        })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Task not found".to_string()));
    }

    Ok((StatusCode::OK, Json(serde_json::json!({"deleted": true}))))
}
