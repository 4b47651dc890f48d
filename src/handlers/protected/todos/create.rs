use axum::{
    body::Bytes,
    extract::{Extension, State},
};

use crate::auth::policy::ensure_owner;
use crate::database::models::{Todo, TodoInput, TodoStatus};
use crate::handlers::utils::{
    parse_body, parse_status, required, required_id, required_short, required_timestamp,
};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

use super::TodoRequest;

/**
 * POST /todos - create a todo owned by the caller
 *
 * Expected Input:
 * ```json
 * {
 *   "title": "x",
 *   "description": "y",
 *   "due_time": "2025-12-01 10:00:00",
 *   "user_id": 1,
 *   "status": "todo"            // optional, defaults to "not started"
 * }
 * ```
 *
 * The body is validated first (400), then `user_id` must equal the caller's
 * id (403). The client has to assert its own id; it is never filled in.
 */
pub async fn todo_post(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    body: Bytes,
) -> ApiResult<Todo> {
    let request: TodoRequest = parse_body(&body)?;

    let title = required_short(request.title)?;
    let description = required(request.description)?;
    let due_time = required_timestamp(request.due_time)?;
    let user_id = required_id(request.user_id)?;
    let status = match request.status.as_deref().map(str::trim) {
        None | Some("") => TodoStatus::default(),
        Some(raw) => parse_status(raw)?,
    };

    ensure_owner(&caller, user_id)?;

    let input = TodoInput {
        title,
        description,
        due_time,
        user_id,
        status,
    };

    let todo = state.store.todos.create(&input).await?;
    tracing::debug!("User {} created todo {}", caller.id, todo.id);

    Ok(ApiResponse::created(todo))
}
