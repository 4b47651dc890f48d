use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
};

use crate::auth::policy::{authorize_todo_mutation, require_found};
use crate::database::models::{Todo, TodoInput};
use crate::error::ApiError;
use crate::handlers::utils::{
    parse_body, parse_record_id, parse_status, required, required_id, required_short,
    required_timestamp,
};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

use super::TodoRequest;

/// PUT /todos/:id - replace a todo as a whole
///
/// Order of checks: the todo exists (404), the caller is its current owner
/// (403), the body carries all of title, description, due_time, user_id and
/// status (400). The owner may hand the todo over by submitting another
/// `user_id`, but only to an account that exists (400 otherwise).
pub async fn todo_put(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Todo> {
    let existing = match parse_record_id(&id) {
        Some(id) => state.store.todos.find_by_id(id).await?,
        None => None,
    };
    let existing = authorize_todo_mutation(&caller, existing)?;

    let request: TodoRequest = parse_body(&body)?;
    let input = TodoInput {
        title: required_short(request.title)?,
        description: required(request.description)?,
        due_time: required_timestamp(request.due_time)?,
        user_id: required_id(request.user_id)?,
        status: parse_status(&required(request.status)?)?,
    };

    if input.user_id != existing.user_id {
        require_found(state.store.users.find_by_id(input.user_id).await?)
            .map_err(|_| ApiError::bad_parameter())?;
        tracing::info!(
            "User {} transferred todo {} to user {}",
            caller.id,
            existing.id,
            input.user_id
        );
    }

    // Deleted between the ownership check and the write: report it as gone
    let updated = state.store.todos.update(existing.id, &input).await?;
    Ok(ApiResponse::success(updated))
}
