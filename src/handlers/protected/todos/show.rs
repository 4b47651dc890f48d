use axum::extract::{Path, State};

use crate::auth::policy::require_found;
use crate::database::models::Todo;
use crate::handlers::utils::parse_record_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /todos/:id - fetch a single todo
///
/// Not owner-scoped: any authenticated caller can read any todo by id, unlike
/// GET /user/todos which only ever returns the caller's own.
pub async fn todo_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Todo> {
    let todo = match parse_record_id(&id) {
        Some(id) => state.store.todos.find_by_id(id).await?,
        None => None,
    };

    Ok(ApiResponse::success(require_found(todo)?))
}
