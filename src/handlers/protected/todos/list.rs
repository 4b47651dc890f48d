use axum::extract::State;

use crate::database::models::Todo;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /todos - every todo in the system, earliest due first
pub async fn todos_get(State(state): State<AppState>) -> ApiResult<Vec<Todo>> {
    let todos = state.store.todos.list_all().await?;
    Ok(ApiResponse::success(todos))
}
