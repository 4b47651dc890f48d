use axum::extract::{Extension, Path, State};

use crate::auth::policy::authorize_todo_mutation;
use crate::handlers::utils::parse_record_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message};
use crate::AppState;

/// DELETE /todos/:id - delete a todo owned by the caller
///
/// Deleting the same id twice answers 404 the second time.
pub async fn todo_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    let existing = match parse_record_id(&id) {
        Some(id) => state.store.todos.find_by_id(id).await?,
        None => None,
    };
    let existing = authorize_todo_mutation(&caller, existing)?;

    state.store.todos.delete(existing.id).await?;
    tracing::debug!("User {} deleted todo {}", caller.id, existing.id);

    Ok(ApiResponse::success(Message::deleted(existing.id)))
}
