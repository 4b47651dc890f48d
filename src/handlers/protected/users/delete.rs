use axum::extract::{Extension, Path, State};

use crate::auth::policy::{ensure_self, require_found};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, Message};
use crate::AppState;

/// DELETE /users/:id - delete the caller's own account and all of its todos
///
/// Tokens already issued for the account stay cryptographically valid until
/// they expire, but every lookup through them now answers 404.
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    let user_id = ensure_self(&caller, &id)?;
    require_found(state.store.users.find_by_id(user_id).await?)?;

    state.store.users.delete(user_id).await?;
    tracing::info!("User {} deleted their account", user_id);

    Ok(ApiResponse::success(Message::deleted(user_id)))
}
