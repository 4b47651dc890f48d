// handlers/protected/user/mod.rs - Endpoints scoped to the caller's own account
//
// No id appears in these paths: the account is always the one named by the
// bearer token, so there is nothing to check ownership against.

use axum::extract::{Extension, State};

use crate::auth::policy::require_found;
use crate::database::models::{PublicUser, Todo};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

/// GET /user - the caller's account, password hash stripped
pub async fn me_get(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<PublicUser> {
    // A valid token can outlive its account
    let user = require_found(state.store.users.find_by_id(caller.id).await?)?;
    Ok(ApiResponse::success(PublicUser::from(user)))
}

/// GET /user/todos - the caller's todos, earliest due first
pub async fn my_todos_get(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Vec<Todo>> {
    let todos = state.store.todos.list_by_owner(caller.id).await?;
    Ok(ApiResponse::success(todos))
}
