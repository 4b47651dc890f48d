use axum::{
    body::Bytes,
    extract::{Extension, Path, State},
};
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::auth::policy::{ensure_self, require_found};
use crate::database::models::{PublicUser, UserInput};
use crate::handlers::utils::{parse_body, required_password, required_short};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub firstname: Option<String>,
}

/// PUT /users/:id - replace the caller's own account
///
/// Checks run as: self-only (403), account exists (404), every field present
/// (400). The password is re-hashed on every update. Taking an email that
/// belongs to another account answers 409.
pub async fn user_put(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<PublicUser> {
    let user_id = ensure_self(&caller, &id)?;
    require_found(state.store.users.find_by_id(user_id).await?)?;

    let request: UpdateUserRequest = parse_body(&body)?;
    let email = required_short(request.email)?;
    let password = required_password(request.password)?;
    let name = required_short(request.name)?;
    let firstname = required_short(request.firstname)?;

    let input = UserInput {
        email,
        password_hash: hash_password(&password)?,
        name,
        firstname,
    };

    let updated = state.store.users.update(user_id, &input).await?;
    tracing::info!("User {} updated their account", user_id);

    Ok(ApiResponse::success(PublicUser::from(updated)))
}
