use axum::extract::{Path, State};

use crate::auth::policy::require_found;
use crate::database::models::PublicUser;
use crate::handlers::utils::parse_record_id;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /users/:idOrEmail - public profile lookup by numeric id or by email
///
/// Any authenticated caller may look up any account. A parameter containing
/// `@` is treated as an email; anything else must be a numeric id.
pub async fn user_get(
    State(state): State<AppState>,
    Path(id_or_email): Path<String>,
) -> ApiResult<PublicUser> {
    let user = if id_or_email.contains('@') {
        state.store.users.find_by_email(&id_or_email).await?
    } else {
        match parse_record_id(&id_or_email) {
            Some(id) => state.store.users.find_by_id(id).await?,
            None => None,
        }
    };

    let user = require_found(user)?;
    Ok(ApiResponse::success(PublicUser::from(user)))
}
