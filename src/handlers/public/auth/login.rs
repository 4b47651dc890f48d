// handlers/public/auth/login.rs - POST /login handler

use axum::{body::Bytes, extract::State};
use serde::Deserialize;

use crate::auth::{password::verify_password, TokenUser};
use crate::error::{messages, ApiError};
use crate::handlers::utils::{parse_body, required, required_password};
use crate::middleware::{ApiResponse, ApiResult, TokenBody};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/**
 * POST /login - Authenticate with email and password
 *
 * Unknown email and wrong password are indistinguishable to the client:
 * both answer 401 with the same message.
 *
 * Responses:
 * - 200 `{ "token": "..." }`
 * - 400 email or password missing
 * - 401 invalid credentials
 */
pub async fn login_post(State(state): State<AppState>, body: Bytes) -> ApiResult<TokenBody> {
    let request: LoginRequest = parse_body(&body)?;

    let email = required(request.email)?;
    let password = required_password(request.password)?;

    let user = match state.store.users.find_by_email(&email).await? {
        Some(user) if verify_password(&password, &user.password_hash) => user,
        _ => {
            tracing::warn!("Failed login attempt for {}", email);
            return Err(ApiError::unauthorized(messages::INVALID_CREDENTIALS));
        }
    };

    let token = state.tokens.issue(TokenUser::from(&user))?;
    tracing::debug!("User {} logged in", user.id);

    Ok(ApiResponse::success(TokenBody { token }))
}
