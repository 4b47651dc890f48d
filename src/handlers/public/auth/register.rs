// handlers/public/auth/register.rs - POST /register handler

use axum::{body::Bytes, extract::State};
use serde::Deserialize;

use crate::auth::{password::hash_password, TokenUser};
use crate::database::models::UserInput;
use crate::error::{messages, ApiError};
use crate::handlers::utils::{parse_body, required_password, required_short};
use crate::middleware::{ApiResponse, ApiResult, TokenBody};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub firstname: Option<String>,
}

/**
 * POST /register - Create an account and receive a JWT token
 *
 * Expected Input:
 * ```json
 * { "email": "a@b.com", "password": "secret", "name": "B", "firstname": "A" }
 * ```
 *
 * Responses:
 * - 201 `{ "token": "..." }`
 * - 400 any field missing or blank (password: empty), or longer than 255 characters
 * - 409 email already registered
 */
pub async fn register_post(State(state): State<AppState>, body: Bytes) -> ApiResult<TokenBody> {
    let request: RegisterRequest = parse_body(&body)?;

    let email = required_short(request.email)?;
    let password = required_password(request.password)?;
    let name = required_short(request.name)?;
    let firstname = required_short(request.firstname)?;

    if state.store.users.find_by_email(&email).await?.is_some() {
        return Err(ApiError::conflict(messages::ACCOUNT_EXISTS));
    }

    let input = UserInput {
        email,
        password_hash: hash_password(&password)?,
        name,
        firstname,
    };

    // A concurrent registration can still win the race; the unique
    // constraint reports it as AlreadyExists, which maps to 409 as well.
    let user = state.store.users.create(&input).await?;
    tracing::info!("Registered user {} ({})", user.id, user.email);

    let token = state.tokens.issue(TokenUser::from(&user))?;
    Ok(ApiResponse::created(TokenBody { token }))
}
