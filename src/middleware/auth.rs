use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Claims;
use crate::error::{messages, ApiError};
use crate::AppState;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub firstname: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user.id,
            email: claims.user.email,
            name: claims.user.name,
            firstname: claims.user.firstname,
        }
    }
}

/// Why a request carried no usable credential
#[derive(Debug, PartialEq)]
enum TokenRejection {
    Missing,
    WrongScheme,
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(|rejection| {
        tracing::debug!("Rejected {} {}: {:?}", request.method(), request.uri().path(), rejection);
        match rejection {
            TokenRejection::Missing => ApiError::unauthorized(messages::MISSING_TOKEN),
            TokenRejection::WrongScheme => ApiError::unauthorized(messages::INVALID_TOKEN),
        }
    })?;

    let claims = state.tokens.verify(token).map_err(|e| {
        tracing::debug!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        ApiError::unauthorized(messages::INVALID_TOKEN)
    })?;

    // Convert claims to AuthUser and inject into request
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, TokenRejection> {
    let auth_str = headers
        .get(header::AUTHORIZATION)
        .ok_or(TokenRejection::Missing)?
        .to_str()
        .map_err(|_| TokenRejection::WrongScheme)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if token.trim().is_empty() => Err(TokenRejection::Missing),
        Some(token) => Ok(token.trim()),
        None if auth_str.trim().is_empty() => Err(TokenRejection::Missing),
        None => Err(TokenRejection::WrongScheme),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenUser;
    use crate::testing;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    async fn whoami(Extension(user): Extension<AuthUser>) -> String {
        user.id.to_string()
    }

    fn guarded(state: AppState) -> Router {
        Router::new()
            .route("/guarded", get(whoami))
            .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
            .with_state(state)
    }

    async fn call(state: AppState, auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri("/guarded");
        if let Some(value) = auth {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let response = guarded(state)
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn user(id: i64) -> TokenUser {
        TokenUser {
            id,
            email: "a@b.com".to_string(),
            name: "B".to_string(),
            firstname: "A".to_string(),
        }
    }

    #[test]
    fn header_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_jwt_from_headers(&headers), Err(TokenRejection::Missing));

        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        assert_eq!(extract_jwt_from_headers(&headers), Ok("abc"));

        headers.insert(header::AUTHORIZATION, "Bearer   ".parse().unwrap());
        assert_eq!(extract_jwt_from_headers(&headers), Err(TokenRejection::Missing));

        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(extract_jwt_from_headers(&headers), Err(TokenRejection::WrongScheme));
    }

    #[tokio::test]
    async fn valid_token_attaches_identity() {
        let state = testing::memory_state();
        let token = state.tokens.issue(user(42)).unwrap();

        let (status, body) = call(state, Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "42");
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let (status, body) = call(testing::memory_state(), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(messages::MISSING_TOKEN));
    }

    #[tokio::test]
    async fn forged_token_is_unauthorized() {
        let forger = crate::auth::TokenService::new("not-the-server-secret", 5);
        let token = forger.issue(user(42)).unwrap();

        let (status, body) = call(testing::memory_state(), Some(&format!("Bearer {}", token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains(messages::INVALID_TOKEN));
    }
}
