use crate::auth::TokenUser;
use crate::config::AppConfig;
use crate::database::Store;
use crate::AppState;

/// Development config with a test secret against a fresh in-memory store,
/// request logging off
pub fn memory_state() -> AppState {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    config.security.jwt_secret = "unit-test-secret".to_string();
    AppState::new(config, Store::memory())
}

/// Bearer header value for an arbitrary identity signed by `state`
pub fn bearer_for(state: &AppState, id: i64, email: &str) -> String {
    let token = state
        .tokens
        .issue(TokenUser {
            id,
            email: email.to_string(),
            name: "Tester".to_string(),
            firstname: "Test".to_string(),
        })
        .expect("token signing");
    format!("Bearer {}", token)
}
