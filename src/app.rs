use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::Environment;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::AppState;

/// Full HTTP surface: service endpoints at the root, the REST API under the
/// configured base path, and optionally the dashboard's static files.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(state.clone()))
        // Unknown API paths stay JSON even when static files are served
        .fallback(not_found);

    let mut router = Router::new()
        .route("/health", get(health))
        .nest(&config.api.base_path, api);

    router = match &config.api.frontend_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(root)).fallback(not_found),
    };

    let mut router = router
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(config.environment, &config.security.cors_origins));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(public::register_post))
        .route("/login", post(public::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // The caller's own account
        .route("/user", get(protected::me_get))
        .route("/user/todos", get(protected::my_todos_get))
        // Account lookup and self-service
        .route(
            "/users/:id",
            get(protected::user_get)
                .put(protected::user_put)
                .delete(protected::user_delete),
        )
        // Todos
        .route("/todos", get(protected::todos_get).post(protected::todo_post))
        .route(
            "/todos/:id",
            get(protected::todo_get)
                .put(protected::todo_put)
                .delete(protected::todo_delete),
        )
        // Only matched routes are authenticated; unknown paths fall through to 404
        .route_layer(from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(environment: Environment, origins: &[String]) -> CorsLayer {
    if environment == Environment::Development {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let base = &state.config.api.base_path;

    Json(json!({
        "name": "Todo API",
        "version": version,
        "description": "Personal task tracking REST API",
        "endpoints": {
            "health": "/health (public)",
            "auth": format!("POST {base}/register, POST {base}/login (public - token acquisition)"),
            "user": format!("{base}/user, {base}/user/todos (protected)"),
            "users": format!("{base}/users/:idOrEmail (protected, writes self-only)"),
            "todos": format!("{base}/todos[/:id] (protected, writes owner-only)"),
        }
    }))
}

async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiError::service_unavailable("database unavailable").into_response()
        }
    }
}
