#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use todo_api::config::AppConfig;
use todo_api::database::Store;
use todo_api::{app, AppState};

/// An API server on its own port, backed by a fresh in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut config = AppConfig::development();
        config.api.port = port;
        config.api.enable_request_logging = false;
        config.security.jwt_secret = "integration-test-secret".to_string();
        let state = AppState::new(config, Store::memory());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind port {}", port))?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(format!("{}/health", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.get(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> Result<Response> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> Result<Response> {
        let mut req = self.client.put(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let mut req = self.client.delete(self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    /// Register an account and return its token
    pub async fn register(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .post(
                "/register",
                None,
                &json!({
                    "email": email,
                    "password": password,
                    "name": "Doe",
                    "firstname": "Jane"
                }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "register returned {}", res.status());
        let body: Value = res.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("register response has no token")
    }

    /// Register an account and return (token, id)
    pub async fn account(&self, email: &str) -> Result<(String, i64)> {
        let token = self.register(email, "pa55word").await?;
        let me: Value = self.get("/user", Some(&token)).await?.json().await?;
        let id = me["id"].as_i64().context("GET /user has no id")?;
        Ok((token, id))
    }

    /// Create a todo for `user_id` and return its JSON
    pub async fn create_todo(&self, token: &str, user_id: i64, title: &str, due_time: &str) -> Result<Value> {
        let res = self
            .post(
                "/todos",
                Some(token),
                &json!({
                    "title": title,
                    "description": format!("{} details", title),
                    "due_time": due_time,
                    "user_id": user_id
                }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create todo returned {}", res.status());
        Ok(res.json().await?)
    }
}

/// A full replacement body for PUT /todos/:id
pub fn todo_body(title: &str, user_id: i64, status: &str) -> Value {
    json!({
        "title": title,
        "description": "updated",
        "due_time": "2030-01-01 09:00:00",
        "user_id": user_id,
        "status": status
    })
}
