/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An in-memory store behind the real router
/// - Configuration without touching the process environment
/// - Request helpers and user registration

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use taskbook_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskbook_shared::store::memory::MemoryStore;
use tower::ServiceExt;

/// Signing secret used by every test context
pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Test context containing all necessary resources
#[allow(dead_code)]
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub app: Router,
    pub config: Config,
}

/// A registered user and their token
#[allow(dead_code)]
pub struct TestUser {
    pub id: i64,
    pub email: String,
    pub token: String,
}

/// Status and parsed JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestContext {
    /// Creates a context with an empty store
    pub fn new() -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgresql://unused/taskbook".to_string()),
            "JWT_SECRET" => Some(TEST_SECRET.to_string()),
            _ => None,
        })
        .expect("test configuration should be valid");

        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), config.clone());

        TestContext {
            store,
            app: build_router(state),
            config,
        }
    }

    /// Sends a request and parses the body as JSON (`Null` when empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let body = body.map(|b| b.to_string());
        self.send_raw(method, uri, token, body).await
    }

    /// Sends a request with a raw string body
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body)),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!(
                    "Expected JSON body, got {}: {}",
                    status,
                    String::from_utf8_lossy(&bytes)
                )
            })
        };

        TestResponse { status, body }
    }

    /// Registers a user and returns their id and token
    pub async fn register(&self, name: &str, email: &str, password: &str) -> TestUser {
        let response = self
            .request(
                Method::POST,
                "/register",
                None,
                Some(serde_json::json!({
                    "name": name,
                    "email": email,
                    "password": password,
                })),
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "registration failed: {}",
            response.body
        );

        TestUser {
            id: response.body["id"].as_i64().unwrap(),
            email: response.body["email"].as_str().unwrap().to_string(),
            token: response.body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Creates a task for `token` and returns its id
    pub async fn create_task(&self, token: &str, title: &str, description: &str) -> i64 {
        let response = self
            .request(
                Method::POST,
                "/tasks",
                Some(token),
                Some(serde_json::json!({
                    "title": title,
                    "description": description,
                })),
            )
            .await;

        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["id"].as_i64().unwrap()
    }
}
