#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use storefront_api::auth::{issue_token, JwtVerifier};
use storefront_api::config::AppConfig;
use storefront_api::database::{Collection, Document, DocumentStore, Filter, MemoryStore, StoreError};
use storefront_api::{router, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-process application over a fresh memory store
pub struct TestApp {
    pub router: Router,
    pub config: AppConfig,
    pub store: MemoryStore,
}

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.security.jwt_secret = TEST_SECRET.to_string();
    config
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        let verifier = Arc::new(JwtVerifier::new(&config.security));
        let state = AppState::new(config.clone(), Arc::new(store.clone()), verifier);

        Self {
            router: router(state),
            config,
            store,
        }
    }

    pub fn token_for(&self, email: &str) -> String {
        issue_token(&self.config.security, email, email, None).expect("token")
    }

    pub async fn request(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        send(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, None, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Response {
        self.request(Method::PATCH, uri, None, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// Create a product and return its id
    pub async fn create_product(&self, body: Value) -> String {
        let res = self.post("/products", body).await;
        assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.text);
        res.json()["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create a wishlist entry through the open endpoint and return its id
    pub async fn create_wishlist(&self, body: Value) -> String {
        let res = self.post("/wishlists", body).await;
        assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.text);
        res.json()["data"]["id"].as_str().unwrap().to_string()
    }
}

/// Drive one request through a router and buffer the reply
pub async fn send(router: &Router, request: Request<Body>) -> Response {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    Response {
        status,
        text: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// Router over a store whose backend can never be reached
pub fn unreachable_store_router() -> Router {
    let config = test_config();
    let verifier = Arc::new(JwtVerifier::new(&config.security));
    router(AppState::new(config, Arc::new(UnreachableStore), verifier))
}

/// Store whose every operation times out waiting for a connection
pub struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    async fn insert(&self, _: Collection, _: Document) -> Result<Document, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find(&self, _: Collection, _: &Filter) -> Result<Vec<Document>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn find_one(&self, _: Collection, _: &Filter) -> Result<Option<Document>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn replace_one(&self, _: Collection, _: &Filter, _: Document) -> Result<Option<Document>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete_one(&self, _: Collection, _: &Filter) -> Result<Option<Document>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

pub struct Response {
    pub status: StatusCode,
    pub text: String,
}

impl Response {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap_or_else(|e| panic!("invalid JSON ({}): {}", e, self.text))
    }
}

/// The real server binary on the memory store, killed when dropped
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_storefront-api"));
        cmd.env("PORT", port.to_string())
            .env("HOST", "127.0.0.1")
            .env("STORE_BACKEND", "memory")
            .env("JWT_SECRET", TEST_SECRET)
            .env_remove("DATABASE_URL")
            .env_remove("APP_ENV")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn start_server() -> Result<TestServer> {
    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
