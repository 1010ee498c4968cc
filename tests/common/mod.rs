//! Shared setup for HTTP-level tests: in-memory database, seeded accounts and
//! a router driven in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use sea_orm::DatabaseConnection;
use serde_json::Value;
use tower::ServiceExt;

use auth_control::config::CorsConfig;
use auth_control::domain::{Account, AccountRepositoryInterface, NewAccount};
use auth_control::infrastructure::crypto::{hash_password_with_cost, JwtConfig, MIN_HASH_COST};
use auth_control::infrastructure::database::seeds::{run_seeds, seed_dictionaries};
use auth_control::infrastructure::database::{create_schema, AccountRepository};
use auth_control::{create_api_router, init_database, ApiState, DatabaseConfig};

pub fn jwt() -> JwtConfig {
    JwtConfig::new("integration-test-secret", "HS256", "60")
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub repo: Arc<AccountRepository>,
}

pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

async fn empty_database() -> DatabaseConnection {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    create_schema(&db).await.unwrap();
    db
}

fn build(db: DatabaseConnection) -> TestApp {
    let repo = Arc::new(AccountRepository::new(db.clone()));
    let router = create_api_router(ApiState::new(repo.clone(), jwt()), &CorsConfig::default());
    TestApp { router, db, repo }
}

/// Dictionaries plus the four demo accounts (user, admin, superadmin, inactive)
pub async fn spawn_app() -> TestApp {
    let db = empty_database().await;
    run_seeds(&db, true, MIN_HASH_COST).await.unwrap();
    build(db)
}

/// Dictionaries only
pub async fn spawn_bare_app() -> TestApp {
    let db = empty_database().await;
    seed_dictionaries(&db).await.unwrap();
    build(db)
}

impl TestApp {
    pub async fn create_account(
        &self,
        email: &str,
        password: &str,
        role: &str,
        language: &str,
        is_active: bool,
    ) -> Account {
        self.repo
            .create_account(NewAccount {
                name: email.split('@').next().unwrap().to_string(),
                email: email.to_string(),
                password_hash: hash_password_with_cost(password, MIN_HASH_COST).unwrap(),
                role_name: role.to_string(),
                language_code: language.to_string(),
                is_active,
            })
            .await
            .unwrap()
    }

    pub async fn account(&self, email: &str) -> Account {
        self.repo.find_by_email(email).await.unwrap().unwrap()
    }

    /// Token signed with the app's settings, valid for an hour
    pub async fn token_for(&self, email: &str) -> String {
        let id = self.account(email).await.id;
        jwt().codec().unwrap().issue(id, None).unwrap()
    }

    pub fn token_for_id(&self, id: i32, ttl: Option<Duration>) -> String {
        jwt().codec().unwrap().issue(id, ttl).unwrap()
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Response {
            status,
            headers,
            body,
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.request(
            Method::POST,
            "/login",
            None,
            Some(serde_json::json!({"email": email, "password": password})),
        )
        .await
    }
}
