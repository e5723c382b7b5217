#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use tenderflow_api::config::ServerConfig;
use tenderflow_api::router::build_app_router;
use tenderflow_api::state::AppState;
use tenderflow_db::models::employee::{CreateEmployee, EmployeeRow};
use tenderflow_db::models::organization::CreateOrganization;
use tenderflow_db::repositories::{EmployeeRepo, OrganizationRepo};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        max_pool_size: 5,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_name: "tenderflow-test".to_string(),
        app_version: "0.0.0-test".to_string(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn put(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::PUT, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_employee(pool: &PgPool, username: &str) -> EmployeeRow {
    EmployeeRepo::create(
        pool,
        &CreateEmployee {
            username: username.to_string(),
            first_name: Some("Test".into()),
            last_name: None,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_organization(pool: &PgPool, name: &str) -> Uuid {
    OrganizationRepo::create(
        pool,
        &CreateOrganization {
            name: name.to_string(),
            description: None,
            organization_type: None,
        },
    )
    .await
    .unwrap()
    .id
}

/// An organization with one responsible employee.
pub async fn seed_org_with_user(pool: &PgPool, org: &str, username: &str) -> (Uuid, EmployeeRow) {
    let org_id = seed_organization(pool, org).await;
    let user = seed_employee(pool, username).await;
    OrganizationRepo::add_responsible(pool, org_id, user.id)
        .await
        .unwrap();
    (org_id, user)
}

/// Create a tender through the API and return its id.
pub async fn create_tender(pool: &PgPool, org: Uuid, username: &str, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/tenders/new",
        serde_json::json!({
            "name": name,
            "description": format!("{name} description"),
            "serviceType": "Construction",
            "organizationId": org,
            "creatorUsername": username,
        }),
    )
    .await;
    assert_eq!(response.status(), 200);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

/// Create a tender and publish it.
pub async fn create_published_tender(pool: &PgPool, org: Uuid, username: &str, name: &str) -> String {
    let id = create_tender(pool, org, username, name).await;
    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/status?status=Published&username={username}"),
    )
    .await;
    assert_eq!(response.status(), 200);
    id
}
