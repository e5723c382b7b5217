//! HTTP-level tests for the `/api/bids` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_published_tender, create_tender, get, patch_json, post_json,
    put, seed_employee, seed_org_with_user,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Acme (alice) publishes "Bridge"; bob places bids as a user.
struct Market {
    tender_id: String,
    bob: Uuid,
}

async fn market(pool: &PgPool) -> Market {
    let (acme, _) = seed_org_with_user(pool, "Acme", "alice").await;
    let tender_id = create_published_tender(pool, acme, "alice", "Bridge").await;
    let bob = seed_employee(pool, "bob").await.id;
    Market { tender_id, bob }
}

async fn create_bid(pool: &PgPool, market: &Market, name: &str) -> String {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/bids/new",
        json!({
            "name": name,
            "description": "We can do it",
            "tenderId": market.tender_id,
            "authorType": "User",
            "authorId": market.bob,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

async fn publish_bid(pool: &PgPool, id: &str) {
    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/bids/{id}/status?status=Published&username=bob"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_first_version(pool: PgPool) {
    let m = market(&pool).await;

    let response = post_json(
        build_test_app(pool),
        "/api/bids/new",
        json!({
            "name": "Offer",
            "description": "We can do it",
            "tenderId": m.tender_id,
            "authorType": "User",
            "authorId": m.bob,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Offer");
    assert_eq!(json["status"], "Created");
    assert_eq!(json["authorType"], "User");
    assert_eq!(json["authorId"], m.bob.to_string());
    assert_eq!(json["version"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_against_draft_tender_returns_404(pool: PgPool) {
    let (acme, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    let draft = create_tender(&pool, acme, "alice", "Draft").await;
    let bob = seed_employee(&pool, "bob").await.id;

    let response = post_json(
        build_test_app(pool),
        "/api/bids/new",
        json!({
            "name": "Offer",
            "description": "d",
            "tenderId": draft,
            "authorType": "User",
            "authorId": bob,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_unknown_author_returns_401(pool: PgPool) {
    let m = market(&pool).await;

    let response = post_json(
        build_test_app(pool),
        "/api/bids/new",
        json!({
            "name": "Offer",
            "description": "d",
            "tenderId": m.tender_id,
            "authorType": "User",
            "authorId": Uuid::new_v4(),
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn organization_author_without_organization_returns_403(pool: PgPool) {
    let m = market(&pool).await;

    let response = post_json(
        build_test_app(pool),
        "/api/bids/new",
        json!({
            "name": "Offer",
            "description": "d",
            "tenderId": m.tender_id,
            "authorType": "Organization",
            "authorId": m.bob,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Decisions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn approval_closes_the_tender(pool: PgPool) {
    let m = market(&pool).await;
    let bid = create_bid(&pool, &m, "Offer").await;
    publish_bid(&pool, &bid).await;

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/submit_decision?decision=Approved&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "Published");
    assert_eq!(json["version"], 1);

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{}/status?username=alice", m.tender_id),
    )
    .await;
    assert_eq!(body_json(response).await, json!("Closed"));

    // A closed tender no longer accepts decisions.
    let response = put(
        build_test_app(pool),
        &format!("/api/bids/{bid}/submit_decision?decision=Rejected&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decision_errors_map_to_http_codes(pool: PgPool) {
    let m = market(&pool).await;
    let bid = create_bid(&pool, &m, "Offer").await;

    // Not yet published.
    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/submit_decision?decision=Approved&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    publish_bid(&pool, &bid).await;

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/submit_decision?decision=Approved&username=bob"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/submit_decision?decision=Maybe&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put(
        build_test_app(pool),
        &format!("/api/bids/{bid}/submit_decision?decision=Approved&username=ghost"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Status, edit, rollback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_is_private_to_the_author(pool: PgPool) {
    let m = market(&pool).await;
    let bid = create_bid(&pool, &m, "Offer").await;

    let response = get(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/status?username=bob"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!("Created"));

    let response = get(
        build_test_app(pool),
        &format!("/api/bids/{bid}/status?username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn edit_then_rollback_appends_versions(pool: PgPool) {
    let m = market(&pool).await;
    let bid = create_bid(&pool, &m, "Offer").await;

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/edit?username=bob"),
        json!({ "name": "Better offer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["name"], "Better offer");

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/bids/{bid}/rollback/1?username=bob"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 3);
    assert_eq!(json["name"], "Offer");

    let response = put(
        build_test_app(pool),
        &format!("/api/bids/{bid}/rollback/0?username=bob"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_bid_returns_404(pool: PgPool) {
    market(&pool).await;
    let missing = Uuid::new_v4();

    let response = put(
        build_test_app(pool),
        &format!("/api/bids/{missing}/status?status=Canceled&username=bob"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
