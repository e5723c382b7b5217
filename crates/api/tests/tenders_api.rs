//! HTTP-level tests for the `/api/tenders` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_published_tender, create_tender, get, patch_json, post_json,
    put, seed_employee, seed_org_with_user,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_first_version_in_created_status(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;

    let response = post_json(
        build_test_app(pool),
        "/api/tenders/new",
        json!({
            "name": "Bridge",
            "description": "Repair the north bridge",
            "serviceType": "Construction",
            "organizationId": org,
            "creatorUsername": "alice",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Bridge");
    assert_eq!(json["status"], "Created");
    assert_eq!(json["serviceType"], "Construction");
    assert_eq!(json["version"], 1);
    assert!(json["createdAt"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_by_unknown_user_returns_401(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;

    let response = post_json(
        build_test_app(pool),
        "/api/tenders/new",
        json!({
            "name": "Bridge",
            "description": "d",
            "serviceType": "Construction",
            "organizationId": org,
            "creatorUsername": "ghost",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNKNOWN_ACTOR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_foreign_organization_returns_403(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    seed_employee(&pool, "mallory").await;

    let response = post_json(
        build_test_app(pool),
        "/api/tenders/new",
        json!({
            "name": "Bridge",
            "description": "d",
            "serviceType": "Construction",
            "organizationId": org,
            "creatorUsername": "mallory",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_with_invalid_body_returns_400(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;

    let too_long = "x".repeat(101);
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/tenders/new",
        json!({
            "name": too_long,
            "description": "d",
            "serviceType": "Construction",
            "organizationId": org,
            "creatorUsername": "alice",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["reason"].is_string());

    let response = post_json(
        build_test_app(pool),
        "/api/tenders/new",
        json!({
            "name": "Bridge",
            "description": "d",
            "serviceType": "Catering",
            "organizationId": org,
            "creatorUsername": "alice",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_listing_hides_drafts_and_filters_by_type(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    create_published_tender(&pool, org, "alice", "Bravo").await;
    create_published_tender(&pool, org, "alice", "Alpha").await;
    create_tender(&pool, org, "alice", "Draft").await;

    let response = get(build_test_app(pool.clone()), "/api/tenders").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Bravo"]);

    let response = get(
        build_test_app(pool.clone()),
        "/api/tenders?service_type=Delivery,Manufacture",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    let response = get(build_test_app(pool), "/api/tenders?limit=1&offset=1").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Bravo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn published_listing_rejects_bad_parameters(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = get(app, "/api/tenders?limit=-1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(pool.clone()), "/api/tenders?offset=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(build_test_app(pool), "/api/tenders?service_type=Catering").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_tenders_include_drafts_of_the_caller_only(pool: PgPool) {
    let (acme, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    let (globex, _) = seed_org_with_user(&pool, "Globex", "gina").await;
    create_tender(&pool, acme, "alice", "Mine").await;
    create_tender(&pool, globex, "gina", "Theirs").await;

    let response = get(build_test_app(pool.clone()), "/api/tenders/my?username=alice").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["name"], "Mine");
    assert_eq!(json[0]["status"], "Created");

    let response = get(build_test_app(pool), "/api/tenders/my?username=ghost").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_tenders_requires_username(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/tenders/my").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_change_is_visible_without_a_new_version(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    let id = create_tender(&pool, org, "alice", "Bridge").await;

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/status?status=Published&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "Published");
    assert_eq!(json["version"], 1);

    let response = get(
        build_test_app(pool),
        &format!("/api/tenders/{id}/status?username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!("Published"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_errors_map_to_http_codes(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    seed_employee(&pool, "mallory").await;
    let id = create_tender(&pool, org, "alice", "Bridge").await;

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/status?status=Closed&username=mallory"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let missing = Uuid::new_v4();
    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{missing}/status?status=Closed&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/status?status=Canceled&username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(
        build_test_app(pool),
        "/api/tenders/not-a-uuid/status?username=alice",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Edit and rollback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn edit_then_rollback_appends_versions(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    let id = create_tender(&pool, org, "alice", "Bridge").await;

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/edit?username=alice"),
        json!({ "name": "Bridge v2", "serviceType": "Delivery" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 2);
    assert_eq!(json["name"], "Bridge v2");
    assert_eq!(json["serviceType"], "Delivery");
    assert_eq!(json["description"], "Bridge description");

    let response = put(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/rollback/1?username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["version"], 3);
    assert_eq!(json["name"], "Bridge");
    assert_eq!(json["serviceType"], "Construction");

    let response = put(
        build_test_app(pool),
        &format!("/api/tenders/{id}/rollback/9?username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn empty_edit_is_rejected(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    let id = create_tender(&pool, org, "alice", "Bridge").await;

    let response = patch_json(
        build_test_app(pool),
        &format!("/api/tenders/{id}/edit?username=alice"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn edit_that_changes_nothing_is_rejected(pool: PgPool) {
    let (org, _) = seed_org_with_user(&pool, "Acme", "alice").await;
    let id = create_tender(&pool, org, "alice", "Bridge").await;

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/edit?username=alice"),
        json!({ "name": "   " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = patch_json(
        build_test_app(pool.clone()),
        &format!("/api/tenders/{id}/edit?username=alice"),
        json!({ "name": "Bridge", "serviceType": "Construction" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was appended: a rollback target of 2 does not exist.
    let response = put(
        build_test_app(pool),
        &format!("/api/tenders/{id}/rollback/2?username=alice"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
