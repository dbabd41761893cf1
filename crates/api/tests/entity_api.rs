//! HTTP-level CRUD coverage for the dashboard resources.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_project, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_task_crud_over_http(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Tasks").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/tasks"),
        json!({ "title": "Book venue", "priority": "high", "due_date": "2025-07-15" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let task = body_json(response).await["data"].clone();
    assert_eq!(task["status"], "todo");
    let task_id = task["id"].as_i64().unwrap();

    let response = patch_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/tasks/{task_id}"),
        json!({ "status": "done" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "done");

    let response = delete(
        app.clone(),
        &format!("/api/v1/projects/{project}/tasks/{task_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(
        app,
        &format!("/api/v1/projects/{project}/tasks/{task_id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bulk_task_create(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Bulk").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/tasks/bulk"),
        json!({ "tasks": [
            { "title": "A" },
            { "title": "B" },
            { "title": "C" }
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);

    // One invalid entry rejects the whole batch.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/tasks/bulk"),
        json!({ "tasks": [
            { "title": "D" },
            { "title": "E", "status": "someday" }
        ]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, &format!("/api/v1/projects/{project}/tasks")).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_guest_validation_over_http(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Guests").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/guests"),
        json!({ "first_name": "Ada", "side": "partner_c" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project}/guests"),
        json!({ "first_name": "Ada", "side": "partner_a", "rsvp_status": "attending" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Vendors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vendor_category_is_closed_set(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Vendors").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/vendors"),
        json!({ "name": "Sparkle Co", "category": "fireworks" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app,
        &format!("/api/v1/projects/{project}/vendors"),
        json!({ "name": "Bloom Co", "category": "florist" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["status"], "researching");
}

// ---------------------------------------------------------------------------
// Budget items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_budget_item_category_and_percent(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Budget").await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/budget-items"),
        json!({ "category": "venue", "percent": 145.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/budget-items"),
        json!({ "category": "venue", "percent": 45.0, "estimated_cost": 22500.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, &format!("/api/v1/projects/{project}/budget-items")).await;
    let items = body_json(response).await["data"].as_array().unwrap().clone();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["estimated_cost"], 22500.0);
}

// ---------------------------------------------------------------------------
// Prefs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_prefs_upsert_merges_by_column(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Prefs").await;

    // No row yet.
    let response = get(app.clone(), &format!("/api/v1/projects/{project}/prefs")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/prefs"),
        json!({ "vendor_filters": { "categories": ["florist"], "radius_miles": 25 } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // A later write to another column leaves the first intact.
    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/prefs"),
        json!({ "guest_prefs": { "allow_children": false } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("/api/v1/projects/{project}/prefs")).await;
    let prefs = body_json(response).await["data"].clone();
    assert_eq!(prefs["vendor_filters"]["radius_miles"], 25);
    assert_eq!(prefs["guest_prefs"]["allow_children"], false);
}
