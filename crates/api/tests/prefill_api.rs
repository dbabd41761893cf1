//! HTTP-level integration tests for the prefill endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_project, get, post_empty, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn fill_intake(app: &axum::Router, project: i64) {
    for (step, payload) in [
        (
            2,
            json!({
                "partner_first_names": ["Ada", "Grace"],
                "wedding_date": "2025-06-15",
                "city": "Portland",
                "guest_count_estimate": 120
            }),
        ),
        (
            3,
            json!({
                "total_budget": 50000.0,
                "categories": [
                    { "name": "venue", "percent": 45.0 },
                    { "name": "catering", "percent": 30.0, "hard_cap": 12000.0 },
                    { "name": "photography", "percent": 25.0 }
                ]
            }),
        ),
        (5, json!({ "required_vendors": ["photographer", "florist"] })),
        (6, json!({ "rsvp_preference": "email" })),
    ] {
        let response = put_json(
            app.clone(),
            &format!("/api/v1/projects/{project}/intake/steps/{step}"),
            json!({ "payload": payload }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_returns_mapped_bundle(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Untitled").await;
    fill_intake(&app, project).await;

    let response = get(app.clone(), &format!("/api/v1/projects/{project}/prefill")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    let bundle = &data["bundle"];

    // Title derived from partner names (no working title given).
    assert_eq!(bundle["project_meta"]["title"], "Ada & Grace's Wedding");
    assert_eq!(bundle["project_meta"]["wedding_date"], "2025-06-15");

    // Hard cap wins over percent share; percent share otherwise.
    let categories = bundle["budget_plan"]["categories"].as_array().unwrap();
    assert_eq!(categories[0]["estimated_cost"], 22500.0);
    assert_eq!(categories[1]["estimated_cost"], 12000.0);

    // Photographer task at ten months out.
    let timeline = bundle["timeline"].as_array().unwrap();
    let photo = timeline
        .iter()
        .find(|t| t["title"] == "Book photographer")
        .unwrap();
    assert_eq!(photo["due_date"], "2024-08-15");

    // Preview writes nothing.
    let response = get(app, &format!("/api/v1/projects/{project}/budget-items")).await;
    let items = body_json(response).await["data"].as_array().unwrap().len();
    assert_eq!(items, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_preview_without_intake_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Empty").await;

    let response = get(app, &format!("/api/v1/projects/{project}/prefill")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_seeds_everything(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Untitled").await;
    fill_intake(&app, project).await;

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/projects/{project}/prefill/apply"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["budget_items"], 3);
    assert_eq!(data["prefs_updated"], true);

    // Project metadata was patched.
    let response = get(app.clone(), &format!("/api/v1/projects/{project}")).await;
    let project_row = body_json(response).await["data"].clone();
    assert_eq!(project_row["name"], "Ada & Grace's Wedding");
    assert_eq!(project_row["location"], "Portland");
    assert_eq!(project_row["guest_count"], 120);

    // Tasks landed, core tasks included.
    let response = get(app.clone(), &format!("/api/v1/projects/{project}/tasks")).await;
    let tasks = body_json(response).await["data"].as_array().unwrap().clone();
    assert!(tasks.iter().any(|t| t["title"] == "Set your budget"));
    assert!(tasks.iter().any(|t| t["title"] == "Book florist"));

    // Prefs landed.
    let response = get(app, &format!("/api/v1/projects/{project}/prefs")).await;
    let prefs = body_json(response).await["data"].clone();
    assert_eq!(prefs["vendor_filters"]["radius_miles"], 50);
    assert_eq!(prefs["site_content"]["rsvp_preference"], "email");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_without_intake_is_404_and_writes_nothing(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Untouched").await;

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/projects/{project}/prefill/apply"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/projects/{project}")).await;
    assert_eq!(body_json(response).await["data"]["name"], "Untouched");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dateless_intake_applies_with_empty_timeline(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "No Date").await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/steps/2"),
        json!({ "payload": { "partner_first_names": ["Ada", "Grace"], "city": "Portland" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/projects/{project}/prefill/apply"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["tasks"], 0);

    // No silent "today": the project keeps a null wedding date.
    let response = get(app, &format!("/api/v1/projects/{project}")).await;
    assert!(body_json(response).await["data"]["wedding_date"].is_null());
}
