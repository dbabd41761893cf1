//! HTTP-level integration tests for the intake wizard endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, create_project, get, post_empty, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Step saves (draft path)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_step_save_creates_draft(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/steps/2"),
        json!({ "payload": { "city": "Portland" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["is_submitted"], false);
    assert_eq!(data["data"]["step2"]["city"], "Portland");
    // One of seven steps touched.
    assert_eq!(data["completion"], 14);
    assert_eq!(data["is_complete"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_draft_is_accepted(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;

    // An empty step payload is a valid draft.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/steps/3"),
        json!({ "payload": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_step_payload_is_400_with_issues(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/steps/3"),
        json!({ "payload": { "categories": [
            { "name": "venue", "percent": 40.0 },
            { "name": "catering", "percent": 44.0 }
        ]}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let issues = json["issues"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["path"] == "categories"));

    // A failed save leaves no record behind.
    let response = get(app, &format!("/api/v1/projects/{project}/intake")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_step_number_out_of_range(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;

    let response = put_json(
        app,
        &format!("/api/v1/projects/{project}/intake/steps/8"),
        json!({ "payload": {} }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Submission (complete path)
// ---------------------------------------------------------------------------

async fn fill_minimal_valid_intake(app: &axum::Router, project: i64) {
    for (step, payload) in [
        (
            2,
            json!({
                "partner_first_names": ["Ada", "Grace"],
                "working_title": "Ada & Grace's Wedding",
                "wedding_date": "2025-06-15",
                "city": "Portland"
            }),
        ),
        (3, json!({ "total_budget": 40000.0 })),
        (7, json!({ "consent": true })),
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

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_happy_path(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;
    fill_minimal_valid_intake(&app, project).await;

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/submit"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["is_submitted"], true);
    assert!(data["submitted_at"].is_string());
    assert_eq!(data["is_complete"], true);

    // Steps are frozen after submission.
    let response = put_json(
        app,
        &format!("/api/v1/projects/{project}/intake/steps/2"),
        json!({ "payload": { "city": "Salem" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_without_consent_names_the_field(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;
    fill_minimal_valid_intake(&app, project).await;

    let response = put_json(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/steps/7"),
        json!({ "payload": { "consent": false } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_empty(
        app.clone(),
        &format!("/api/v1/projects/{project}/intake/submit"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let issues = json["issues"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["path"] == "step7.consent"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submit_without_record_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;

    let response = post_empty(app, &format!("/api/v1/projects/{project}/intake/submit")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Completion signals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_tracks_touched_steps(pool: PgPool) {
    let app = build_test_app(pool);
    let project = create_project(&app, "Wizard").await;
    fill_minimal_valid_intake(&app, project).await;

    let response = get(app, &format!("/api/v1/projects/{project}/intake")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    // Three of seven steps touched.
    assert_eq!(data["completion"], 43);
    assert_eq!(data["is_complete"], true);
}
