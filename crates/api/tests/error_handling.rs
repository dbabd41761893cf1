//! Cross-cutting error behaviour: auth, rate limiting, and error body shape.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    anon_request, body_json, build_test_app, build_test_app_with_config, create_project, get,
    test_config,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_token_is_401(pool: PgPool) {
    let app = build_test_app(pool);
    let response = anon_request(app, Method::GET, "/api/v1/projects", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_token_is_401(pool: PgPool) {
    let app = build_test_app(pool);
    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/api/v1/projects")
        .header("authorization", "Bearer not-a-real-token")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Not found / error body shape
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_project_is_404_with_code(pool: PgPool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/projects/99999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("Project"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_validation_error_body_shape(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let project = create_project(&app, "P").await;

    let response = common::post_json(
        app,
        &format!("/api/v1/projects/{project}/tasks"),
        json!({ "title": "T", "priority": "urgent" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("priority"));
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rate_limit_caps_mutations(pool: PgPool) {
    let mut config = test_config();
    config.rate_limit_per_window = 2;
    let app = build_test_app_with_config(pool, config);

    // Two writes fit the budget, the third does not.
    for expected in [StatusCode::CREATED, StatusCode::CREATED, StatusCode::TOO_MANY_REQUESTS] {
        let response = common::post_json(
            app.clone(),
            "/api/v1/projects",
            json!({ "name": "Burst" }),
        )
        .await;
        assert_eq!(response.status(), expected);
    }

    // Reads are not counted against the budget.
    let response = get(app, "/api/v1/projects").await;
    assert_eq!(response.status(), StatusCode::OK);
}
