//! Integration tests for transactional prefill application.
//!
//! The apply path must be all-or-nothing: a failure anywhere in the bundle
//! leaves no partial rows behind.

use sqlx::PgPool;

use planhaus_core::intake::record::IntakeRecord;
use planhaus_core::prefill;
use planhaus_db::models::project::CreateProject;
use planhaus_db::repositories::{
    BudgetItemRepo, PrefillRepo, ProjectPrefsRepo, ProjectRepo, TaskRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_record() -> IntakeRecord {
    serde_json::from_value(serde_json::json!({
        "step2": {
            "partner_first_names": ["Ada", "Grace"],
            "working_title": "Ada & Grace's Wedding",
            "wedding_date": "2025-06-15",
            "city": "Portland",
            "guest_count_estimate": 120,
            "style_tags": ["garden", "modern"]
        },
        "step3": {
            "total_budget": 50000.0,
            "categories": [
                { "name": "venue", "percent": 45.0 },
                { "name": "catering", "percent": 30.0, "hard_cap": 12000.0 },
                { "name": "photography", "percent": 25.0 }
            ]
        },
        "step5": { "required_vendors": ["photographer"] },
        "step6": { "rsvp_preference": "email" }
    }))
    .unwrap()
}

async fn setup_project(pool: &PgPool) -> i64 {
    ProjectRepo::create(
        pool,
        1,
        &CreateProject {
            name: "Untitled".to_string(),
            wedding_date: None,
            location: None,
            guest_count: None,
            style_tags: None,
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Test: A full bundle seeds every surface
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_full_bundle(pool: PgPool) {
    let project_id = setup_project(&pool).await;
    let bundle = prefill::build_bundle(&sample_record());

    let applied = PrefillRepo::apply_bundle(&pool, project_id, &bundle)
        .await
        .unwrap();
    assert_eq!(applied.budget_items, 3);
    assert_eq!(applied.tasks, bundle.timeline.len());
    assert!(applied.prefs_updated);

    let project = ProjectRepo::find_by_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.name, "Ada & Grace's Wedding");
    assert_eq!(project.location.as_deref(), Some("Portland"));
    assert_eq!(project.guest_count, Some(120));
    assert_eq!(project.style_tags, vec!["garden", "modern"]);

    let items = BudgetItemRepo::list_by_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(items.len(), 3);
    let venue = items.iter().find(|i| i.category == "venue").unwrap();
    assert_eq!(venue.estimated_cost, 22500.0);
    let catering = items.iter().find(|i| i.category == "catering").unwrap();
    assert_eq!(catering.estimated_cost, 12000.0);

    let tasks = TaskRepo::list_by_project(&pool, project_id, 100, 0)
        .await
        .unwrap();
    assert!(tasks.iter().any(|t| t.title == "Book photographer"));

    let prefs = ProjectPrefsRepo::find_by_project(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert!(prefs.vendor_filters.is_some());
    assert!(prefs.site_content.is_some());
    assert!(prefs.event_details.is_none()); // step4 absent
}

// ---------------------------------------------------------------------------
// Test: Dateless intake seeds no timeline and keeps the project date
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_dateless_bundle(pool: PgPool) {
    let project_id = setup_project(&pool).await;
    let mut record = sample_record();
    record.step2.as_mut().unwrap().wedding_date = None;

    let bundle = prefill::build_bundle(&record);
    let applied = PrefillRepo::apply_bundle(&pool, project_id, &bundle)
        .await
        .unwrap();
    assert_eq!(applied.tasks, 0);

    let project = ProjectRepo::find_by_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    // No silent "today" default: the date column stays NULL.
    assert_eq!(project.wedding_date, None);
}

// ---------------------------------------------------------------------------
// Test: Unknown project is RowNotFound and writes nothing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_to_missing_project(pool: PgPool) {
    let bundle = prefill::build_bundle(&sample_record());
    let err = PrefillRepo::apply_bundle(&pool, 99999, &bundle)
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::RowNotFound));
}

// ---------------------------------------------------------------------------
// Test: Mid-bundle failure rolls the whole application back
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_apply_is_atomic(pool: PgPool) {
    let project_id = setup_project(&pool).await;
    let mut bundle = prefill::build_bundle(&sample_record());
    // Sabotage a late write: a NULL task title violates NOT NULL after the
    // project update and budget inserts have already run in the tx.
    bundle.timeline.last_mut().unwrap().title = String::new();
    sqlx::query("ALTER TABLE tasks ADD CONSTRAINT chk_tasks_title_nonempty CHECK (title <> '')")
        .execute(&pool)
        .await
        .unwrap();

    let result = PrefillRepo::apply_bundle(&pool, project_id, &bundle).await;
    assert!(result.is_err());

    // Nothing from the bundle stuck.
    let project = ProjectRepo::find_by_id(&pool, project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.name, "Untitled");
    let items = BudgetItemRepo::list_by_project(&pool, project_id)
        .await
        .unwrap();
    assert!(items.is_empty());
    let tasks = TaskRepo::list_by_project(&pool, project_id, 100, 0)
        .await
        .unwrap();
    assert!(tasks.is_empty());
    assert!(ProjectPrefsRepo::find_by_project(&pool, project_id)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: Re-apply appends rather than reconciling
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reapply_appends(pool: PgPool) {
    let project_id = setup_project(&pool).await;
    let bundle = prefill::build_bundle(&sample_record());

    PrefillRepo::apply_bundle(&pool, project_id, &bundle)
        .await
        .unwrap();
    PrefillRepo::apply_bundle(&pool, project_id, &bundle)
        .await
        .unwrap();

    let items = BudgetItemRepo::list_by_project(&pool, project_id)
        .await
        .unwrap();
    assert_eq!(items.len(), 6);
}
