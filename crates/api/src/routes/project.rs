//! Route definitions for the `/projects` resource.
//!
//! Also nests the intake wizard, prefill, seating chart, and the owned
//! CRUD resources under `/projects/{project_id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{budget, guest, intake, prefill, prefs, project, seating, task, vendor};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                                    -> list
/// POST   /                                    -> create
/// GET    /{id}                                -> get_by_id
/// PATCH  /{id}                                -> update
/// DELETE /{id}                                -> delete
///
/// GET    /{project_id}/intake                 -> record + completion
/// PUT    /{project_id}/intake/steps/{step}    -> save draft step
/// POST   /{project_id}/intake/submit          -> complete-validate + submit
///
/// GET    /{project_id}/prefill                -> mapped bundle preview
/// POST   /{project_id}/prefill/apply          -> transactional apply
///
/// GET    /{project_id}/tasks                  -> list_by_project
/// POST   /{project_id}/tasks                  -> create
/// POST   /{project_id}/tasks/bulk             -> create_bulk
/// GET    /{project_id}/tasks/{id}             -> get_by_id
/// PATCH  /{project_id}/tasks/{id}             -> update
/// DELETE /{project_id}/tasks/{id}             -> delete
///
/// (guests, vendors, budget-items follow the same CRUD shape)
///
/// GET    /{project_id}/prefs                  -> get_prefs
/// PUT    /{project_id}/prefs                  -> update_prefs
///
/// GET    /{project_id}/seating/tables         -> list_tables
/// POST   /{project_id}/seating/tables         -> create_table
/// GET    /{project_id}/seating/tables/{id}    -> get_table
/// PATCH  /{project_id}/seating/tables/{id}    -> update_table
/// DELETE /{project_id}/seating/tables/{id}    -> delete_table
/// GET    /{project_id}/seating/assignments    -> list_assignments
/// POST   /{project_id}/seating/assignments    -> assign_guest (replace)
/// DELETE /{project_id}/seating/assignments/guest/{guest_id} -> remove_guest
/// ```
pub fn router() -> Router<AppState> {
    let intake_routes = Router::new()
        .route("/", get(intake::get_intake))
        .route("/steps/{step}", put(intake::save_step))
        .route("/submit", post(intake::submit));

    let prefill_routes = Router::new()
        .route("/", get(prefill::preview))
        .route("/apply", post(prefill::apply));

    let task_routes = Router::new()
        .route("/", get(task::list_by_project).post(task::create))
        .route("/bulk", post(task::create_bulk))
        .route(
            "/{id}",
            get(task::get_by_id).patch(task::update).delete(task::delete),
        );

    let guest_routes = Router::new()
        .route("/", get(guest::list_by_project).post(guest::create))
        .route(
            "/{id}",
            get(guest::get_by_id)
                .patch(guest::update)
                .delete(guest::delete),
        );

    let vendor_routes = Router::new()
        .route("/", get(vendor::list_by_project).post(vendor::create))
        .route(
            "/{id}",
            get(vendor::get_by_id)
                .patch(vendor::update)
                .delete(vendor::delete),
        );

    let budget_routes = Router::new()
        .route("/", get(budget::list_by_project).post(budget::create))
        .route(
            "/{id}",
            get(budget::get_by_id)
                .patch(budget::update)
                .delete(budget::delete),
        );

    let seating_routes = Router::new()
        .route(
            "/tables",
            get(seating::list_tables).post(seating::create_table),
        )
        .route(
            "/tables/{id}",
            get(seating::get_table)
                .patch(seating::update_table)
                .delete(seating::delete_table),
        )
        .route(
            "/assignments",
            get(seating::list_assignments).post(seating::assign_guest),
        )
        .route(
            "/assignments/guest/{guest_id}",
            axum::routing::delete(seating::remove_guest),
        );

    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .patch(project::update)
                .delete(project::delete),
        )
        .nest("/{project_id}/intake", intake_routes)
        .nest("/{project_id}/prefill", prefill_routes)
        .nest("/{project_id}/tasks", task_routes)
        .nest("/{project_id}/guests", guest_routes)
        .nest("/{project_id}/vendors", vendor_routes)
        .nest("/{project_id}/budget-items", budget_routes)
        .route(
            "/{project_id}/prefs",
            get(prefs::get_prefs).put(prefs::update_prefs),
        )
        .nest("/{project_id}/seating", seating_routes)
}
