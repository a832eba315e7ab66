//! huddle-api
//!
//! HTTP surface of the assessment builder: the JSON API used by the
//! participation client, the admin authoring endpoints, configuration and
//! request middleware.

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod state;

use routes::admin;
use state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/assessments", get(routes::assessments::list_assessments))
        .route(
            "/assessments/{id}",
            get(routes::assessments::get_assessment),
        )
        .route(
            "/participations",
            post(routes::participations::create_participation),
        )
        .route(
            "/participations/{id}",
            get(routes::participations::get_participation)
                .put(routes::participations::answer_question),
        );

    let admin = Router::new()
        .route(
            "/assessments",
            get(admin::assessments::list_assessments).post(admin::assessments::create_assessment),
        )
        .route(
            "/assessments/{id}",
            get(admin::assessments::get_assessment)
                .put(admin::assessments::update_assessment)
                .delete(admin::assessments::delete_assessment),
        )
        .route(
            "/assessments/{id}/questions",
            post(admin::questions::create_question),
        )
        .route(
            "/assessments/{id}/questions/{question_id}",
            get(admin::questions::get_question)
                .put(admin::questions::update_question)
                .delete(admin::questions::delete_question),
        )
        .route(
            "/assessments/{id}/questions/{question_id}/answers",
            post(admin::answers::create_answer),
        )
        .route(
            "/assessments/{id}/questions/{question_id}/answers/{answer_id}",
            get(admin::answers::get_answer)
                .put(admin::answers::update_answer)
                .delete(admin::answers::delete_answer),
        )
        .route_layer(axum_mw::from_fn(
            middleware::acting_user::require_acting_user,
        ));

    Router::new()
        // Health (no acting user)
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .nest("/admin", admin)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
