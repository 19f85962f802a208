//! JSON HTTP surface.
//!
//! Routes are thin: they decode camelCase bodies, delegate to the services,
//! and map service errors to status codes through [`ApiError`].

mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use state::{AppState, OfferService, ProfileService, TaskService};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/offers", post(handlers::offers::create_offer))
        .route("/api/offers/respond", post(handlers::offers::respond_to_offer))
        .route("/api/offers/{id}", get(handlers::offers::get_offer))
        .route(
            "/api/students/{id}/offers",
            get(handlers::offers::list_student_offers),
        )
        .route("/api/tasks", post(handlers::tasks::create_task))
        .route("/api/tasks/{id}", get(handlers::tasks::get_task))
        .route(
            "/api/profiles/bootstrap",
            post(handlers::profiles::bootstrap_profile),
        )
        .route(
            "/api/profiles/onboarding/complete",
            post(handlers::profiles::complete_onboarding),
        )
        .route(
            "/api/profiles/skillconnect/{skillconnect_id}",
            get(handlers::profiles::find_by_skillconnect_id),
        )
        .route("/api/admin/session", post(handlers::admin::create_session))
        .route("/api/admin/offers", get(handlers::admin::list_offers))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
