pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::profiles::handlers as profiles;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Placeholder for the stubbed resume file transfer (object storage
/// integration lands separately; only metadata is managed today).
async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        // Profile API
        .route(
            "/api/v1/profiles",
            post(profiles::handle_create_profile).get(profiles::handle_list_profiles),
        )
        .route(
            "/api/v1/profiles/:id",
            get(profiles::handle_get_profile).put(profiles::handle_update_profile),
        )
        .route(
            "/api/v1/profiles/user/:user_id",
            get(profiles::handle_get_profile_by_user),
        )
        // Resume metadata API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_create_resume).get(resumes::handle_list_resumes),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        // File transfer (stubbed)
        .route(
            "/api/v1/resumes/:id/file",
            post(not_implemented).get(not_implemented),
        )
        .with_state(state)
}
