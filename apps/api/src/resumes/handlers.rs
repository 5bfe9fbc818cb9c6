use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::authz::{self, authorize, Action, Actor, ResourceKind};
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::models::resume::{ResumeMetadataCreate, ResumeMetadataRow, ResumeMetadataUpdate};
use crate::profiles::store::find_profile;
use crate::resumes::store::{self, ResumeListFilters};
use crate::resumes::validation::{validate_resume_create, validate_resume_update};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeListQuery {
    pub profile_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub is_primary: Option<bool>,
}

#[derive(Serialize)]
pub struct ResumeListResponse {
    pub resumes: Vec<ResumeMetadataRow>,
}

/// Loads the profile a resume belongs to; authorization always runs against
/// the owning profile's descriptor.
async fn owning_profile(state: &AppState, resume: &ResumeMetadataRow) -> Result<ProfileRow, AppError> {
    find_profile(&state.db, resume.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Associated profile not found".to_string()))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    actor: Actor,
    Json(req): Json<ResumeMetadataCreate>,
) -> Result<(StatusCode, Json<ResumeMetadataRow>), AppError> {
    validate_resume_create(&req)?;

    let profile = find_profile(&state.db, req.profile_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    authz::require(authorize(
        &actor,
        Action::Create,
        &profile.descriptor(ResourceKind::Resume),
    ))?;

    let resume = store::insert_resume(&state.db, &req).await?;
    info!(
        "Resume metadata created: {} for profile {}",
        resume.id, resume.profile_id
    );

    Ok((StatusCode::CREATED, Json(resume)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeMetadataRow>, AppError> {
    let resume = store::find_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let profile = owning_profile(&state, &resume).await?;
    authz::require(authorize(
        &actor,
        Action::Read,
        &profile.descriptor(ResourceKind::Resume),
    ))?;

    Ok(Json(resume))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<ResumeListQuery>,
) -> Result<Json<ResumeListResponse>, AppError> {
    let scope = authz::scope_filter(&actor);
    let filters = ResumeListFilters {
        profile_id: query.profile_id,
        is_active: query.is_active,
        is_primary: query.is_primary,
    };

    let resumes = store::list_resumes(&state.db, &scope, &filters).await?;
    Ok(Json(ResumeListResponse { resumes }))
}

/// PUT /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(req): Json<ResumeMetadataUpdate>,
) -> Result<Json<ResumeMetadataRow>, AppError> {
    validate_resume_update(&req)?;

    let resume = store::find_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let profile = owning_profile(&state, &resume).await?;
    authz::require(authorize(
        &actor,
        Action::Update,
        &profile.descriptor(ResourceKind::Resume),
    ))?;

    // Promoting this resume to primary demotes the profile's other resumes.
    if req.is_primary == Some(true) {
        store::demote_other_primaries(&state.db, resume.profile_id, Some(id)).await?;
    }

    let updated = store::update_resume(&state.db, id, &req).await?;
    info!("Resume metadata updated: {id} by {}", actor.user_id);

    Ok(Json(updated))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let resume = store::find_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found".to_string()))?;

    let profile = owning_profile(&state, &resume).await?;
    authz::require(authorize(
        &actor,
        Action::Delete,
        &profile.descriptor(ResourceKind::Resume),
    ))?;

    store::soft_delete_resume(&state.db, id).await?;
    info!("Resume metadata deleted: {id} by {}", actor.user_id);

    Ok(StatusCode::NO_CONTENT)
}
