use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::authz::{self, authorize, Action, Actor, ResourceDescriptor, ResourceKind};
use crate::errors::AppError;
use crate::models::profile::{ProfileCreate, ProfileRow, ProfileUpdate};
use crate::profiles::store::{self, PageParams, Pagination, ProfileListFilters};
use crate::profiles::validation::{into_result, validate_profile_create, validate_profile_update};
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListQuery {
    pub user_id: Option<Uuid>,
    pub organization_id: Option<Uuid>,
    pub location: Option<String>,
    /// Comma-separated skill list; matches profiles having any of them.
    pub skills: Option<String>,
    pub is_active: Option<bool>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileRow>,
    pub pagination: Pagination,
}

/// POST /api/v1/profiles
pub async fn handle_create_profile(
    State(state): State<AppState>,
    actor: Actor,
    Json(req): Json<ProfileCreate>,
) -> Result<(StatusCode, Json<ProfileRow>), AppError> {
    into_result(validate_profile_create(&req))?;

    // Descriptor of the record the caller is asking to create: only a
    // candidate creating their own profile passes.
    let descriptor = ResourceDescriptor {
        kind: ResourceKind::Profile,
        owner_user_id: req.user_id,
        owner_organization_id: req.organization_id,
    };
    authz::require(authorize(&actor, Action::Create, &descriptor))?;

    if store::find_profile_by_user(&state.db, req.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Validation(
            "Profile already exists for this user".to_string(),
        ));
    }

    let profile = store::insert_profile(&state.db, &req).await?;
    info!("Profile created: {} for user {}", profile.id, profile.user_id);

    Ok((StatusCode::CREATED, Json(profile)))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = store::find_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    authz::require(authorize(
        &actor,
        Action::Read,
        &profile.descriptor(ResourceKind::Profile),
    ))?;

    Ok(Json(profile))
}

/// GET /api/v1/profiles/user/:user_id
pub async fn handle_get_profile_by_user(
    State(state): State<AppState>,
    actor: Actor,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = store::find_profile_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found for this user".to_string()))?;

    authz::require(authorize(
        &actor,
        Action::Read,
        &profile.descriptor(ResourceKind::Profile),
    ))?;

    Ok(Json(profile))
}

/// GET /api/v1/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
    actor: Actor,
    Query(query): Query<ProfileListQuery>,
) -> Result<Json<ProfileListResponse>, AppError> {
    if query.page < 1 {
        return Err(AppError::Validation("page must be >= 1".to_string()));
    }
    if !(1..=100).contains(&query.limit) {
        return Err(AppError::Validation(
            "limit must be between 1 and 100".to_string(),
        ));
    }

    let scope = authz::scope_filter(&actor);
    let filters = ProfileListFilters {
        user_id: query.user_id,
        organization_id: query.organization_id,
        location: query.location.clone(),
        skills: parse_skills(query.skills.as_deref()),
        is_active: query.is_active,
    };
    let page = PageParams {
        page: query.page,
        limit: query.limit,
    };

    let (profiles, total) = store::list_profiles(&state.db, &scope, &filters, page).await?;

    Ok(Json(ProfileListResponse {
        profiles,
        pagination: Pagination::new(page, total),
    }))
}

/// PUT /api/v1/profiles/:id
pub async fn handle_update_profile(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(req): Json<ProfileUpdate>,
) -> Result<Json<ProfileRow>, AppError> {
    into_result(validate_profile_update(&req))?;

    let profile = store::find_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    authz::require(authorize(
        &actor,
        Action::Update,
        &profile.descriptor(ResourceKind::Profile),
    ))?;

    let updated = store::update_profile(&state.db, id, &req).await?;
    info!("Profile updated: {id} by {}", actor.user_id);

    Ok(Json(updated))
}

fn parse_skills(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
