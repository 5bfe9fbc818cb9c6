use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use tracing::warn;

use crate::auth::claims::AccessClaims;
use crate::authz::{Actor, Role};
use crate::errors::AppError;
use crate::state::AppState;

/// Builds the request actor from verified claims. An unknown role string is a
/// malformed actor: Forbidden, never a crash.
pub fn actor_from_claims(claims: &AccessClaims) -> Result<Actor, AppError> {
    let role = Role::parse(&claims.role).ok_or_else(|| {
        warn!("rejected token with unknown role '{}'", claims.role);
        AppError::Forbidden
    })?;

    Ok(Actor {
        user_id: claims.sub,
        role,
        organization_id: claims.organization_id,
        is_active: claims.is_active,
    })
}

/// Extracts the authenticated [`Actor`] from the `Authorization: Bearer`
/// header. Handlers add an `actor: Actor` argument to opt into authentication.
#[async_trait]
impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?;

        let claims = state.verifier.verify(token).await.map_err(|e| {
            warn!("token verification failed: {e}");
            AppError::Unauthorized
        })?;

        actor_from_claims(&claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(role: &str, org: Option<Uuid>) -> AccessClaims {
        AccessClaims {
            sub: Uuid::new_v4(),
            email: None,
            role: role.to_string(),
            organization_id: org,
            is_active: true,
            token_type: "access".to_string(),
            iss: "auth-service".to_string(),
            aud: "talent-platform".to_string(),
            exp: 0,
        }
    }

    #[test]
    fn test_candidate_claims_to_actor() {
        let c = claims("candidate", None);
        let actor = actor_from_claims(&c).unwrap();
        assert_eq!(actor.user_id, c.sub);
        assert_eq!(actor.role, Role::Candidate);
        assert!(actor.is_active);
    }

    #[test]
    fn test_recruiter_claims_keep_organization() {
        let org = Uuid::new_v4();
        let actor = actor_from_claims(&claims("recruiter", Some(org))).unwrap();
        assert_eq!(actor.role, Role::Recruiter);
        assert_eq!(actor.organization_id, Some(org));
    }

    #[test]
    fn test_unknown_role_is_forbidden() {
        let err = actor_from_claims(&claims("superuser", None)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }

    #[test]
    fn test_deactivated_flag_carried_through() {
        let mut c = claims("candidate", None);
        c.is_active = false;
        let actor = actor_from_claims(&c).unwrap();
        assert!(!actor.is_active);
    }
}
