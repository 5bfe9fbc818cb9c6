//! Access decision engine — pure role/ownership rules, deny by default.
//!
//! Every endpoint funnels through `authorize` instead of scattering per-route
//! checks, so the deny-by-default invariant holds in exactly one place.
//! The engine performs no I/O and never errors: a malformed actor (e.g. a
//! recruiter claim without an organization) is a deny, not an exception.

use uuid::Uuid;

/// Role carried in verified token claims.
///
/// Unknown role strings are rejected at the claim boundary and never reach
/// the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Candidate,
    Recruiter,
    EmployerAdmin,
}

impl Role {
    /// Parses the wire representation used by the auth service.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "candidate" => Some(Role::Candidate),
            "recruiter" => Some(Role::Recruiter),
            "employer_admin" => Some(Role::EmployerAdmin),
            _ => None,
        }
    }
}

/// The authenticated identity making a request. Built fresh per request from
/// verified claims; never persisted.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: Role,
    /// Present for recruiter / employer_admin; candidates have none.
    pub organization_id: Option<Uuid>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Profile,
    Resume,
}

/// Minimal ownership metadata for a record, enough to authorize without the
/// full row. For `Create` the descriptor is built from the request body (the
/// record the caller is asking to bring into existence).
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub owner_user_id: Uuid,
    pub owner_organization_id: Option<Uuid>,
}

/// Outcome of an authorization check. Deny carries a label for audit logs;
/// the HTTP layer maps every deny to 403 regardless of the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    InactiveActor,
    /// Actor's role may never perform this action on this resource.
    RoleForbidden,
    NotOwner,
    OutsideOrganization,
    /// Required role-specific claim missing (recruiter/admin without an org).
    MalformedActor,
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Decides whether `actor` may perform `action` on the record described by
/// `resource`. First matching rule wins; anything unmatched is a deny.
pub fn authorize(actor: &Actor, action: Action, resource: &ResourceDescriptor) -> Decision {
    if !actor.is_active {
        return Decision::Deny(DenyReason::InactiveActor);
    }

    match (actor.role, action) {
        // Candidates create and mutate their own records, nothing else.
        (Role::Candidate, _) => {
            if resource.owner_user_id == actor.user_id {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::NotOwner)
            }
        }

        // Recruiters and employer admins are read-only, scoped to their own
        // organization. Mutation of a candidate's records is reserved for the
        // owning candidate.
        (Role::Recruiter | Role::EmployerAdmin, Action::Read) => {
            let Some(actor_org) = actor.organization_id else {
                return Decision::Deny(DenyReason::MalformedActor);
            };
            if resource.owner_organization_id == Some(actor_org) {
                Decision::Allow
            } else {
                Decision::Deny(DenyReason::OutsideOrganization)
            }
        }

        (Role::Recruiter | Role::EmployerAdmin, _) => Decision::Deny(DenyReason::RoleForbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(user_id: Uuid) -> Actor {
        Actor {
            user_id,
            role: Role::Candidate,
            organization_id: None,
            is_active: true,
        }
    }

    fn recruiter(org: Uuid) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            role: Role::Recruiter,
            organization_id: Some(org),
            is_active: true,
        }
    }

    fn admin(org: Uuid) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            role: Role::EmployerAdmin,
            organization_id: Some(org),
            is_active: true,
        }
    }

    fn profile_of(owner: Uuid, org: Option<Uuid>) -> ResourceDescriptor {
        ResourceDescriptor {
            kind: ResourceKind::Profile,
            owner_user_id: owner,
            owner_organization_id: org,
        }
    }

    const ALL_ACTIONS: [Action; 4] = [
        Action::Create,
        Action::Read,
        Action::Update,
        Action::Delete,
    ];

    #[test]
    fn test_inactive_actor_denied_every_action() {
        let user = Uuid::new_v4();
        let mut actor = candidate(user);
        actor.is_active = false;
        let own = profile_of(user, None);

        for action in ALL_ACTIONS {
            assert_eq!(
                authorize(&actor, action, &own),
                Decision::Deny(DenyReason::InactiveActor),
                "inactive actor must be denied {action:?}"
            );
        }
    }

    #[test]
    fn test_candidate_full_access_to_own_records() {
        let user = Uuid::new_v4();
        let actor = candidate(user);
        let own = profile_of(user, None);

        for action in ALL_ACTIONS {
            assert!(authorize(&actor, action, &own).is_allowed());
        }
    }

    #[test]
    fn test_candidate_denied_on_others_records() {
        let actor = candidate(Uuid::new_v4());
        let other = profile_of(Uuid::new_v4(), None);

        for action in ALL_ACTIONS {
            assert_eq!(
                authorize(&actor, action, &other),
                Decision::Deny(DenyReason::NotOwner)
            );
        }
    }

    #[test]
    fn test_candidate_update_allowed_iff_owner() {
        let user = Uuid::new_v4();
        let actor = candidate(user);
        assert!(authorize(&actor, Action::Update, &profile_of(user, None)).is_allowed());
        assert!(!authorize(&actor, Action::Update, &profile_of(Uuid::new_v4(), None)).is_allowed());
    }

    #[test]
    fn test_recruiter_reads_within_org() {
        let org = Uuid::new_v4();
        let actor = recruiter(org);
        let in_org = profile_of(Uuid::new_v4(), Some(org));

        assert!(authorize(&actor, Action::Read, &in_org).is_allowed());
    }

    #[test]
    fn test_recruiter_read_only_even_in_own_org() {
        let org = Uuid::new_v4();
        let actor = recruiter(org);
        let in_org = profile_of(Uuid::new_v4(), Some(org));

        for action in [Action::Create, Action::Update, Action::Delete] {
            assert_eq!(
                authorize(&actor, action, &in_org),
                Decision::Deny(DenyReason::RoleForbidden),
                "recruiters are read-only, {action:?} must be denied"
            );
        }
    }

    #[test]
    fn test_recruiter_denied_across_orgs() {
        let actor = recruiter(Uuid::new_v4());
        let elsewhere = profile_of(Uuid::new_v4(), Some(Uuid::new_v4()));

        assert_eq!(
            authorize(&actor, Action::Read, &elsewhere),
            Decision::Deny(DenyReason::OutsideOrganization)
        );
    }

    #[test]
    fn test_recruiter_denied_on_orgless_profile() {
        let actor = recruiter(Uuid::new_v4());
        let orgless = profile_of(Uuid::new_v4(), None);

        assert_eq!(
            authorize(&actor, Action::Read, &orgless),
            Decision::Deny(DenyReason::OutsideOrganization)
        );
    }

    #[test]
    fn test_admin_reads_within_org_but_never_mutates_others() {
        let org = Uuid::new_v4();
        let actor = admin(org);
        let in_org = profile_of(Uuid::new_v4(), Some(org));

        assert!(authorize(&actor, Action::Read, &in_org).is_allowed());
        for action in [Action::Update, Action::Delete] {
            assert!(
                !authorize(&actor, action, &in_org).is_allowed(),
                "admin {action:?} on another user's record must be denied"
            );
        }
    }

    #[test]
    fn test_admin_delete_denied_whenever_not_owner() {
        let org = Uuid::new_v4();
        let actor = admin(org);
        // Even inside the org, delete of a record the admin does not own is denied.
        let in_org = profile_of(Uuid::new_v4(), Some(org));
        let outside = profile_of(Uuid::new_v4(), Some(Uuid::new_v4()));

        assert!(!authorize(&actor, Action::Delete, &in_org).is_allowed());
        assert!(!authorize(&actor, Action::Delete, &outside).is_allowed());
    }

    #[test]
    fn test_recruiter_without_org_claim_is_denied_not_crashed() {
        let mut actor = recruiter(Uuid::new_v4());
        actor.organization_id = None;
        let resource = profile_of(Uuid::new_v4(), Some(Uuid::new_v4()));

        assert_eq!(
            authorize(&actor, Action::Read, &resource),
            Decision::Deny(DenyReason::MalformedActor)
        );
    }

    #[test]
    fn test_recruiter_create_on_behalf_of_candidate_denied() {
        // Open product question; denied by default.
        let org = Uuid::new_v4();
        let actor = recruiter(org);
        let resume = ResourceDescriptor {
            kind: ResourceKind::Resume,
            owner_user_id: Uuid::new_v4(),
            owner_organization_id: Some(org),
        };

        assert!(!authorize(&actor, Action::Create, &resume).is_allowed());
    }

    #[test]
    fn test_create_requires_self_ownership() {
        let user = Uuid::new_v4();
        let actor = candidate(user);

        assert!(authorize(&actor, Action::Create, &profile_of(user, None)).is_allowed());
        assert!(!authorize(&actor, Action::Create, &profile_of(Uuid::new_v4(), None)).is_allowed());
    }

    #[test]
    fn test_resume_descriptor_follows_same_rules() {
        let user = Uuid::new_v4();
        let actor = candidate(user);
        let own_resume = ResourceDescriptor {
            kind: ResourceKind::Resume,
            owner_user_id: user,
            owner_organization_id: None,
        };

        assert!(authorize(&actor, Action::Delete, &own_resume).is_allowed());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("candidate"), Some(Role::Candidate));
        assert_eq!(Role::parse("recruiter"), Some(Role::Recruiter));
        assert_eq!(Role::parse("employer_admin"), Some(Role::EmployerAdmin));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse(""), None);
    }
}
