//! List/search scoping. Derived solely from the actor, independent of any
//! caller-supplied search filters; callers can only narrow it, never widen it.

use uuid::Uuid;

use crate::authz::engine::{Actor, Role};

/// Predicate restricting which records a collection query may return.
///
/// The store layer translates this into a SQL `WHERE` clause; `matches` is the
/// in-memory reading of the same predicate, used by tests and by any caller
/// that already holds the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    /// `owner_user_id == ...` — a candidate sees only their own records.
    OwnerIs(Uuid),
    /// `owner_organization_id == ...` — org-wide visibility, no cross-org leakage.
    OrganizationIs(Uuid),
    /// Matches no record at all. The fallback is an empty result set, never
    /// unrestricted access.
    Nothing,
}

impl ScopeFilter {
    pub fn matches(&self, owner_user_id: Uuid, owner_organization_id: Option<Uuid>) -> bool {
        match self {
            ScopeFilter::OwnerIs(user_id) => owner_user_id == *user_id,
            ScopeFilter::OrganizationIs(org_id) => owner_organization_id == Some(*org_id),
            ScopeFilter::Nothing => false,
        }
    }
}

/// Computes the scope filter for a list/search request.
///
/// Inactive actors and recruiters/admins missing their organization claim get
/// the match-nothing filter.
pub fn scope_filter(actor: &Actor) -> ScopeFilter {
    if !actor.is_active {
        return ScopeFilter::Nothing;
    }

    match actor.role {
        Role::Candidate => ScopeFilter::OwnerIs(actor.user_id),
        Role::Recruiter | Role::EmployerAdmin => match actor.organization_id {
            Some(org_id) => ScopeFilter::OrganizationIs(org_id),
            None => ScopeFilter::Nothing,
        },
    }
}
