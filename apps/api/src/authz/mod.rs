pub mod engine;
pub mod scope;

use tracing::debug;

use crate::errors::AppError;

pub use engine::{authorize, Action, Actor, Decision, ResourceDescriptor, ResourceKind, Role};
pub use scope::{scope_filter, ScopeFilter};

/// Maps a deny decision to the HTTP layer's Forbidden error, logging the
/// reason for audit purposes. The engine itself stays pure and silent.
pub fn require(decision: Decision) -> Result<(), AppError> {
    if decision.is_allowed() {
        return Ok(());
    }
    if let Decision::Deny(reason) = decision {
        debug!("authorization denied: {reason:?}");
    }
    Err(AppError::Forbidden)
}
