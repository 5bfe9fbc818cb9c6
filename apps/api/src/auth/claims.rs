use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by an access token minted by the auth service.
///
/// The shared-secret signature, issuer, audience and expiry are checked by the
/// verifier; everything after that point trusts these fields as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject — the user id.
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(rename = "organizationId", default)]
    pub organization_id: Option<Uuid>,
    /// Absent means active; the auth service only emits the flag when a user
    /// has been deactivated mid-session.
    #[serde(rename = "isActive", default = "default_true")]
    pub is_active: bool,
    /// Token kind. Only `access` tokens are accepted; refresh tokens are
    /// rejected by the verifier.
    #[serde(rename = "type")]
    pub token_type: String,
    pub iss: String,
    pub aud: String,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

fn default_true() -> bool {
    true
}
