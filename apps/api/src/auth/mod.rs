pub mod claims;
pub mod extract;
pub mod verifier;

pub use claims::AccessClaims;
pub use verifier::{HsTokenVerifier, TokenVerifier};
