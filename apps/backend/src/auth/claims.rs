//! Claims carried by backend-issued session tokens.

use serde::{Deserialize, Serialize};

/// Issuer stamped into, and expected from, every session token.
pub const ISSUER: &str = "recipe-app";

/// Signed JWT payload. Immutable once signed; any change breaks the MAC.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user id in decimal form
    pub sub: String,
    pub user_id: i64,
    pub email: String,
    pub iss: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Not-before (seconds since epoch); always equal to `iat`
    pub nbf: i64,
    /// Expiry (seconds since epoch); always after `iat`
    pub exp: i64,
}
