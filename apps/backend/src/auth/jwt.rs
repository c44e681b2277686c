use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Deserialize;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

use crate::auth::claims::{Claims, ISSUER};
use crate::state::security_config::SecurityConfig;

/// Lifetime of every issued token.
pub const TOKEN_TTL: Duration = Duration::hours(24);

/// Why a token could not be issued or was rejected.
///
/// Every validation failure is terminal for that token. Callers at the HTTP
/// boundary collapse them into one generic 401; `reason()` is for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token service misconfigured: {0}")]
    Configuration(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
    #[error("token is malformed")]
    Malformed,
    #[error("token declares unexpected algorithm {found:?}")]
    AlgorithmMismatch { found: String },
    #[error("token signature is invalid")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
    #[error("token is not valid yet")]
    NotYetValid,
}

impl TokenError {
    /// Stable label for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Configuration(_) => "configuration",
            TokenError::Signing(_) => "signing_failed",
            TokenError::Malformed => "malformed_token",
            TokenError::AlgorithmMismatch { .. } => "algorithm_mismatch",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "token_expired",
            TokenError::NotYetValid => "token_not_yet_valid",
        }
    }
}

/// Only the field we need from the untrusted header.
#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// Issues and validates HMAC-signed session tokens.
///
/// The secret is injected once at construction and never mutated, so one
/// instance is shared read-only by every request.
#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(security: &SecurityConfig) -> Self {
        Self {
            algorithm: security.algorithm(),
            encoding_key: EncodingKey::from_secret(security.secret()),
            decoding_key: DecodingKey::from_secret(security.secret()),
        }
    }

    /// Mint a token for `user_id` valid from `now` for [`TOKEN_TTL`].
    pub fn issue(
        &self,
        user_id: i64,
        email: &str,
        now: OffsetDateTime,
    ) -> Result<String, TokenError> {
        let iat = now.unix_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            user_id,
            email: email.to_string(),
            iss: ISSUER.to_string(),
            iat,
            nbf: iat,
            exp: iat + TOKEN_TTL.whole_seconds(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn issue_now(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        self.issue(user_id, email, OffsetDateTime::now_utc())
    }

    /// Validate `token` as of `now` and return its claims unmodified.
    ///
    /// Checks run in a fixed order: structure, declared algorithm, signature,
    /// expiry, not-before.
    pub fn validate(&self, token: &str, now: OffsetDateTime) -> Result<Claims, TokenError> {
        let declared = declared_algorithm(token)?;

        // The header is attacker-controlled; only our own configuration decides the algorithm.
        match Algorithm::from_str(&declared) {
            Ok(alg) if alg == self.algorithm => {}
            _ => return Err(TokenError::AlgorithmMismatch { found: declared }),
        }

        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidAlgorithm => TokenError::AlgorithmMismatch { found: declared },
                _ => TokenError::Malformed,
            })?;

        let now_nanos = now.unix_timestamp_nanos();
        if now_nanos >= seconds_to_nanos(claims.exp) {
            return Err(TokenError::Expired);
        }
        if now_nanos < seconds_to_nanos(claims.nbf) {
            return Err(TokenError::NotYetValid);
        }

        Ok(claims)
    }

    pub fn validate_now(&self, token: &str) -> Result<Claims, TokenError> {
        self.validate(token, OffsetDateTime::now_utc())
    }
}

fn declared_algorithm(token: &str) -> Result<String, TokenError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments[0].is_empty() || segments[1].is_empty() {
        return Err(TokenError::Malformed);
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|_| TokenError::Malformed)?;
    let header: DeclaredHeader =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::Malformed)?;

    Ok(header.alg)
}

fn seconds_to_nanos(seconds: i64) -> i128 {
    i128::from(seconds) * 1_000_000_000
}
