use jsonwebtoken::Algorithm;

use crate::auth::jwt::TokenError;

/// Environment variable holding the token signing secret.
pub const JWT_SECRET_VAR: &str = "BACKEND_JWT_SECRET";

/// Signing secret plus the one algorithm tokens may use.
///
/// No `Default`: a process without a configured secret fails at startup.
#[derive(Clone)]
pub struct SecurityConfig {
    jwt_secret: Vec<u8>,
    algorithm: Algorithm,
}

impl SecurityConfig {
    /// Build a config around `jwt_secret`. An empty secret is a configuration error.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(TokenError::Configuration(
                "JWT signing secret is empty".to_string(),
            ));
        }
        Ok(Self {
            jwt_secret,
            algorithm: Algorithm::HS256,
        })
    }

    /// Read the secret from `BACKEND_JWT_SECRET`.
    pub fn from_env() -> Result<Self, TokenError> {
        let secret = std::env::var(JWT_SECRET_VAR).map_err(|_| {
            TokenError::Configuration(format!("{JWT_SECRET_VAR} must be set"))
        })?;
        Self::new(secret.into_bytes())
    }

    pub fn secret(&self) -> &[u8] {
        &self.jwt_secret
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .finish()
    }
}
