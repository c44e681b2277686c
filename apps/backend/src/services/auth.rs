//! Register and login flows.
//!
//! Both return an `AuthSession`: a freshly issued token plus the public view
//! of the user it was issued for.

use actix_web::web;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::logging::security;
use crate::repos::users::{PublicUser, User};
use crate::state::app_state::AppState;

/// Counted in Unicode scalar values, not bytes.
pub const MIN_PASSWORD_CHARS: usize = 6;

const REQUIRED_FIELDS: &str = "Email and password are required";

/// Email and plaintext password from a register or login request.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &crate::logging::pii::Redacted(&self.email))
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

/// Trimmed email and untouched password. A blank email or an empty password
/// is a validation error; a whitespace-only password is a real password.
fn required_fields(credentials: &Credentials) -> Result<(&str, &str), AppError> {
    let email = credentials.email.trim();
    if email.is_empty() {
        return Err(AppError::invalid(ErrorCode::InvalidEmail, REQUIRED_FIELDS));
    }
    if credentials.password.is_empty() {
        return Err(AppError::invalid(ErrorCode::InvalidPassword, REQUIRED_FIELDS));
    }
    Ok((email, credentials.password.as_str()))
}

fn issue_session(state: &AppState, user: &User) -> Result<AuthSession, AppError> {
    let token = state.tokens.issue_now(user.id, &user.email)?;
    Ok(AuthSession {
        token,
        user: PublicUser::from(user),
    })
}

pub async fn register(state: &AppState, credentials: Credentials) -> Result<AuthSession, AppError> {
    let (email, password) = required_fields(&credentials)?;
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::invalid(
            ErrorCode::InvalidPassword,
            format!("Password must be at least {MIN_PASSWORD_CHARS} characters"),
        ));
    }

    let hasher = state.hasher.clone();
    let plaintext = password.to_string();
    let password_hash = web::block(move || hasher.hash(&plaintext)).await??;

    let user = state.users.create(email, &password_hash).await?;
    info!(user_id = user.id, "User registered");

    issue_session(state, &user)
}

pub async fn login(state: &AppState, credentials: Credentials) -> Result<AuthSession, AppError> {
    let (email, password) = required_fields(&credentials)?;

    let user = match state.users.find_by_email(email).await {
        Ok(user) => Some(user),
        Err(DomainError::NotFound(..)) => None,
        Err(e) => return Err(e.into()),
    };

    let hasher = state.hasher.clone();
    let plaintext = password.to_string();
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let verified = web::block(move || match stored {
        Some(hash) => hasher.verify(&plaintext, &hash),
        None => {
            // Spend comparable work so response time doesn't reveal unknown emails.
            let _ = hasher.hash(&plaintext);
            false
        }
    })
    .await?;

    match user {
        Some(user) if verified => {
            info!(user_id = user.id, "User logged in");
            issue_session(state, &user)
        }
        Some(_) => {
            security::login_failed("invalid_password", Some(email));
            Err(AppError::invalid_credentials())
        }
        None => {
            security::login_failed("unknown_email", Some(email));
            Err(AppError::invalid_credentials())
        }
    }
}
