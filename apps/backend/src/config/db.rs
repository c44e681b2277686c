//! Database connection URL from `DB_*` variables.

use std::env;

use super::{must_var, parse_port, var_or};
use crate::error::AppError;

/// Full connection URL; wins over the `DB_*` variables when set (e.g. `sqlite://auth.db?mode=rwc`).
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Builds the database URL from the environment.
///
/// `DB_USER` and `DB_PASS` are required; `DB_HOST`, `DB_PORT` and `DB_NAME`
/// default to `localhost`, `5432` and `recipe_app`.
pub fn db_url() -> Result<String, AppError> {
    if let Some(url) = env::var(DATABASE_URL_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
    {
        return Ok(url);
    }

    let host = var_or("DB_HOST", "localhost");
    let port = parse_port("DB_PORT", &var_or("DB_PORT", "5432"))?;
    let username = must_var("DB_USER")?;
    let password = must_var("DB_PASS")?;
    let db_name = var_or("DB_NAME", "recipe_app");

    Ok(format!(
        "postgres://{username}:{password}@{host}:{port}/{db_name}"
    ))
}
