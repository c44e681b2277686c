//! Process configuration read from the environment once at startup.

use std::env;

use crate::error::AppError;

pub mod db;

pub const HOST_VAR: &str = "BACKEND_HOST";
pub const PORT_VAR: &str = "BACKEND_PORT";

/// Address the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = var_or(HOST_VAR, "0.0.0.0");
        let port = parse_port(PORT_VAR, &var_or(PORT_VAR, "8080"))?;
        Ok(Self { host, port })
    }
}

/// Value of `name`, or `default` when unset or blank.
pub(crate) fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Value of `name`; unset or blank is a configuration error.
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}

pub(crate) fn parse_port(name: &str, raw: &str) -> Result<u16, AppError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| AppError::config(format!("{name} must be a port number, got '{raw}'")))
}
