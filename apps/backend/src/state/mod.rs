//! Process-wide state shared by every request.

pub mod app_state;
pub mod security_config;
