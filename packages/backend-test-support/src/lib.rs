//! Backend test support utilities
//!
//! Helpers shared by the backend's integration tests: unified logging
//! initialization, unique test data, and Problem Details assertions.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
