//! Repository contracts consumed by the services layer.

pub mod users;

pub use users::{PublicUser, User, UserRepository};
