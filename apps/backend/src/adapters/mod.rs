//! Implementations of the user repository contract.

pub mod users_memory;
pub mod users_sea;

pub use users_memory::InMemoryUserRepository;
pub use users_sea::SeaUserRepository;
