pub mod identity;
pub mod validated_json;

pub use identity::AuthenticatedIdentity;
pub use validated_json::ValidatedJson;
