//! Authentication: API key generation, hashing, and the bearer-token
//! middleware that resolves requests to an owner.

pub mod api_key;
pub mod middleware;
pub mod models;

pub use middleware::{auth_middleware, AuthState};
pub use models::OwnerContext;
