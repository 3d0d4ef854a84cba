//! Database repositories for data access layer
//!
//! Each repository is responsible for a specific domain entity and provides
//! CRUD operations and specialized queries.

mod api_keys;
mod documents;
mod users;

pub use api_keys::ApiKeyRepository;
pub use documents::DocumentRepository;
pub use users::UserRepository;
