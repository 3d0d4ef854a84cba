pub mod analysis;
pub mod api_keys;
pub mod documents;
pub mod users;
