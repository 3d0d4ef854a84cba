//! API key generation and hashing.
//!
//! Keys are random 160-bit values rendered as `lx_live_<40 hex chars>`. Only
//! the SHA-256 digest of the full key is stored, so authentication is a
//! single indexed lookup by digest and a database leak never exposes usable
//! credentials.

use chrono::{DateTime, Utc};
use lexia_core::constants::API_KEY_PREFIX;
use lexia_core::models::ApiKey;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Generate a new API key with 160 bits of randomness.
pub fn generate_api_key() -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..20).map(|_| rng.random()).collect();
    format!("{}{}", API_KEY_PREFIX, hex::encode(random_bytes))
}

/// Hash an API key for storage and lookup.
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Request body for creating a new API key
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateApiKeyRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// Response when creating an API key. Includes the raw key, which is shown
/// exactly once and cannot be recovered afterwards.
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateApiKeyResponse {
    pub id: Uuid,
    pub api_key: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// API key information in list responses; never carries key material.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiKeyResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        ApiKeyResponse {
            id: key.id,
            name: key.name,
            created_at: key.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_format() {
        let key = generate_api_key();
        assert!(key.starts_with(API_KEY_PREFIX));
        assert_eq!(key.len(), API_KEY_PREFIX.len() + 40);
        assert!(key[API_KEY_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let key = generate_api_key();
        assert_eq!(hash_api_key(&key), hash_api_key(&key));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_api_key("lx_live_0000");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash_api_key("lx_live_0000"), hash_api_key("lx_live_0001"));
    }

    #[test]
    fn test_api_key_response_drops_hash() {
        let key = ApiKey {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            key_hash: "deadbeef".to_string(),
            name: "ci".to_string(),
            created_at: Utc::now(),
        };
        let response = ApiKeyResponse::from(key);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("key_hash").is_none());
        assert_eq!(json["name"], "ci");
    }

    #[test]
    fn test_create_request_validates_name_length() {
        let request = CreateApiKeyRequest {
            name: String::new(),
        };
        assert!(request.validate().is_err());

        let request = CreateApiKeyRequest {
            name: "a".repeat(101),
        };
        assert!(request.validate().is_err());

        let request = CreateApiKeyRequest {
            name: "deploy bot".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
