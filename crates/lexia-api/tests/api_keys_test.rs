//! API key and user provisioning integration tests.
//!
//! Run with: `cargo test -p lexia-api --features integration-tests --test api_keys_test`
//! Requires Docker for testcontainers (Postgres).

#![cfg(feature = "integration-tests")]

mod helpers;

use helpers::{api_path, create_test_user, setup_test_app, TEST_MASTER_API_KEY};
use lexia_db::UserRepository;

#[tokio::test]
async fn test_create_api_key() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/api-keys"))
        .add_header(
            "Authorization",
            format!("Bearer {}", TEST_MASTER_API_KEY),
        )
        .json(&serde_json::json!({ "name": "CI key" }))
        .await;

    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();
    let api_key = data["api_key"].as_str().expect("raw key in response");
    assert!(api_key.starts_with("lx_live_"));
    assert_eq!(api_key.len(), "lx_live_".len() + 40);
    assert_eq!(data["name"], "CI key");
    assert!(data["id"].as_str().is_some());
    assert!(data["created_at"].as_str().is_some());
}

#[tokio::test]
async fn test_create_api_key_requires_name() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/api-keys"))
        .add_header(
            "Authorization",
            format!("Bearer {}", TEST_MASTER_API_KEY),
        )
        .json(&serde_json::json!({ "name": "" }))
        .await;
    assert_eq!(response.status_code(), 400);

    let response = client
        .post(&api_path("/api-keys"))
        .add_header(
            "Authorization",
            format!("Bearer {}", TEST_MASTER_API_KEY),
        )
        .json(&serde_json::json!({ "name": "   " }))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_created_key_authenticates() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post(&api_path("/api-keys"))
        .add_header(
            "Authorization",
            format!("Bearer {}", TEST_MASTER_API_KEY),
        )
        .json(&serde_json::json!({ "name": "worker" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();
    let api_key = data["api_key"].as_str().unwrap();

    let response = client
        .get(&api_path("/documents"))
        .add_header("Authorization", format!("Bearer {}", api_key))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_list_api_keys_never_exposes_secrets() {
    let app = setup_test_app().await;
    let client = app.client();

    let (_user_id, key) = create_test_user(client, "keyowner").await;

    let response = client
        .get(&api_path("/api-keys"))
        .add_header("Authorization", format!("Bearer {}", key))
        .await;

    assert_eq!(response.status_code(), 200);
    let data: serde_json::Value = response.json();
    let keys = data.as_array().expect("key list");
    assert!(!keys.is_empty());
    for entry in keys {
        assert!(entry.get("key_hash").is_none());
        assert!(entry.get("api_key").is_none());
        assert!(entry["name"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_revoke_api_key() {
    let app = setup_test_app().await;
    let client = app.client();

    let (_user_id, default_key) = create_test_user(client, "revoker").await;

    // Mint a second key, then revoke it with the first.
    let response = client
        .post(&api_path("/api-keys"))
        .add_header("Authorization", format!("Bearer {}", default_key))
        .json(&serde_json::json!({ "name": "short-lived" }))
        .await;
    assert_eq!(response.status_code(), 201);
    let data: serde_json::Value = response.json();
    let second_key = data["api_key"].as_str().unwrap().to_string();
    let second_key_id = data["id"].as_str().unwrap().to_string();

    let response = client
        .delete(&api_path(&format!("/api-keys/{}", second_key_id)))
        .add_header("Authorization", format!("Bearer {}", default_key))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "API key revoked successfully");

    // The revoked key no longer authenticates.
    let response = client
        .get(&api_path("/documents"))
        .add_header("Authorization", format!("Bearer {}", second_key))
        .await;
    assert_eq!(response.status_code(), 401);

    // Revoking twice is a 404.
    let response = client
        .delete(&api_path(&format!("/api-keys/{}", second_key_id)))
        .add_header("Authorization", format!("Bearer {}", default_key))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_revoke_foreign_key_is_not_found() {
    let app = setup_test_app().await;
    let client = app.client();

    let (_alice_id, alice_key) = create_test_user(client, "alice").await;
    let (_bob_id, bob_key) = create_test_user(client, "bob").await;

    let response = client
        .post(&api_path("/api-keys"))
        .add_header("Authorization", format!("Bearer {}", alice_key))
        .json(&serde_json::json!({ "name": "alices" }))
        .await;
    let data: serde_json::Value = response.json();
    let alice_key_id = data["id"].as_str().unwrap();

    let response = client
        .delete(&api_path(&format!("/api-keys/{}", alice_key_id)))
        .add_header("Authorization", format!("Bearer {}", bob_key))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_create_user_requires_master_key() {
    let app = setup_test_app().await;
    let client = app.client();

    let (_user_id, key) = create_test_user(client, "plain-user").await;

    let response = client
        .post(&api_path("/users"))
        .add_header("Authorization", format!("Bearer {}", key))
        .json(&serde_json::json!({ "name": "sneaky" }))
        .await;

    assert_eq!(response.status_code(), 401);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_created_user_is_persisted() {
    let app = setup_test_app().await;
    let client = app.client();

    let (user_id, _key) = create_test_user(client, "persisted-user").await;

    let users = UserRepository::new(app.pool().clone());
    let user = users
        .get(user_id)
        .await
        .expect("user lookup")
        .expect("user exists");
    assert_eq!(user.name, "persisted-user");
}

#[tokio::test]
async fn test_api_keys_unauthorized_without_token() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client.get(&api_path("/api-keys")).await;
    assert_eq!(response.status_code(), 401);
}
