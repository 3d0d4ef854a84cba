//! Concurrency integration tests: parallel uploads and parallel analysis on a
//! single completed document.
//!
//! Run with: `cargo test -p lexia-api --features integration-tests --test concurrent_test`
//! Requires Docker for testcontainers (Postgres).

#![cfg(feature = "integration-tests")]

mod helpers;

use futures::future::join_all;
use helpers::fixtures;
use helpers::{
    api_path, setup_test_app, setup_test_app_with_generation, spawn_generation_stub_with_text,
    upload_completed_txt, upload_file, TEST_MASTER_API_KEY,
};

#[tokio::test]
async fn test_concurrent_uploads_create_distinct_documents() {
    let app = setup_test_app().await;
    let client = app.client();

    let num_files = 5;
    let uploads: Vec<_> = (0..num_files)
        .map(|i| {
            let file_name = format!("contract-{}.txt", i);
            async move {
                upload_file(
                    client,
                    TEST_MASTER_API_KEY,
                    fixtures::create_test_txt(),
                    &file_name,
                    "text/plain",
                )
                .await
            }
        })
        .collect();

    let responses = join_all(uploads).await;

    let mut ids = std::collections::HashSet::new();
    for response in responses {
        assert_eq!(response.status_code(), 201);
        let data: serde_json::Value = response.json();
        assert_eq!(data["processing_status"], "completed");
        ids.insert(data["id"].as_str().expect("document id").to_string());
    }
    assert_eq!(ids.len(), num_files);

    let response = client
        .get(&api_path("/documents"))
        .add_header("Authorization", format!("Bearer {}", TEST_MASTER_API_KEY))
        .await;
    let documents: serde_json::Value = response.json();
    assert_eq!(documents.as_array().expect("document list").len(), num_files);
}

#[tokio::test]
async fn test_concurrent_analysis_on_one_document() {
    let base_url = spawn_generation_stub_with_text("A short summary.").await;
    let app =
        setup_test_app_with_generation(Some("test-gemini-key".to_string()), Some(base_url)).await;
    let client = app.client();

    let document_id = upload_completed_txt(client, TEST_MASTER_API_KEY).await;

    // The record is read-only after upload, so parallel operations must all
    // see the same completed document.
    let path = api_path(&format!("/documents/{}/summary", document_id));
    let calls: Vec<_> = (0..4)
        .map(|_| {
            let path = path.clone();
            async move {
                client
                    .post(&path)
                    .add_header("Authorization", format!("Bearer {}", TEST_MASTER_API_KEY))
                    .await
            }
        })
        .collect();

    let responses = join_all(calls).await;

    for response in responses {
        assert_eq!(response.status_code(), 200);
        let data: serde_json::Value = response.json();
        assert_eq!(data["summary"], "A short summary.");
    }
}
