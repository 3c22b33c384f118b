//! Integration tests for WordPress media uploads.

#![allow(clippy::unwrap_used)]

use woo_listing_client::wordpress::{MediaClient, MediaError};
use woo_listing_integration_tests::{MEDIA_PATH, MockReply, MockStore};

async fn setup() -> (MockStore, MediaClient) {
    let store = MockStore::start().await.expect("Failed to start mock store");
    let config = store.config().expect("Failed to build config");
    let media = MediaClient::new(
        reqwest::Client::new(),
        &config.store_url,
        Some(config.wordpress.clone()),
    );
    (store, media)
}

#[tokio::test]
async fn test_upload_returns_source_url() {
    let (store, media) = setup().await;
    store.reply_to_media(MockReply::new(
        201,
        r#"{"id":7,"source_url":"https://cdn.example.com/uploads/photo.jpg","media_type":"image"}"#,
    ));

    let url = media.upload("photo.jpg", vec![0xFF, 0xD8]).await.unwrap();
    assert_eq!(url, "https://cdn.example.com/uploads/photo.jpg");

    let requests = store.requests_to(MEDIA_PATH);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(
        requests[0].header("content-disposition"),
        Some("attachment; filename=photo.jpg")
    );
    assert_eq!(requests[0].body.as_ref(), &[0xFF_u8, 0xD8]);
}

#[tokio::test]
async fn test_content_type_follows_suffix() {
    let (store, media) = setup().await;

    for filename in ["photo.JPG", "photo.jpeg", "photo.png", "photo.gif"] {
        media.upload(filename, vec![1, 2, 3]).await.unwrap();
    }

    let content_types: Vec<String> = store
        .requests_to(MEDIA_PATH)
        .iter()
        .map(|r| r.header("content-type").unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        content_types,
        ["image/jpeg", "image/jpeg", "image/png", "image/png"]
    );
}

#[tokio::test]
async fn test_200_is_accepted() {
    let (store, media) = setup().await;
    store.reply_to_media(MockReply::new(
        200,
        r#"{"source_url":"https://cdn.example.com/a.png"}"#,
    ));

    assert_eq!(
        media.upload("a.png", vec![1]).await.unwrap(),
        "https://cdn.example.com/a.png"
    );
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let (store, media) = setup().await;
    store.reply_to_media(MockReply::new(
        401,
        r#"{"code":"rest_cannot_create","message":"Sorry, you are not allowed to upload"}"#,
    ));

    let err = media.upload("a.png", vec![1]).await.unwrap_err();
    let MediaError::Status { status, body } = err else {
        panic!("expected a status error, got {err:?}");
    };
    assert_eq!(status, 401);
    assert!(body.contains("rest_cannot_create"));
}

#[tokio::test]
async fn test_non_json_success_is_response_error() {
    let (store, media) = setup().await;
    store.reply_to_media(MockReply::new(201, "uploaded"));

    let err = media.upload("a.png", vec![1]).await.unwrap_err();
    assert!(matches!(err, MediaError::Response(_)));
}

#[tokio::test]
async fn test_empty_file_is_not_sent() {
    let (store, media) = setup().await;

    let err = media.upload("a.png", Vec::new()).await.unwrap_err();
    assert!(matches!(err, MediaError::EmptyUpload));
    assert!(store.requests().is_empty());
}

#[tokio::test]
async fn test_missing_credentials_is_not_sent() {
    let (store, _) = setup().await;
    let anonymous = MediaClient::new(reqwest::Client::new(), &store.url(), None);

    let err = anonymous.upload("a.png", vec![1]).await.unwrap_err();
    assert!(matches!(err, MediaError::MissingCredentials));
    assert!(store.requests().is_empty());
}
