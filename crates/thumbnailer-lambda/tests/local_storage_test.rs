mod helpers;

use std::sync::Arc;

use bytes::Bytes;
use helpers::{jpeg_image, notification, SOURCE_BUCKET};
use image::GenericImageView;
use tempfile::TempDir;
use thumbnailer_lambda::{HandlerContext, ThumbnailHandler};
use thumbnailer_storage::{LocalStorage, Storage};

async fn setup(dest_bucket: &str) -> (ThumbnailHandler, LocalStorage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path()).await.unwrap();
    let context = HandlerContext::new(Arc::new(storage.clone()), Some(dest_bucket.to_string()));
    (ThumbnailHandler::new(Arc::new(context)), storage, temp_dir)
}

#[tokio::test]
async fn test_end_to_end_with_local_storage() {
    let (handler, storage, _temp_dir) = setup("thumbnails").await;
    storage
        .put_object(
            SOURCE_BUCKET,
            "uploads/summer trip.jpg",
            Bytes::from(jpeg_image(1600, 1200)),
            Some("image/jpeg"),
        )
        .await
        .unwrap();

    let response = handler
        .handle_event(notification(&["uploads/summer+trip.jpg"]))
        .await
        .unwrap()
        .expect("successful invocation returns a response");

    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body,
        "Successfully resized bucket/uploads/summer trip.jpg and uploaded to thumbnails/uploads/summer trip.jpg"
    );

    let thumbnail = storage
        .get_object("thumbnails", "uploads/summer trip.jpg")
        .await
        .unwrap();
    assert_eq!(thumbnail.content_type.as_deref(), Some("image/jpeg"));

    let decoded = image::load_from_memory(&thumbnail.data).unwrap();
    assert_eq!(decoded.dimensions(), (200, 150));

    // Source object is left untouched
    let source = storage
        .get_object(SOURCE_BUCKET, "uploads/summer trip.jpg")
        .await
        .unwrap();
    let decoded = image::load_from_memory(&source.data).unwrap();
    assert_eq!(decoded.dimensions(), (1600, 1200));
}

#[tokio::test]
async fn test_missing_local_object_completes_without_response() {
    let (handler, storage, _temp_dir) = setup("thumbnails").await;

    let response = handler
        .handle_event(notification(&["nowhere.png"]))
        .await
        .unwrap();

    assert!(response.is_none());
    assert!(storage.get_object("thumbnails", "nowhere.png").await.is_err());
}
