#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use serde_json::json;
use thumbnailer_core::{NotificationRecord, S3Notification};
use thumbnailer_lambda::{HandlerContext, ThumbnailHandler};
use thumbnailer_storage::{Storage, StorageBackend, StorageError, StorageResult, StoredObject};

pub const SOURCE_BUCKET: &str = "bucket";
pub const DEST_BUCKET: &str = "dest";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Get {
        bucket: String,
        key: String,
    },
    Put {
        bucket: String,
        key: String,
        content_type: Option<String>,
    },
}

/// In-memory storage that records every call
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    calls: Mutex<Vec<StorageCall>>,
    fail_get: Mutex<Option<String>>,
    fail_put: Mutex<Option<String>>,
}

impl MockStorage {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, bucket: &str, key: &str, data: Vec<u8>, content_type: Option<&str>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject::new(data, content_type.map(str::to_owned)),
        );
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn fail_gets_with(&self, message: &str) {
        *self.fail_get.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_puts_with(&self, message: &str) {
        *self.fail_put.lock().unwrap() = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn put_calls(&self) -> Vec<StorageCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, StorageCall::Put { .. }))
            .collect()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        self.calls.lock().unwrap().push(StorageCall::Get {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        if let Some(message) = self.fail_get.lock().unwrap().clone() {
            return Err(StorageError::DownloadFailed(message));
        }

        self.object(bucket, key).ok_or_else(|| StorageError::NotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        self.calls.lock().unwrap().push(StorageCall::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.map(str::to_owned),
        });

        if let Some(message) = self.fail_put.lock().unwrap().clone() {
            return Err(StorageError::UploadFailed(message));
        }

        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject::new(data, content_type.map(str::to_owned)),
        );
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

pub fn handler_with(storage: Arc<MockStorage>, dest_bucket: Option<&str>) -> ThumbnailHandler {
    let context = HandlerContext::new(storage, dest_bucket.map(str::to_owned));
    ThumbnailHandler::new(Arc::new(context))
}

pub fn record(key: &str) -> NotificationRecord {
    NotificationRecord::new("2024-05-01T12:00:00.000Z", SOURCE_BUCKET, key)
}

pub fn notification(keys: &[&str]) -> S3Notification {
    let records: Vec<_> = keys
        .iter()
        .map(|key| {
            json!({
                "eventTime": "2024-05-01T12:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": SOURCE_BUCKET },
                    "object": { "key": key, "size": 1 }
                }
            })
        })
        .collect();
    serde_json::from_value(json!({ "Records": records })).unwrap()
}

pub fn png_image(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    buffer
}

pub fn jpeg_image(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 120, 40]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
        .unwrap();
    buffer
}
