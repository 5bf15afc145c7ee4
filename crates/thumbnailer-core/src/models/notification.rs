//! S3 event notification payload
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! notification document is ignored during deserialization.

use serde::Deserialize;

use crate::error::AppError;
use crate::models::key::ResolvedKey;

#[derive(Debug, Clone, Deserialize)]
pub struct S3Notification {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3NotificationRecord {
    #[serde(rename = "eventTime", default)]
    pub event_time: String,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl S3Notification {
    /// Take the first record of the notification.
    ///
    /// Records after the first are not processed; the number dropped is
    /// returned alongside so the caller can log it.
    pub fn into_first_record(self) -> Result<(NotificationRecord, usize), AppError> {
        let total = self.records.len();
        let first = self
            .records
            .into_iter()
            .next()
            .ok_or_else(|| AppError::InvalidEvent("notification contains no records".to_string()))?;

        Ok((NotificationRecord::from(first), total - 1))
    }
}

/// A single object-created notification, consumed once per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRecord {
    pub event_time: String,
    pub source_bucket: String,
    /// Raw key as delivered: `+` for spaces and percent-escapes
    pub object_key: String,
}

impl NotificationRecord {
    pub fn new(
        event_time: impl Into<String>,
        source_bucket: impl Into<String>,
        object_key: impl Into<String>,
    ) -> Self {
        Self {
            event_time: event_time.into(),
            source_bucket: source_bucket.into(),
            object_key: object_key.into(),
        }
    }

    pub fn resolve_key(&self) -> Result<ResolvedKey, AppError> {
        ResolvedKey::resolve(&self.object_key)
    }
}

impl From<S3NotificationRecord> for NotificationRecord {
    fn from(record: S3NotificationRecord) -> Self {
        Self {
            event_time: record.event_time,
            source_bucket: record.s3.bucket.name,
            object_key: record.s3.object.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notification(keys: &[&str]) -> S3Notification {
        let records: Vec<_> = keys
            .iter()
            .map(|key| {
                json!({
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "awsRegion": "us-east-1",
                    "eventTime": "2024-05-01T12:00:00.000Z",
                    "eventName": "ObjectCreated:Put",
                    "s3": {
                        "s3SchemaVersion": "1.0",
                        "bucket": { "name": "uploads", "arn": "arn:aws:s3:::uploads" },
                        "object": { "key": key, "size": 1024, "eTag": "abc" }
                    }
                })
            })
            .collect();
        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    #[test]
    fn test_deserialize_s3_event() {
        let event = notification(&["photos/cat.png"]);
        assert_eq!(event.records.len(), 1);
        assert_eq!(event.records[0].event_time, "2024-05-01T12:00:00.000Z");
        assert_eq!(event.records[0].s3.bucket.name, "uploads");
        assert_eq!(event.records[0].s3.object.key, "photos/cat.png");
    }

    #[test]
    fn test_only_first_record_is_taken() {
        let event = notification(&["first.png", "second.png", "third.jpg"]);
        let (record, ignored) = event.into_first_record().unwrap();
        assert_eq!(record.object_key, "first.png");
        assert_eq!(record.source_bucket, "uploads");
        assert_eq!(ignored, 2);
    }

    #[test]
    fn test_empty_records_is_invalid_event() {
        let event: S3Notification = serde_json::from_value(json!({ "Records": [] })).unwrap();
        let err = event.into_first_record().unwrap_err();
        assert!(matches!(err, AppError::InvalidEvent(_)));

        let event: S3Notification = serde_json::from_value(json!({})).unwrap();
        assert!(event.into_first_record().is_err());
    }

    #[test]
    fn test_missing_object_key_fails_deserialization() {
        let result: Result<S3Notification, _> = serde_json::from_value(json!({
            "Records": [{ "s3": { "bucket": { "name": "uploads" }, "object": {} } }]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_resolves_its_key() {
        let record = NotificationRecord::new("t", "uploads", "my+photo%21.jpg");
        assert_eq!(record.resolve_key().unwrap().as_str(), "my photo!.jpg");
    }
}
