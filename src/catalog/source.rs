//! Where the initial listing collection comes from.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::SourceError;

/// An external provider of listing records, typically a remote HTTP endpoint.
///
/// Records are returned as loose JSON; the [`Catalog`](super::Catalog) decodes and
/// normalizes them.
#[async_trait]
pub trait ListingSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError>;
}

/// Response body of the listings endpoint: `{ "success": bool, "data": [...], "error": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ListingEnvelope {
    pub fn from_json(body: Value) -> Result<Self, SourceError> {
        Ok(serde_json::from_value(body)?)
    }

    /// The records, or the server's error when `success` is false or `data` is missing.
    pub fn into_records(self) -> Result<Vec<Value>, SourceError> {
        match (self.success, self.data) {
            (true, Some(records)) => Ok(records),
            _ => Err(SourceError::Rejected(
                self.error
                    .unwrap_or_else(|| "invalid data format".to_string()),
            )),
        }
    }
}

/// In-memory source holding a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Value>,
}

impl StaticSource {
    pub fn new(records: Vec<Value>) -> Self {
        Self { records }
    }

    /// Builds a source from an endpoint response body.
    pub fn from_envelope(body: Value) -> Result<Self, SourceError> {
        let records = ListingEnvelope::from_json(body)?.into_records()?;
        Ok(Self::new(records))
    }
}

#[async_trait]
impl ListingSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        debug!(records = self.records.len(), "Serving static listings");
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success() {
        let source = StaticSource::from_envelope(json!({
            "success": true,
            "data": [{ "id": 1 }, { "id": 2 }]
        }))
        .unwrap();
        assert_eq!(source.records.len(), 2);
    }

    #[test]
    fn test_envelope_failure_carries_server_error() {
        let err = StaticSource::from_envelope(json!({
            "success": false,
            "error": "database offline"
        }))
        .unwrap_err();
        assert!(matches!(err, SourceError::Rejected(ref m) if m == "database offline"));
    }

    #[test]
    fn test_envelope_without_data_is_rejected() {
        let err = ListingEnvelope::from_json(json!({ "success": true }))
            .unwrap()
            .into_records()
            .unwrap_err();
        assert!(matches!(err, SourceError::Rejected(_)));
    }

    #[test]
    fn test_non_object_body_is_a_decode_error() {
        let err = ListingEnvelope::from_json(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_static_source_fetch() {
        let source = StaticSource::new(vec![json!({ "titulo": "Física" })]);
        let records = source.fetch().await.unwrap();
        assert_eq!(records, vec![json!({ "titulo": "Física" })]);
    }
}
