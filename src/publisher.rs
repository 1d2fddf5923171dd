//! Producer side of the listing channel.
//!
//! The listing-creation flow hands its record to a [`ListingPublisher`], which serializes
//! it and publishes it on the [`ListingBroadcaster`]. No shape checks happen here; the
//! receiving catalog normalizes whatever arrives.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::broadcast::{ListingBroadcaster, PublishError, PublishReport};
use crate::model::RawListing;

#[derive(Debug, Error)]
pub enum PublisherError {
    #[error("Failed to encode listing: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Publishes newly created listings.
#[derive(Clone)]
pub struct ListingPublisher {
    broadcaster: ListingBroadcaster,
}

impl ListingPublisher {
    pub fn new(broadcaster: ListingBroadcaster) -> Self {
        Self { broadcaster }
    }

    #[instrument(skip(self, record), fields(title = ?record.title))]
    pub fn publish(&self, record: &RawListing) -> Result<PublishReport, PublisherError> {
        let value = serde_json::to_value(record)?;
        debug!(?value, "Publishing listing");
        Ok(self.broadcaster.publish(&value)?)
    }

    /// Publishes a record exactly as received, e.g. a back-end response body.
    pub fn publish_value(&self, value: &Value) -> Result<PublishReport, PublisherError> {
        Ok(self.broadcaster.publish(value)?)
    }

    /// Publishes the back-end's confirmed record when there is one, otherwise the record
    /// that was submitted.
    pub fn publish_created(
        &self,
        submitted: &RawListing,
        confirmed: Option<Value>,
    ) -> Result<PublishReport, PublisherError> {
        match confirmed {
            Some(value) if !value.is_null() => self.publish_value(&value),
            _ => self.publish(submitted),
        }
    }
}
