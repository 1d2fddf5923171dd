//! # Core Broadcaster
//!
//! This module defines the publish/subscribe registry used to push newly created listings
//! into every view that displays them.
//!
//! ## Key Types
//!
//! - [`Broadcaster`]: Cloneable handle to a shared subscriber registry.
//! - [`SubscriptionId`]: Handle returned by `subscribe`, used to unsubscribe.
//! - [`FaultPolicy`]: What `publish` does when a subscriber fails.
//! - [`PublishReport`]: Outcome of one publish pass.

use std::fmt::Display;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{PublishError, SubscriberError};

/// Callback invoked with each published payload.
pub type Callback<T> = Arc<dyn Fn(&T) -> Result<(), SubscriberError> + Send + Sync>;

/// Identifies one registration. Registering the same callback twice yields two ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "subscription_{}", self.0)
    }
}

/// How `publish` reacts to a failing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaultPolicy {
    /// Log the failure, keep notifying the rest, report every failure.
    #[default]
    Isolate,
    /// Stop at the first failure; later subscribers are not notified.
    Abort,
}

impl FromStr for FaultPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolate" => Ok(FaultPolicy::Isolate),
            "abort" => Ok(FaultPolicy::Abort),
            other => Err(format!("unknown fault policy: {other}")),
        }
    }
}

/// A subscriber that returned an error during an isolated publish.
#[derive(Debug)]
pub struct SubscriberFailure {
    pub subscription: SubscriptionId,
    pub error: SubscriberError,
}

/// Outcome of a publish pass.
#[derive(Debug, Default)]
pub struct PublishReport {
    /// Subscribers that handled the payload successfully.
    pub delivered: usize,
    pub failures: Vec<SubscriberFailure>,
}

impl PublishReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

struct Subscriber<T> {
    id: SubscriptionId,
    callback: Callback<T>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

struct Registry<T> {
    subscribers: Mutex<Vec<Subscriber<T>>>,
    next_id: AtomicU64,
    policy: FaultPolicy,
}

/// Publish/subscribe channel for a payload type `T`.
///
/// # Architecture Note
/// The broadcaster is a handle: clones share one registry, so the assembly code can pass
/// the same channel to producers and consumers. It never inspects or transforms payloads.
///
/// **Delivery**: `publish` runs every callback synchronously, in registration order, on
/// the calling thread. It works on a snapshot of the registry taken before the first
/// callback runs, and the lock is released before any callback is invoked, so a callback
/// may subscribe or unsubscribe (itself or others) without deadlocking or disturbing the
/// current pass. There is no replay: subscribers only see payloads published after they
/// registered.
pub struct Broadcaster<T> {
    inner: Arc<Registry<T>>,
}

impl<T> Clone for Broadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Broadcaster<T> {
    fn default() -> Self {
        Self::new(FaultPolicy::default())
    }
}

impl<T> Broadcaster<T> {
    pub fn new(policy: FaultPolicy) -> Self {
        Self {
            inner: Arc::new(Registry {
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                policy,
            }),
        }
    }

    pub fn policy(&self) -> FaultPolicy {
        self.inner.policy
    }

    // The guarded Vec is only pushed to or spliced, so a poisoned lock still holds a
    // consistent registry.
    fn registry(&self) -> MutexGuard<'_, Vec<Subscriber<T>>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `callback` and returns the handle that removes it again.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) -> Result<(), SubscriberError> + Send + Sync + 'static,
    {
        self.subscribe_shared(Arc::new(callback))
    }

    /// Registers an already shared callback. The same `Arc` may be registered many times.
    pub fn subscribe_shared(&self, callback: Callback<T>) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let mut subscribers = self.registry();
        subscribers.push(Subscriber { id, callback });
        info!(%id, size = subscribers.len(), "Subscribed");
        id
    }

    /// Removes one registration. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.registry();
        match subscribers.iter().position(|s| s.id == id) {
            Some(index) => {
                subscribers.remove(index);
                info!(%id, size = subscribers.len(), "Unsubscribed");
                true
            }
            None => {
                debug!(%id, "Unsubscribe ignored, not registered");
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry().is_empty()
    }

    /// Delivers `payload` to every current subscriber.
    ///
    /// Under [`FaultPolicy::Isolate`] this always returns `Ok`, with failures collected
    /// in the report. Under [`FaultPolicy::Abort`] the first failure ends the pass.
    pub fn publish(&self, payload: &T) -> Result<PublishReport, PublishError> {
        let snapshot: Vec<Subscriber<T>> = self.registry().clone();
        let total = snapshot.len();
        debug!(subscribers = total, policy = ?self.inner.policy, "Publish");

        let mut report = PublishReport::default();
        for (index, subscriber) in snapshot.into_iter().enumerate() {
            match (subscriber.callback)(payload) {
                Ok(()) => report.delivered += 1,
                Err(error) => match self.inner.policy {
                    FaultPolicy::Isolate => {
                        warn!(id = %subscriber.id, error = %error, "Subscriber failed");
                        report.failures.push(SubscriberFailure {
                            subscription: subscriber.id,
                            error,
                        });
                    }
                    FaultPolicy::Abort => {
                        let skipped = total - index - 1;
                        warn!(id = %subscriber.id, error = %error, skipped, "Publish aborted");
                        return Err(PublishError::Aborted {
                            subscription: subscriber.id,
                            skipped,
                            source: error,
                        });
                    }
                },
            }
        }

        info!(
            delivered = report.delivered,
            failed = report.failures.len(),
            "Published"
        );
        Ok(report)
    }
}

// =============================================================================
// TESTS
// =============================================================================
