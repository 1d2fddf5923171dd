//! # Mock Subscriber
//!
//! Utilities for testing publishers without a real catalog view.
//!
//! A [`MockSubscriber`] records every payload it receives. Set how many deliveries you
//! expect with [`MockSubscriber::expect_deliveries`], optionally make it fail with
//! [`MockSubscriber::fail_with`], then call [`MockSubscriber::verify`].

use std::sync::{Arc, Mutex};

use super::{Broadcaster, SubscriberError, SubscriptionId};

/// A recording subscriber with expectation tracking.
///
/// # Example
/// ```
/// use textbook_exchange::broadcast::{Broadcaster, mock::MockSubscriber};
///
/// let broadcaster = Broadcaster::<u32>::default();
/// let mock = MockSubscriber::new();
/// mock.expect_deliveries(1);
/// mock.attach(&broadcaster);
///
/// broadcaster.publish(&42).unwrap();
///
/// mock.verify();
/// assert_eq!(mock.received(), vec![42]);
/// ```
pub struct MockSubscriber<T> {
    received: Arc<Mutex<Vec<T>>>,
    failure: Arc<Mutex<Option<String>>>,
    expected: Arc<Mutex<Option<usize>>>,
}

impl<T> Clone for MockSubscriber<T> {
    fn clone(&self) -> Self {
        Self {
            received: Arc::clone(&self.received),
            failure: Arc::clone(&self.failure),
            expected: Arc::clone(&self.expected),
        }
    }
}

impl<T: Clone + Send + 'static> Default for MockSubscriber<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> MockSubscriber<T> {
    pub fn new() -> Self {
        Self {
            received: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            expected: Arc::new(Mutex::new(None)),
        }
    }

    /// Expects exactly `count` deliveries by the time [`verify`](Self::verify) runs.
    pub fn expect_deliveries(&self, count: usize) -> &Self {
        *self.expected.lock().unwrap() = Some(count);
        self
    }

    /// Makes every following delivery return [`SubscriberError::Rejected`].
    /// The payload is still recorded.
    pub fn fail_with(&self, message: impl Into<String>) -> &Self {
        *self.failure.lock().unwrap() = Some(message.into());
        self
    }

    /// A callback suitable for [`Broadcaster::subscribe`].
    pub fn callback(&self) -> impl Fn(&T) -> Result<(), SubscriberError> + Send + Sync + 'static {
        let received = Arc::clone(&self.received);
        let failure = Arc::clone(&self.failure);
        move |payload: &T| {
            received.lock().unwrap().push(payload.clone());
            match failure.lock().unwrap().as_ref() {
                Some(message) => Err(SubscriberError::Rejected(message.clone())),
                None => Ok(()),
            }
        }
    }

    pub fn attach(&self, broadcaster: &Broadcaster<T>) -> SubscriptionId {
        broadcaster.subscribe(self.callback())
    }

    pub fn received(&self) -> Vec<T> {
        self.received.lock().unwrap().clone()
    }

    pub fn delivery_count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    /// Panics if the expected delivery count was not met.
    pub fn verify(&self) {
        if let Some(expected) = *self.expected.lock().unwrap() {
            let actual = self.delivery_count();
            if actual != expected {
                panic!("MockSubscriber expected {expected} deliveries, got {actual}");
            }
        }
    }
}
