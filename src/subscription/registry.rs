// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer set and notification fan-out.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{Observer, SubscriptionId};
use crate::error::{Error, Result};

/// What [`ObserverRegistry::notify`] does when an observer fails.
///
/// An observer fails when it returns an error or panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Log the failure and keep delivering to the remaining observers.
    #[default]
    Isolated,
    /// Stop at the first failure and return it as an error.
    FailFast,
}

/// A single failed delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    /// The observer that failed.
    pub subscription: SubscriptionId,
    /// Why it failed.
    pub reason: String,
}

impl From<DeliveryFailure> for Error {
    fn from(failure: DeliveryFailure) -> Self {
        Self::ObserverInvocationFailed {
            subscription: failure.subscription,
            reason: failure.reason,
        }
    }
}

/// Outcome of one notification round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Number of observers that ran to completion.
    pub delivered: usize,
    /// Observers that failed. Always empty under [`DeliveryPolicy::FailFast`].
    pub failures: Vec<DeliveryFailure>,
}

impl Delivery {
    /// Returns `true` if no observer failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of observers that were invoked.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }
}

/// Set of observers owned by one device.
///
/// The set never holds two observers with the same [`SubscriptionId`].
/// Notification snapshots the set and releases the lock before invoking
/// anything, so observers may subscribe or unsubscribe (themselves included)
/// while being notified. Such changes take effect from the next round.
pub struct ObserverRegistry {
    observers: RwLock<HashMap<SubscriptionId, Observer>>,
    policy: DeliveryPolicy,
}

impl ObserverRegistry {
    /// Creates an empty registry with the given delivery policy.
    #[must_use]
    pub fn new(policy: DeliveryPolicy) -> Self {
        Self {
            observers: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Returns the delivery policy.
    #[must_use]
    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    /// Adds an observer.
    ///
    /// Returns `true` if the observer was not already present.
    pub fn subscribe(&self, observer: &Observer) -> bool {
        let mut observers = self.observers.write();
        if observers.contains_key(&observer.id()) {
            return false;
        }
        observers.insert(observer.id(), observer.clone());
        tracing::debug!(subscription = %observer.id(), "Observer subscribed");
        true
    }

    /// Removes an observer. Removing an absent observer is a no-op.
    ///
    /// Returns `true` if the observer was present.
    pub fn unsubscribe(&self, observer: &Observer) -> bool {
        self.unsubscribe_id(observer.id())
    }

    /// Removes an observer by its ID. Removing an absent ID is a no-op.
    ///
    /// Returns `true` if the observer was present.
    pub fn unsubscribe_id(&self, id: SubscriptionId) -> bool {
        let removed = self.observers.write().remove(&id).is_some();
        if removed {
            tracing::debug!(subscription = %id, "Observer unsubscribed");
        }
        removed
    }

    /// Returns `true` if the observer is subscribed.
    #[must_use]
    pub fn contains(&self, observer: &Observer) -> bool {
        self.observers.read().contains_key(&observer.id())
    }

    /// Returns the number of subscribed observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.read().len()
    }

    /// Returns `true` if no observer is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.read().is_empty()
    }

    /// Removes every observer.
    pub fn clear(&self) {
        self.observers.write().clear();
    }

    /// Invokes every subscribed observer once, in unspecified order.
    ///
    /// # Errors
    ///
    /// Under [`DeliveryPolicy::FailFast`], returns
    /// [`Error::ObserverInvocationFailed`] for the first observer that fails;
    /// observers not yet invoked are skipped. Under
    /// [`DeliveryPolicy::Isolated`] this never fails; failures are logged and
    /// reported in the returned [`Delivery`].
    pub fn notify(&self) -> Result<Delivery> {
        let snapshot: Vec<Observer> = self.observers.read().values().cloned().collect();
        let mut delivery = Delivery::default();

        for observer in &snapshot {
            match invoke_isolated(observer) {
                Ok(()) => delivery.delivered += 1,
                Err(failure) => match self.policy {
                    DeliveryPolicy::FailFast => return Err(failure.into()),
                    DeliveryPolicy::Isolated => {
                        tracing::warn!(
                            subscription = %failure.subscription,
                            reason = %failure.reason,
                            "Observer failed, continuing delivery"
                        );
                        delivery.failures.push(failure);
                    }
                },
            }
        }

        Ok(delivery)
    }
}

fn invoke_isolated(observer: &Observer) -> std::result::Result<(), DeliveryFailure> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer.invoke()));
    let reason = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(err)) => err.message().to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };
    Err(DeliveryFailure {
        subscription: observer.id(),
        reason,
    })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new(DeliveryPolicy::default())
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observer_count", &self.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
