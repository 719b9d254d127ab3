// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for devices that notify observers.

use crate::error::Result;
use crate::subscription::{Delivery, Observer, ObserverRegistry};

/// Trait for types that keep an observer set.
///
/// Implementors only provide [`observers`](Self::observers); the
/// subscription methods are derived from it.
///
/// # Examples
///
/// ```
/// use yolink_hub::subscription::{Observer, ObserverRegistry, Subscribable};
///
/// struct Doorbell {
///     observers: ObserverRegistry,
/// }
///
/// impl Subscribable for Doorbell {
///     fn observers(&self) -> &ObserverRegistry {
///         &self.observers
///     }
/// }
///
/// let bell = Doorbell { observers: ObserverRegistry::default() };
/// let observer = Observer::infallible(|| println!("ding"));
/// bell.subscribe(&observer);
/// bell.unsubscribe(&observer);
/// bell.unsubscribe(&observer); // absent: no-op
/// ```
pub trait Subscribable {
    /// Returns the observer set.
    fn observers(&self) -> &ObserverRegistry;

    /// Adds an observer. Returns `true` if it was not already subscribed.
    fn subscribe(&self, observer: &Observer) -> bool {
        self.observers().subscribe(observer)
    }

    /// Removes an observer. Returns `true` if it was subscribed.
    fn unsubscribe(&self, observer: &Observer) -> bool {
        self.observers().unsubscribe(observer)
    }

    /// Returns the number of subscribed observers.
    fn observer_count(&self) -> usize {
        self.observers().len()
    }

    /// Invokes every subscribed observer.
    ///
    /// # Errors
    ///
    /// See [`ObserverRegistry::notify`].
    fn notify(&self) -> Result<Delivery> {
        self.observers().notify()
    }
}
