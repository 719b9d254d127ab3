// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer subscriptions for device state changes.
//!
//! Every simulated device keeps a set of opaque observer handles and invokes
//! all of them, with no arguments, each time its observable state changes.
//! Observers read the device back to learn the new state.
//!
//! # Overview
//!
//! - [`Observer`] - A cloneable callable handle with a stable identity
//! - [`SubscriptionId`] - The identity of an observer
//! - [`ObserverRegistry`] - The per-device observer set and its fan-out
//! - [`DeliveryPolicy`] - What happens when one observer fails
//! - [`Subscribable`] - Trait for types that accept observers
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use yolink_hub::subscription::{DeliveryPolicy, Observer, ObserverRegistry};
//!
//! let registry = ObserverRegistry::new(DeliveryPolicy::Isolated);
//! let calls = Arc::new(AtomicU32::new(0));
//! let counter = Arc::clone(&calls);
//! let observer = Observer::infallible(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! registry.subscribe(&observer);
//! registry.subscribe(&observer); // already present
//! assert_eq!(registry.len(), 1);
//!
//! registry.notify().unwrap();
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

mod observer;
mod registry;
mod subscribable;

pub use observer::{Observer, SubscriptionId};
pub use registry::{Delivery, DeliveryFailure, DeliveryPolicy, ObserverRegistry};
pub use subscribable::Subscribable;
