// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Observer handles and their identity.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ObserverError;

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an [`Observer`].
///
/// IDs are unique within the process. Clones of an observer share its ID, so
/// subscribing a clone of an already-subscribed observer is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", self.0)
    }
}

type Callback = Arc<dyn Fn() -> Result<(), ObserverError> + Send + Sync>;

/// An opaque observer handle.
///
/// The handle is invoked with no arguments whenever the device it is
/// subscribed to changes state. Equality and hashing use the
/// [`SubscriptionId`] assigned at construction, never the closure.
///
/// # Examples
///
/// ```
/// use yolink_hub::subscription::Observer;
///
/// let a = Observer::infallible(|| {});
/// let b = a.clone();
/// let c = Observer::infallible(|| {});
///
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// ```
#[derive(Clone)]
pub struct Observer {
    id: SubscriptionId,
    callback: Callback,
}

impl Observer {
    /// Creates an observer from a fallible callback.
    #[must_use]
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn() -> Result<(), ObserverError> + Send + Sync + 'static,
    {
        Self {
            id: SubscriptionId::next(),
            callback: Arc::new(callback),
        }
    }

    /// Creates an observer from a callback that cannot fail.
    #[must_use]
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move || {
            callback();
            Ok(())
        })
    }

    /// Returns the identity of this observer.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Invokes the callback.
    ///
    /// # Errors
    ///
    /// Returns whatever error the callback returns.
    pub fn invoke(&self) -> Result<(), ObserverError> {
        (self.callback)()
    }
}

impl PartialEq for Observer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Observer {}

impl Hash for Observer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
