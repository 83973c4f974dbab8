//! Handles for transient page elements.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle of an element the engine inserts and later removes: a notification,
/// a click ripple or the search overlay.
///
/// Handles are allocated in increasing order per page, so ordering by handle
/// is insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransientId(u64);

impl TransientId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The next handle after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for TransientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
