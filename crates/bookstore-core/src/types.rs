//! # Domain Types
//!
//! Identifier newtypes and small enums shared by every entity.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────┐ ┌─────────────┐       │
//! │  │  AuthorId   │ │   BookId    │ │ CustomerId  │ │   OrderId   │       │
//! │  │  (u64)      │ │   (u64)     │ │   (u64)     │ │   (u64)     │       │
//! │  └─────────────┘ └─────────────┘ └─────────────┘ └─────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────────────────┐            │
//! │  │   EntityKind    │   │          OrderStatus             │            │
//! │  │  Author, Book,  │   │  Created ──► Completed           │            │
//! │  │  Customer, Order│   │     │            │               │            │
//! │  └─────────────────┘   │     └────────────┴──► Cancelled  │            │
//! │                        └──────────────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are assigned by the catalog from per-kind counters that start
//! at 1 and never go backwards.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Defines a type-safe identifier wrapper around `u64`.
///
/// Each generated type is `Copy`, ordered, transparent in serde and
/// converts to and from `u64`.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an id from its raw value.
            #[inline]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw value.
            #[inline]
            pub const fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of an [`Author`](crate::entity::Author).
    AuthorId
);
define_id!(
    /// Identifier of a [`Book`](crate::entity::Book).
    BookId
);
define_id!(
    /// Identifier of a [`Customer`](crate::entity::Customer).
    CustomerId
);
define_id!(
    /// Identifier of an [`Order`](crate::order::Order).
    OrderId
);

// =============================================================================
// Entity Kind
// =============================================================================

/// The kind of entity a lookup was for, carried by `NotFound` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Author,
    Book,
    Customer,
    Order,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Author => "Author",
            EntityKind::Book => "Book",
            EntityKind::Customer => "Customer",
            EntityKind::Order => "Order",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order in its lifecycle.
///
/// State transitions:
/// ```text
/// Created ──────► Completed
///    │               │
///    └───────────────┴──► Cancelled
/// ```
///
/// ## Legacy label matching
/// Persisted files carry the status as a free-form label. The "is this
/// order still open" guard has always compared case-insensitively against
/// `created`, while the completed/cancelled checks compare exactly. Both
/// spellings ever written to disk (`Completed` / `completed`, and likewise
/// for cancelled) are accepted; any other label is kept verbatim as
/// [`OrderStatus::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OrderStatus {
    /// Order placed, nothing debited yet.
    #[default]
    Created,

    /// Customer was debited and received the books (terminal on the success path).
    Completed,

    /// Order was cancelled, refunding if it had been completed.
    Cancelled,

    /// A persisted label that matches none of the known states.
    Unrecognized(String),
}

impl OrderStatus {
    /// Parses a persisted status label.
    ///
    /// ```rust
    /// use bookstore_core::OrderStatus;
    ///
    /// assert_eq!(OrderStatus::from_label("CREATED"), OrderStatus::Created);
    /// assert_eq!(OrderStatus::from_label("completed"), OrderStatus::Completed);
    /// assert!(matches!(OrderStatus::from_label("COMPLETED"), OrderStatus::Unrecognized(_)));
    /// ```
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("created") {
            return OrderStatus::Created;
        }
        match label {
            "Completed" | "completed" => OrderStatus::Completed,
            "Cancelled" | "cancelled" => OrderStatus::Cancelled,
            other => OrderStatus::Unrecognized(other.to_string()),
        }
    }

    /// Returns the label written to disk.
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Unrecognized(label) => label,
        }
    }

    /// Returns true if the order can still be processed.
    pub fn can_process(&self) -> bool {
        matches!(self, OrderStatus::Created)
    }

    /// Returns true if cancelling must refund the customer.
    pub fn refunds_on_cancel(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_label(&label))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
