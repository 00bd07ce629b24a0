//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  └── CoreError        - Domain failures (not found, bad price, ...)    │
//! │                                                                         │
//! │  bookstore-store errors (separate crate)                               │
//! │  └── StoreError       - File / codec failures                          │
//! │                                                                         │
//! │  Flow: CoreError → StoreError → caller                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors vs. Boolean Results
//! Not every failure is an error. `process_order` reports a balance
//! shortfall as `Ok(false)` and `cancel_order` always succeeds; callers
//! branch on those booleans. Only lookups, price checks and referential
//! guards produce a `CoreError`.

use thiserror::Error;

use crate::money::Money;
use crate::types::{BookId, EntityKind, OrderId};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An entity lookup by id failed.
    ///
    /// ## When This Occurs
    /// - `find_book` / `find_customer` / `find_order` / `find_author` miss
    /// - `create_order` references an unknown customer or book (wrapped in
    ///   [`CoreError::OrderCreation`])
    #[error("{kind} with id {id} not found")]
    NotFound { kind: EntityKind, id: u64 },

    /// Customer balance does not cover the amount due.
    ///
    /// Order processing never returns this: a shortfall there is a plain
    /// `false`. It is produced only by the explicit affordability check.
    #[error("{customer} has insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds {
        customer: String,
        balance: Money,
        required: Money,
    },

    /// Book price is zero or negative.
    #[error("Invalid book price: {0}")]
    InvalidPrice(Money),

    /// Deposit amount is zero or negative.
    #[error("Invalid amount: {0} (must be greater than zero)")]
    InvalidAmount(Money),

    /// Book rating is NaN or infinite.
    #[error("Invalid rating: {0} (must be a finite number)")]
    InvalidRating(f64),

    /// Book cannot be removed while an order snapshot still holds it.
    #[error("Book {book} is referenced by orders {orders:?}")]
    BookReferenced { book: BookId, orders: Vec<OrderId> },

    /// Order creation failed while resolving its customer or books.
    #[error("Failed to create order: {0}")]
    OrderCreation(#[source] Box<CoreError>),
}

impl CoreError {
    /// Creates a NotFound error for the given entity kind and raw id.
    pub fn not_found(kind: EntityKind, id: impl Into<u64>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates an InsufficientFunds error for a customer.
    pub fn insufficient_funds(
        customer: impl Into<String>,
        balance: Money,
        required: Money,
    ) -> Self {
        CoreError::InsufficientFunds {
            customer: customer.into(),
            balance,
            required,
        }
    }

    /// Returns the innermost error, unwrapping creation context.
    ///
    /// ```rust
    /// use bookstore_core::{CoreError, EntityKind};
    ///
    /// let err = CoreError::OrderCreation(Box::new(CoreError::not_found(EntityKind::Book, 9u64)));
    /// assert!(matches!(err.root_cause(), CoreError::NotFound { kind: EntityKind::Book, id: 9 }));
    /// ```
    pub fn root_cause(&self) -> &CoreError {
        match self {
            CoreError::OrderCreation(inner) => inner.root_cause(),
            other => other,
        }
    }

    /// Returns true if this error (or the error it wraps) is a NotFound.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), CoreError::NotFound { .. })
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
