//! # bookstore-core: Catalog and Order Logic
//!
//! This crate holds the bookstore's domain model: authors, books, customers,
//! the order state machine and the catalog that ties them together. It does
//! no file or network I/O; persistence lives in `bookstore-store`, which
//! works with the [`CatalogSnapshot`] produced here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ bookstore-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  entity   │  │   order   │  │  catalog  │  │ snapshot  │  │   │
//! │  │   │  Author   │  │   Order   │  │ BookStore │  │  records  │  │   │
//! │  │   │  Book     │  │  process  │  │  NextIds  │  │  restore  │  │   │
//! │  │   │  Customer │  │  cancel   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   money • types • error • validation                            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CatalogSnapshot                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bookstore-store (I/O Layer)                     │   │
//! │  │          JSON / XML codecs, TOML config, data files             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Identifiers, entity kinds and order status
//! - [`money`] - Money type with integer arithmetic
//! - [`entity`] - Author, Book and Customer
//! - [`order`] - The order state machine
//! - [`catalog`] - The `BookStore` aggregate
//! - [`snapshot`] - Flat records for persistence and graph rebuild
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule checks
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::{BookStore, Money};
//!
//! let mut store = BookStore::new();
//! let author = store.add_author("Leo Tolstoy", Some("Russia"), None).id();
//! let book = store
//!     .add_book("War and Peace", author, Money::from_cents(50000), None)
//!     .unwrap()
//!     .id();
//! let ivan = store
//!     .add_customer("Ivan", "ivan@mail.ru", Money::from_cents(100000))
//!     .id();
//!
//! let order = store.create_order(ivan, &[book]).unwrap().id();
//! assert!(store.process_order(order).unwrap());
//! assert_eq!(store.find_customer(ivan).unwrap().balance().cents(), 50000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod entity;
pub mod error;
pub mod money;
pub mod order;
pub mod snapshot;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{BookStore, NextIds};
pub use entity::{Author, Book, Customer};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use order::Order;
pub use snapshot::{
    AuthorRecord, BookRecord, CatalogSnapshot, CustomerRecord, OrderRecord, RestoreIssue,
    Restored,
};
pub use types::*;
