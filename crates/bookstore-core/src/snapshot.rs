//! # Catalog Snapshots
//!
//! A [`CatalogSnapshot`] is the flat, serializable picture of a
//! [`BookStore`]: the identifier counters plus one record per entity, with
//! every cross-reference stored as a raw id.
//!
//! ## Restore Pipeline
//! ```text
//! ┌──────────────┐   authors    ┌──────────────┐   books     ┌──────────────┐
//! │  snapshot    │ ───────────► │  author map  │ ──────────► │   book map   │
//! └──────────────┘              └──────────────┘  (author    └──────┬───────┘
//!                                                  must exist)      │
//!                          ┌────────────────────────────────────────┘
//!                          ▼
//!                  ┌──────────────┐   orders    ┌──────────────┐
//!                  │ customer map │ ──────────► │  order map   │
//!                  │ (unknown     │ (customer   │ (unknown     │
//!                  │  books drop) │  must exist)│  books drop) │
//!                  └──────────────┘             └──────────────┘
//! ```
//!
//! Money fields are written in dollars through [`major_units`], so files
//! stay readable by tools that expect `"price": 500.0`.
//!
//! Whatever cannot be resolved is skipped and listed in
//! [`Restored::issues`] so the caller can log it. Balances, order totals,
//! order dates and status labels are trusted as stored.
//!
//! Counters are raised to `max(id) + 1` when the stored value would hand
//! out an id that is already taken.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{BookStore, NextIds};
use crate::entity::{Author, Book, Customer};
use crate::money::{major_units, Money};
use crate::order::Order;
use crate::types::{AuthorId, BookId, CustomerId, EntityKind, OrderId, OrderStatus};

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub author_id: AuthorId,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub book_id: BookId,
    pub title: String,
    pub author_id: AuthorId,
    #[serde(with = "major_units")]
    pub price: Money,
    pub genre: String,
    #[serde(default, with = "finite_rating")]
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub name: String,
    pub email: String,
    #[serde(with = "major_units")]
    pub balance: Money,
    #[serde(default)]
    pub purchased_book_ids: Vec<BookId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub book_ids: Vec<BookId>,
    pub order_date: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(with = "major_units")]
    pub total_price: Money,
}

/// The whole catalog as plain records.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub next_ids: NextIds,
    #[serde(default)]
    pub authors: Vec<AuthorRecord>,
    #[serde(default)]
    pub books: Vec<BookRecord>,
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
}

// =============================================================================
// Restore Issues
// =============================================================================

/// Something in a snapshot that could not be restored as written.
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreIssue {
    /// Book skipped because its author is missing.
    MissingAuthor { book: BookId, author: AuthorId },

    /// Purchase entry dropped because the book is missing.
    MissingPurchasedBook { customer: CustomerId, book: BookId },

    /// Order skipped because its customer is missing.
    MissingOrderCustomer { order: OrderId, customer: CustomerId },

    /// Order line dropped because the book is missing.
    MissingOrderBook { order: OrderId, book: BookId },

    /// Book rating was not a finite number and was reset to zero.
    InvalidRating { book: BookId, rating: f64 },

    /// A later record reused an id; the earlier one was kept.
    DuplicateId { kind: EntityKind, id: u64 },

    /// The stored counter was behind the highest id and got raised.
    CounterRaised {
        kind: EntityKind,
        stored: u64,
        raised_to: u64,
    },
}

impl fmt::Display for RestoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestoreIssue::MissingAuthor { book, author } => {
                write!(f, "book {} skipped: author {} not found", book, author)
            }
            RestoreIssue::MissingPurchasedBook { customer, book } => {
                write!(f, "customer {}: purchased book {} not found", customer, book)
            }
            RestoreIssue::MissingOrderCustomer { order, customer } => {
                write!(f, "order {} skipped: customer {} not found", order, customer)
            }
            RestoreIssue::MissingOrderBook { order, book } => {
                write!(f, "order {}: book {} not found", order, book)
            }
            RestoreIssue::InvalidRating { book, rating } => {
                write!(f, "book {}: rating {} reset to 0", book, rating)
            }
            RestoreIssue::DuplicateId { kind, id } => {
                write!(f, "duplicate {} id {} ignored", kind, id)
            }
            RestoreIssue::CounterRaised {
                kind,
                stored,
                raised_to,
            } => write!(
                f,
                "next {} id raised from {} to {}",
                kind, stored, raised_to
            ),
        }
    }
}

/// Serde adapter that refuses to write a NaN or infinite rating.
///
/// JSON has no spelling for those values, so writing one would produce a
/// file that fails to load.
pub mod finite_rating {
    use serde::ser::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(rating: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if !rating.is_finite() {
            return Err(S::Error::custom(format!("rating {} is not a finite number", rating)));
        }
        serializer.serialize_f64(*rating)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer)
    }
}

/// Result of [`BookStore::restore`].
#[derive(Debug, Clone)]
pub struct Restored {
    pub store: BookStore,
    pub issues: Vec<RestoreIssue>,
}

impl Restored {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

// =============================================================================
// Conversion
// =============================================================================

impl BookStore {
    /// Captures the catalog as records, each list in id order.
    pub fn to_snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            next_ids: self.next_ids,
            authors: self
                .authors
                .values()
                .map(|a| AuthorRecord {
                    author_id: a.id(),
                    name: a.name().to_string(),
                    country: a.country().to_string(),
                    birthday: a.birthday().map(str::to_string),
                })
                .collect(),
            books: self
                .books
                .values()
                .map(|b| BookRecord {
                    book_id: b.id(),
                    title: b.title().to_string(),
                    author_id: b.author_id(),
                    price: b.price(),
                    genre: b.genre().to_string(),
                    rating: b.rating(),
                })
                .collect(),
            customers: self
                .customers
                .values()
                .map(|c| CustomerRecord {
                    customer_id: c.id(),
                    name: c.name().to_string(),
                    email: c.email().to_string(),
                    balance: c.balance(),
                    purchased_book_ids: c.purchased_books().to_vec(),
                })
                .collect(),
            orders: self
                .orders
                .values()
                .map(|o| OrderRecord {
                    order_id: o.id(),
                    customer_id: o.customer_id(),
                    book_ids: o.book_ids().to_vec(),
                    order_date: o.order_date().to_string(),
                    status: o.status().clone(),
                    total_price: o.total_price(),
                })
                .collect(),
        }
    }

    /// Rebuilds a catalog from a snapshot, skipping unresolvable references.
    pub fn restore(snapshot: CatalogSnapshot) -> Restored {
        let mut store = BookStore::new();
        let mut issues = Vec::new();

        for record in snapshot.authors {
            let id = record.author_id;
            if store.authors.contains_key(&id) {
                issues.push(RestoreIssue::DuplicateId {
                    kind: EntityKind::Author,
                    id: id.get(),
                });
                continue;
            }
            let mut author = Author::new(id, record.name, record.country);
            if let Some(birthday) = record.birthday {
                author = author.with_birthday(birthday);
            }
            store.authors.insert(id, author);
        }

        for record in snapshot.books {
            let id = record.book_id;
            if store.books.contains_key(&id) {
                issues.push(RestoreIssue::DuplicateId {
                    kind: EntityKind::Book,
                    id: id.get(),
                });
                continue;
            }
            if !store.authors.contains_key(&record.author_id) {
                issues.push(RestoreIssue::MissingAuthor {
                    book: id,
                    author: record.author_id,
                });
                continue;
            }
            let rating = if record.rating.is_finite() {
                record.rating
            } else {
                issues.push(RestoreIssue::InvalidRating {
                    book: id,
                    rating: record.rating,
                });
                0.0
            };
            let book = Book::restore(
                id,
                record.title,
                record.author_id,
                record.price,
                record.genre,
                rating,
            );
            store.books.insert(id, book);
        }

        for record in snapshot.customers {
            let id = record.customer_id;
            if store.customers.contains_key(&id) {
                issues.push(RestoreIssue::DuplicateId {
                    kind: EntityKind::Customer,
                    id: id.get(),
                });
                continue;
            }
            let purchases = resolve_books(
                &store,
                &record.purchased_book_ids,
                |book| RestoreIssue::MissingPurchasedBook { customer: id, book },
                &mut issues,
            );
            let mut customer = Customer::new(id, record.name, record.email, record.balance);
            customer.record_purchases(&purchases);
            store.customers.insert(id, customer);
        }

        for record in snapshot.orders {
            let id = record.order_id;
            if store.orders.contains_key(&id) {
                issues.push(RestoreIssue::DuplicateId {
                    kind: EntityKind::Order,
                    id: id.get(),
                });
                continue;
            }
            if !store.customers.contains_key(&record.customer_id) {
                issues.push(RestoreIssue::MissingOrderCustomer {
                    order: id,
                    customer: record.customer_id,
                });
                continue;
            }
            let book_ids = resolve_books(
                &store,
                &record.book_ids,
                |book| RestoreIssue::MissingOrderBook { order: id, book },
                &mut issues,
            );
            let order = Order::restore(
                id,
                record.customer_id,
                book_ids,
                record.status,
                record.order_date,
                record.total_price,
            );
            store.orders.insert(id, order);
        }

        let stored = snapshot.next_ids;
        store.next_ids = NextIds {
            author: raise_counter(
                EntityKind::Author,
                stored.author,
                store.authors.keys().next_back().map(|id| id.get()),
                &mut issues,
            ),
            book: raise_counter(
                EntityKind::Book,
                stored.book,
                store.books.keys().next_back().map(|id| id.get()),
                &mut issues,
            ),
            customer: raise_counter(
                EntityKind::Customer,
                stored.customer,
                store.customers.keys().next_back().map(|id| id.get()),
                &mut issues,
            ),
            order: raise_counter(
                EntityKind::Order,
                stored.order,
                store.orders.keys().next_back().map(|id| id.get()),
                &mut issues,
            ),
        };

        Restored { store, issues }
    }
}

/// Keeps the book ids that exist, reporting the rest.
fn resolve_books(
    store: &BookStore,
    ids: &[BookId],
    missing: impl Fn(BookId) -> RestoreIssue,
    issues: &mut Vec<RestoreIssue>,
) -> Vec<BookId> {
    let mut kept = Vec::with_capacity(ids.len());
    for id in ids {
        if store.books.contains_key(id) {
            kept.push(*id);
        } else {
            issues.push(missing(*id));
        }
    }
    kept
}

fn raise_counter(
    kind: EntityKind,
    stored: u64,
    highest: Option<u64>,
    issues: &mut Vec<RestoreIssue>,
) -> u64 {
    let floor = highest.map_or(1, |id| id + 1);
    if stored >= floor {
        return stored;
    }
    // A stored 0 from an empty file is not worth reporting
    if highest.is_some() {
        issues.push(RestoreIssue::CounterRaised {
            kind,
            stored,
            raised_to: floor,
        });
    }
    floor
}

// =============================================================================
// Unit Tests
// =============================================================================
