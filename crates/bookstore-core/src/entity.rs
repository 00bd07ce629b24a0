//! # Entity Model
//!
//! Authors, books and customers. Every entity receives its identifier from
//! the catalog; nothing here assigns ids.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BookStore (owns everything, keyed by id)                               │
//! │                                                                         │
//! │  Author ◄──── Book.author_id                                            │
//! │                 ▲                                                       │
//! │                 └──── Customer.purchased_books (ids, duplicates kept)   │
//! │                 └──── Order.book_ids (snapshot)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cross references are plain ids resolved through the catalog, so there are
//! no reference cycles and the persisted shape mirrors memory.

use std::fmt;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{AuthorId, BookId, CustomerId};
use crate::validation::{discount_to_bps, validate_deposit, validate_price, validate_rating};

/// Country used when none is given.
pub const DEFAULT_COUNTRY: &str = "Unknown";

/// Genre used when none is given.
pub const DEFAULT_GENRE: &str = "Unspecified";

/// Shown in summaries when an author's birthday is not known.
pub const UNKNOWN_BIRTHDAY: &str = "unknown";

// =============================================================================
// Author
// =============================================================================

/// A book author. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    id: AuthorId,
    name: String,
    country: String,
    birthday: Option<String>,
}

impl Author {
    pub fn new(id: AuthorId, name: impl Into<String>, country: impl Into<String>) -> Self {
        Author {
            id,
            name: name.into(),
            country: country.into(),
            birthday: None,
        }
    }

    /// Sets the birthday (free-form, e.g. `1828-09-09`).
    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.birthday = Some(birthday.into());
        self
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn birthday(&self) -> Option<&str> {
        self.birthday.as_deref()
    }

    /// Human-readable summary.
    pub fn info(&self) -> String {
        format!(
            "Author: {}, Country: {}, Born: {}",
            self.name,
            self.country,
            self.birthday().unwrap_or(UNKNOWN_BIRTHDAY)
        )
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Book
// =============================================================================

/// A digital book in the catalog.
///
/// ## Invariants
/// - `price > 0` at construction ([`Book::new`] fails with `InvalidPrice`)
/// - price only changes through [`Book::apply_discount`]
/// - rating is finite ([`Book::with_rating`] fails with `InvalidRating`)
///
/// Books restored from disk skip the price check: stored data is trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    id: BookId,
    title: String,
    author_id: AuthorId,
    price: Money,
    genre: String,
    rating: f64,
}

impl Book {
    /// Creates a book, rejecting non-positive prices.
    ///
    /// ## Example
    /// ```rust
    /// use bookstore_core::{AuthorId, Book, BookId, CoreError, Money};
    ///
    /// let book = Book::new(BookId::new(1), "War and Peace", AuthorId::new(1), Money::from_cents(50000), None);
    /// assert!(book.is_ok());
    ///
    /// let err = Book::new(BookId::new(2), "Oops", AuthorId::new(1), Money::from_cents(-100), None);
    /// assert!(matches!(err, Err(CoreError::InvalidPrice(_))));
    /// ```
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author_id: AuthorId,
        price: Money,
        genre: Option<String>,
    ) -> CoreResult<Self> {
        validate_price(price)?;
        Ok(Book {
            id,
            title: title.into(),
            author_id,
            price,
            genre: genre.unwrap_or_else(|| DEFAULT_GENRE.to_string()),
            rating: 0.0,
        })
    }

    /// Rebuilds a book from persisted fields without validation.
    pub(crate) fn restore(
        id: BookId,
        title: String,
        author_id: AuthorId,
        price: Money,
        genre: String,
        rating: f64,
    ) -> Self {
        Book {
            id,
            title,
            author_id,
            price,
            genre,
            rating,
        }
    }

    /// Sets the rating. Any finite value is accepted.
    pub fn with_rating(mut self, rating: f64) -> CoreResult<Self> {
        validate_rating(rating)?;
        self.rating = rating;
        Ok(self)
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author_id(&self) -> AuthorId {
        self.author_id
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Applies a percentage discount: `price *= (1 - pct/100)`.
    ///
    /// Percentages outside `(0, 100]` are ignored. Returns whether the price
    /// changed.
    pub fn apply_discount(&mut self, pct: f64) -> bool {
        match discount_to_bps(pct) {
            Some(bps) => {
                self.price = self.price.apply_percentage_discount(bps);
                true
            }
            None => false,
        }
    }

    /// Human-readable summary; the author is resolved by the caller.
    pub fn info(&self, author: Option<&Author>) -> String {
        let author = author.map_or("unknown author", Author::name);
        format!(
            "Book: {}\nAuthor: {}\nPrice: {}\nGenre: {}\nRating: {}",
            self.title, author, self.price, self.genre, self.rating
        )
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// A customer account with a balance and purchase history.
///
/// Domain methods check affordability before every debit, so the balance
/// only goes negative when a caller sets it directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    email: String,
    balance: Money,
    purchased_books: Vec<BookId>,
}

impl Customer {
    pub fn new(
        id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        balance: Money,
    ) -> Self {
        Customer {
            id,
            name: name.into(),
            email: email.into(),
            balance,
            purchased_books: Vec::new(),
        }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Overwrites the balance directly, bypassing affordability checks.
    pub fn set_balance(&mut self, balance: Money) {
        self.balance = balance;
    }

    /// Purchased books in purchase order, duplicates included.
    pub fn purchased_books(&self) -> &[BookId] {
        &self.purchased_books
    }

    pub fn can_afford(&self, amount: Money) -> bool {
        self.balance >= amount
    }

    /// Tops up the balance. The amount must be strictly positive.
    pub fn deposit(&mut self, amount: Money) -> CoreResult<()> {
        validate_deposit(amount)?;
        self.balance += amount;
        Ok(())
    }

    /// Buys a single book outside of any order.
    ///
    /// Debits the current price and records the book when affordable;
    /// otherwise returns false and changes nothing.
    pub fn purchase_book(&mut self, book: &Book) -> bool {
        if !self.can_afford(book.price()) {
            return false;
        }
        self.balance -= book.price();
        self.purchased_books.push(book.id());
        true
    }

    pub(crate) fn debit(&mut self, amount: Money) {
        self.balance -= amount;
    }

    pub(crate) fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    pub(crate) fn record_purchases(&mut self, books: &[BookId]) {
        self.purchased_books.extend_from_slice(books);
    }

    /// Removes the first occurrence of `book`, returning whether one was found.
    pub(crate) fn forget_purchase(&mut self, book: BookId) -> bool {
        match self.purchased_books.iter().position(|id| *id == book) {
            Some(index) => {
                self.purchased_books.remove(index);
                true
            }
            None => false,
        }
    }

    /// Human-readable summary.
    pub fn info(&self) -> String {
        format!(
            "Customer: {}, Email: {}, Balance: {}",
            self.name, self.email, self.balance
        )
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
