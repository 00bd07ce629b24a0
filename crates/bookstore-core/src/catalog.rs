//! # Catalog
//!
//! [`BookStore`] is the aggregate root: it owns every author, book, customer
//! and order, hands out identifiers, and is the only place orders are built
//! against consistent catalog state.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           BookStore                                     │
//! │                                                                         │
//! │  authors:   BTreeMap<AuthorId, Author>       next_ids.author   (>= 1)   │
//! │  books:     BTreeMap<BookId, Book>           next_ids.book     (>= 1)   │
//! │  customers: BTreeMap<CustomerId, Customer>   next_ids.customer (>= 1)   │
//! │  orders:    BTreeMap<OrderId, Order>         next_ids.order    (>= 1)   │
//! │                                                                         │
//! │  Counters only move forward. Removing a book never frees its id.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids are handed out in increasing order, so iterating a map by key is
//! also insertion order.
//!
//! ## Single Actor
//! Every mutating method takes `&mut self`. The catalog has no internal
//! locking; sharing it between threads needs an outer lock around
//! `create_order` / `process_order` / `cancel_order`.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entity::{Author, Book, Customer, DEFAULT_COUNTRY};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::order::Order;
use crate::types::{AuthorId, BookId, CustomerId, EntityKind, OrderId};

// =============================================================================
// Identifier Counters
// =============================================================================

/// The next identifier to hand out for each entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIds {
    pub book: u64,
    pub author: u64,
    pub customer: u64,
    pub order: u64,
}

impl Default for NextIds {
    fn default() -> Self {
        NextIds {
            book: 1,
            author: 1,
            customer: 1,
            order: 1,
        }
    }
}

// =============================================================================
// BookStore
// =============================================================================

/// The in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct BookStore {
    pub(crate) authors: BTreeMap<AuthorId, Author>,
    pub(crate) books: BTreeMap<BookId, Book>,
    pub(crate) customers: BTreeMap<CustomerId, Customer>,
    pub(crate) orders: BTreeMap<OrderId, Order>,
    pub(crate) next_ids: NextIds,
}

impl BookStore {
    /// Creates an empty catalog with all counters at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the identifier counters.
    pub fn next_ids(&self) -> NextIds {
        self.next_ids
    }

    // -------------------------------------------------------------------------
    // Authors
    // -------------------------------------------------------------------------

    /// Adds an author. Names need not be unique.
    ///
    /// `country` defaults to [`DEFAULT_COUNTRY`].
    pub fn add_author(
        &mut self,
        name: impl Into<String>,
        country: Option<&str>,
        birthday: Option<&str>,
    ) -> &Author {
        let id = AuthorId::new(self.next_ids.author);
        let mut author = Author::new(id, name, country.unwrap_or(DEFAULT_COUNTRY));
        if let Some(birthday) = birthday {
            author = author.with_birthday(birthday);
        }
        self.next_ids.author += 1;
        self.authors.entry(id).or_insert(author)
    }

    pub fn find_author(&self, id: AuthorId) -> CoreResult<&Author> {
        self.authors
            .get(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Author, id))
    }

    pub fn authors(&self) -> impl Iterator<Item = &Author> {
        self.authors.values()
    }

    // -------------------------------------------------------------------------
    // Books
    // -------------------------------------------------------------------------

    /// Adds a book by an existing author.
    ///
    /// ## Errors
    /// - `NotFound(Author)` if the author does not exist
    /// - `InvalidPrice` if `price <= 0`
    ///
    /// A failed call does not consume a book id.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: AuthorId,
        price: Money,
        genre: Option<&str>,
    ) -> CoreResult<&Book> {
        self.find_author(author)?;

        let id = BookId::new(self.next_ids.book);
        let book = Book::new(id, title, author, price, genre.map(str::to_string))?;
        self.next_ids.book += 1;
        Ok(self.books.entry(id).or_insert(book))
    }

    pub fn find_book(&self, id: BookId) -> CoreResult<&Book> {
        self.books
            .get(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Book, id))
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.books.values()
    }

    /// Discounts a book's price by `pct` percent.
    ///
    /// Returns `Ok(false)` when `pct` is outside `(0, 100]` and the price was
    /// left alone. Existing orders keep their cached totals.
    pub fn apply_discount(&mut self, id: BookId, pct: f64) -> CoreResult<bool> {
        let book = self
            .books
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Book, id))?;
        Ok(book.apply_discount(pct))
    }

    /// Returns true if any order's snapshot contains the book.
    pub fn is_book_referenced(&self, id: BookId) -> bool {
        self.orders.values().any(|order| order.contains_book(id))
    }

    /// Removes a book that no order refers to.
    ///
    /// ## Errors
    /// - `NotFound(Book)` if the book does not exist
    /// - `BookReferenced` listing the orders that still hold it
    pub fn remove_book(&mut self, id: BookId) -> CoreResult<Book> {
        self.find_book(id)?;

        let holders: Vec<OrderId> = self
            .orders
            .values()
            .filter(|order| order.contains_book(id))
            .map(Order::id)
            .collect();
        if !holders.is_empty() {
            return Err(CoreError::BookReferenced {
                book: id,
                orders: holders,
            });
        }

        self.books
            .remove(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Book, id))
    }

    /// Detailed book summary with the author's name resolved.
    pub fn book_info(&self, id: BookId) -> CoreResult<String> {
        let book = self.find_book(id)?;
        Ok(book.info(self.authors.get(&book.author_id())))
    }

    // -------------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------------

    /// Adds a customer with an opening balance.
    pub fn add_customer(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        balance: Money,
    ) -> &Customer {
        let id = CustomerId::new(self.next_ids.customer);
        let customer = Customer::new(id, name, email, balance);
        self.next_ids.customer += 1;
        self.customers.entry(id).or_insert(customer)
    }

    pub fn find_customer(&self, id: CustomerId) -> CoreResult<&Customer> {
        self.customers
            .get(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Customer, id))
    }

    /// Mutable access for direct account adjustments.
    pub fn find_customer_mut(&mut self, id: CustomerId) -> CoreResult<&mut Customer> {
        self.customers
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Customer, id))
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// Returns a copy of every customer.
    pub fn get_all_customers(&self) -> Vec<Customer> {
        self.customers.values().cloned().collect()
    }

    /// Tops up a customer's balance.
    pub fn deposit(&mut self, id: CustomerId, amount: Money) -> CoreResult<()> {
        self.find_customer_mut(id)?.deposit(amount)
    }

    /// Buys a single book outside of any order.
    ///
    /// Returns `Ok(false)` when the customer cannot afford it.
    pub fn purchase_book(&mut self, customer: CustomerId, book: BookId) -> CoreResult<bool> {
        let book = self
            .books
            .get(&book)
            .ok_or_else(|| CoreError::not_found(EntityKind::Book, book))?;
        let customer = self
            .customers
            .get_mut(&customer)
            .ok_or_else(|| CoreError::not_found(EntityKind::Customer, customer))?;
        Ok(customer.purchase_book(book))
    }

    // -------------------------------------------------------------------------
    // Orders
    // -------------------------------------------------------------------------

    /// Creates an order stamped with the current local time.
    ///
    /// See [`BookStore::create_order_at`].
    pub fn create_order(
        &mut self,
        customer: CustomerId,
        book_ids: &[BookId],
    ) -> CoreResult<&Order> {
        self.create_order_at(customer, book_ids, Local::now().naive_local())
    }

    /// Creates an order in the `Created` state. Nothing is debited until
    /// [`BookStore::process_order`].
    ///
    /// ## Errors
    /// `OrderCreation` wrapping the `NotFound` for the first customer or
    /// book id that does not resolve. No order id is consumed on failure.
    pub fn create_order_at(
        &mut self,
        customer: CustomerId,
        book_ids: &[BookId],
        placed_at: NaiveDateTime,
    ) -> CoreResult<&Order> {
        let order = self
            .build_order(customer, book_ids, placed_at)
            .map_err(|e| CoreError::OrderCreation(Box::new(e)))?;
        self.next_ids.order += 1;
        Ok(self.orders.entry(order.id()).or_insert(order))
    }

    fn build_order(
        &self,
        customer: CustomerId,
        book_ids: &[BookId],
        placed_at: NaiveDateTime,
    ) -> CoreResult<Order> {
        let customer = self.find_customer(customer)?;
        let books = book_ids
            .iter()
            .map(|id| self.find_book(*id))
            .collect::<CoreResult<Vec<_>>>()?;

        Ok(Order::new(
            OrderId::new(self.next_ids.order),
            customer.id(),
            &books,
            placed_at,
        ))
    }

    pub fn find_order(&self, id: OrderId) -> CoreResult<&Order> {
        self.orders
            .get(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Order, id))
    }

    pub fn orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    /// Processes an order against the customer's balance.
    ///
    /// ## Returns
    /// - `Err(NotFound)` if the order (or its customer) does not exist
    /// - `Ok(false)` if the order is not open or the customer is short
    /// - `Ok(true)` once debited and completed
    pub fn process_order(&mut self, id: OrderId) -> CoreResult<bool> {
        let order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Order, id))?;
        let customer = self
            .customers
            .get_mut(&order.customer_id())
            .ok_or_else(|| CoreError::not_found(EntityKind::Customer, order.customer_id()))?;
        let current_books: Vec<&Book> = order
            .book_ids()
            .iter()
            .filter_map(|book| self.books.get(book))
            .collect();

        Ok(order.process(customer, &current_books))
    }

    /// Cancels an order, refunding it if it was completed. Always `Ok(true)`
    /// for an existing order.
    pub fn cancel_order(&mut self, id: OrderId) -> CoreResult<bool> {
        let order = self
            .orders
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found(EntityKind::Order, id))?;
        let customer = self
            .customers
            .get_mut(&order.customer_id())
            .ok_or_else(|| CoreError::not_found(EntityKind::Customer, order.customer_id()))?;

        Ok(order.cancel(customer))
    }

    /// Checks whether the customer could pay for the order right now.
    ///
    /// `process_order` never fails with `InsufficientFunds`; this lets a
    /// caller explain a `false` from it.
    pub fn check_order_affordable(&self, id: OrderId) -> CoreResult<()> {
        let order = self.find_order(id)?;
        let customer = self.find_customer(order.customer_id())?;
        let required: Money = self.resolve_books(order).iter().map(|b| b.price()).sum();

        if customer.can_afford(required) {
            Ok(())
        } else {
            Err(CoreError::insufficient_funds(
                customer.name(),
                customer.balance(),
                required,
            ))
        }
    }

    /// Orders placed by a customer, in creation order.
    pub fn get_customer_orders(&self, customer: CustomerId) -> Vec<&Order> {
        self.orders
            .values()
            .filter(|order| order.customer_id() == customer)
            .collect()
    }

    /// Detailed order summary with customer and book names resolved.
    pub fn order_info(&self, id: OrderId) -> CoreResult<String> {
        let order = self.find_order(id)?;
        let books = self.resolve_books(order);
        Ok(order.info(self.customers.get(&order.customer_id()), &books))
    }

    fn resolve_books(&self, order: &Order) -> Vec<&Book> {
        order
            .book_ids()
            .iter()
            .filter_map(|book| self.books.get(book))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderStatus;
    use chrono::NaiveDate;

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(12, 30, 0)
            .unwrap()
    }

    /// Two authors, three books (500 / 450 / 300) and one customer with 1000.
    fn seeded_store() -> BookStore {
        let mut store = BookStore::new();
        let tolstoy = store.add_author("Leo Tolstoy", Some("Russia"), None).id();
        let chekhov = store.add_author("Anton Chekhov", Some("Russia"), None).id();
        store
            .add_book("War and Peace", tolstoy, Money::from_cents(50000), Some("Novel"))
            .unwrap();
        store
            .add_book("Anna Karenina", tolstoy, Money::from_cents(45000), Some("Novel"))
            .unwrap();
        store
            .add_book("The Cherry Orchard", chekhov, Money::from_cents(30000), Some("Play"))
            .unwrap();
        store.add_customer("Ivan Ivanov", "ivan@mail.ru", Money::from_cents(100000));
        store
    }

    fn ids(raw: &[u64]) -> Vec<BookId> {
        raw.iter().map(|id| BookId::new(*id)).collect()
    }

    #[test]
    fn test_ids_are_sequential_per_kind() {
        let store = seeded_store();
        let book_ids: Vec<u64> = store.books().map(|b| b.id().get()).collect();
        assert_eq!(book_ids, vec![1, 2, 3]);
        assert_eq!(
            store.next_ids(),
            NextIds {
                book: 4,
                author: 3,
                customer: 2,
                order: 1
            }
        );
    }

    #[test]
    fn test_add_author_defaults_country() {
        let mut store = BookStore::new();
        let author = store.add_author("John Smith", None, None);
        assert_eq!(author.country(), DEFAULT_COUNTRY);
        assert_eq!(author.birthday(), None);
    }

    #[test]
    fn test_add_book_invalid_price_does_not_consume_id() {
        let mut store = seeded_store();
        let err = store
            .add_book("Free", AuthorId::new(1), Money::zero(), None)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPrice(_)));

        let book = store
            .add_book("Priced", AuthorId::new(1), Money::from_cents(100), None)
            .unwrap();
        assert_eq!(book.id(), BookId::new(4));
        assert_eq!(book.genre(), "Unspecified");
    }

    #[test]
    fn test_add_book_unknown_author() {
        let mut store = seeded_store();
        let err = store
            .add_book("Orphan", AuthorId::new(99), Money::from_cents(100), None)
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound {
                kind: EntityKind::Author,
                id: 99
            }
        ));
    }

    #[test]
    fn test_find_not_found() {
        let store = seeded_store();
        assert!(matches!(
            store.find_book(BookId::new(42)),
            Err(CoreError::NotFound { kind: EntityKind::Book, id: 42 })
        ));
        assert!(matches!(
            store.find_customer(CustomerId::new(5)),
            Err(CoreError::NotFound { kind: EntityKind::Customer, id: 5 })
        ));
        assert!(matches!(
            store.find_order(OrderId::new(1)),
            Err(CoreError::NotFound { kind: EntityKind::Order, id: 1 })
        ));
    }

    #[test]
    fn test_create_order_does_not_debit() {
        let mut store = seeded_store();
        let order = store
            .create_order_at(CustomerId::new(1), &ids(&[1, 2]), placed_at())
            .unwrap();
        assert_eq!(order.id(), OrderId::new(1));
        assert_eq!(order.total_price().cents(), 95000);
        assert_eq!(order.status(), &OrderStatus::Created);
        assert_eq!(order.order_date(), "2024/03/05 12:30");

        let ivan = store.find_customer(CustomerId::new(1)).unwrap();
        assert_eq!(ivan.balance().cents(), 100000);
    }

    #[test]
    fn test_create_order_with_unknown_book_is_wrapped() {
        let mut store = seeded_store();
        let err = store
            .create_order(CustomerId::new(1), &ids(&[1, 42]))
            .unwrap_err();
        assert!(matches!(err, CoreError::OrderCreation(_)));
        assert!(matches!(
            err.root_cause(),
            CoreError::NotFound { kind: EntityKind::Book, id: 42 }
        ));
        assert_eq!(store.next_ids().order, 1);
        assert_eq!(store.orders().count(), 0);
    }

    #[test]
    fn test_create_order_with_unknown_customer_is_wrapped() {
        let mut store = seeded_store();
        let err = store
            .create_order(CustomerId::new(9), &ids(&[1]))
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            CoreError::NotFound { kind: EntityKind::Customer, id: 9 }
        ));
    }

    #[test]
    fn test_order_snapshot_is_independent_of_catalog() {
        let mut store = seeded_store();
        let order_id = store
            .create_order_at(CustomerId::new(1), &ids(&[3]), placed_at())
            .unwrap()
            .id();

        // New books added afterwards do not leak into the order
        store
            .add_book("Three Sisters", AuthorId::new(2), Money::from_cents(20000), None)
            .unwrap();
        let order = store.find_order(order_id).unwrap();
        assert_eq!(order.book_ids(), &[BookId::new(3)]);
    }

    /// Purchase, shortfall, then cancellation with refund.
    #[test]
    fn test_purchase_shortfall_and_refund_scenario() {
        let mut store = seeded_store();
        let ivan = CustomerId::new(1);

        let first = store.create_order_at(ivan, &ids(&[1, 2]), placed_at()).unwrap().id();
        assert!(store.process_order(first).unwrap());
        let customer = store.find_customer(ivan).unwrap();
        assert_eq!(customer.balance().cents(), 5000);
        assert_eq!(customer.purchased_books().len(), 2);

        let second = store.create_order_at(ivan, &ids(&[3]), placed_at()).unwrap().id();
        assert!(!store.process_order(second).unwrap());
        let customer = store.find_customer(ivan).unwrap();
        assert_eq!(customer.balance().cents(), 5000);
        assert_eq!(customer.purchased_books().len(), 2);
        assert_eq!(store.find_order(second).unwrap().status(), &OrderStatus::Created);

        assert!(store.cancel_order(first).unwrap());
        let customer = store.find_customer(ivan).unwrap();
        assert_eq!(customer.balance().cents(), 100000);
        assert!(customer.purchased_books().is_empty());
        assert_eq!(store.find_order(first).unwrap().status(), &OrderStatus::Cancelled);
    }

    #[test]
    fn test_refund_is_added_to_current_balance() {
        let mut store = seeded_store();
        let ivan = CustomerId::new(1);
        let order = store.create_order_at(ivan, &ids(&[1]), placed_at()).unwrap().id();
        assert!(store.process_order(order).unwrap());

        store
            .find_customer_mut(ivan)
            .unwrap()
            .set_balance(Money::from_cents(-100));
        assert!(store.cancel_order(order).unwrap());
        assert_eq!(store.find_customer(ivan).unwrap().balance().cents(), 49900);
    }

    #[test]
    fn test_discount_between_creation_and_processing() {
        let mut store = seeded_store();
        let ivan = CustomerId::new(1);
        let order = store.create_order_at(ivan, &ids(&[1]), placed_at()).unwrap().id();

        assert!(store.apply_discount(BookId::new(1), 50.0).unwrap());
        assert!(store.process_order(order).unwrap());

        // Debited the discounted 250, cached total still 500
        assert_eq!(store.find_customer(ivan).unwrap().balance().cents(), 75000);
        assert_eq!(store.find_order(order).unwrap().total_price().cents(), 50000);
    }

    #[test]
    fn test_apply_discount_out_of_range() {
        let mut store = seeded_store();
        assert!(!store.apply_discount(BookId::new(1), 0.0).unwrap());
        assert!(!store.apply_discount(BookId::new(1), 120.0).unwrap());
        assert_eq!(store.find_book(BookId::new(1)).unwrap().price().cents(), 50000);
        assert!(store.apply_discount(BookId::new(99), 10.0).is_err());
    }

    #[test]
    fn test_process_unknown_order() {
        let mut store = seeded_store();
        let err = store.process_order(OrderId::new(7)).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Order, id: 7 }));
        assert!(store.cancel_order(OrderId::new(7)).is_err());
    }

    #[test]
    fn test_check_order_affordable() {
        let mut store = seeded_store();
        let ivan = CustomerId::new(1);
        let affordable = store.create_order_at(ivan, &ids(&[1, 2]), placed_at()).unwrap().id();
        assert!(store.check_order_affordable(affordable).is_ok());
        assert!(store.process_order(affordable).unwrap());

        let too_much = store.create_order_at(ivan, &ids(&[3]), placed_at()).unwrap().id();
        match store.check_order_affordable(too_much) {
            Err(CoreError::InsufficientFunds {
                customer,
                balance,
                required,
            }) => {
                assert_eq!(customer, "Ivan Ivanov");
                assert_eq!(balance.cents(), 5000);
                assert_eq!(required.cents(), 30000);
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        }
    }

    #[test]
    fn test_get_customer_orders_preserves_order() {
        let mut store = seeded_store();
        let petr = store.add_customer("Petr Petrov", "petr@mail.ru", Money::zero()).id();
        let ivan = CustomerId::new(1);

        store.create_order_at(ivan, &ids(&[1]), placed_at()).unwrap();
        store.create_order_at(petr, &ids(&[2]), placed_at()).unwrap();
        store.create_order_at(ivan, &ids(&[3]), placed_at()).unwrap();

        let orders: Vec<u64> = store
            .get_customer_orders(ivan)
            .iter()
            .map(|o| o.id().get())
            .collect();
        assert_eq!(orders, vec![1, 3]);
        assert!(store.get_customer_orders(CustomerId::new(77)).is_empty());
    }

    #[test]
    fn test_remove_book_guarded_by_orders() {
        let mut store = seeded_store();
        let order = store
            .create_order_at(CustomerId::new(1), &ids(&[1]), placed_at())
            .unwrap()
            .id();

        assert!(store.is_book_referenced(BookId::new(1)));
        assert!(!store.is_book_referenced(BookId::new(3)));

        match store.remove_book(BookId::new(1)) {
            Err(CoreError::BookReferenced { book, orders }) => {
                assert_eq!(book, BookId::new(1));
                assert_eq!(orders, vec![order]);
            }
            other => panic!("expected BookReferenced, got {:?}", other),
        }

        let removed = store.remove_book(BookId::new(3)).unwrap();
        assert_eq!(removed.title(), "The Cherry Orchard");
        assert!(store.find_book(BookId::new(3)).is_err());
        assert!(store.remove_book(BookId::new(3)).unwrap_err().is_not_found());

        // Ids are never recycled
        let next = store
            .add_book("Ward No. 6", AuthorId::new(2), Money::from_cents(100), None)
            .unwrap();
        assert_eq!(next.id(), BookId::new(4));
    }

    #[test]
    fn test_deposit_and_direct_purchase() {
        let mut store = seeded_store();
        let ivan = CustomerId::new(1);

        store.deposit(ivan, Money::from_cents(500)).unwrap();
        assert!(matches!(
            store.deposit(ivan, Money::zero()),
            Err(CoreError::InvalidAmount(_))
        ));
        assert_eq!(store.find_customer(ivan).unwrap().balance().cents(), 100500);

        assert!(store.purchase_book(ivan, BookId::new(1)).unwrap());
        assert!(store.purchase_book(ivan, BookId::new(1)).unwrap());
        assert!(!store.purchase_book(ivan, BookId::new(1)).unwrap());
        let customer = store.find_customer(ivan).unwrap();
        assert_eq!(customer.balance().cents(), 500);
        assert_eq!(customer.purchased_books(), &[BookId::new(1), BookId::new(1)]);
    }

    #[test]
    fn test_get_all_customers_is_a_copy() {
        let mut store = seeded_store();
        let mut copy = store.get_all_customers();
        copy[0].set_balance(Money::zero());
        store.add_customer("Petr", "petr@mail.ru", Money::zero());

        assert_eq!(copy.len(), 1);
        assert_eq!(
            store.find_customer(CustomerId::new(1)).unwrap().balance().cents(),
            100000
        );
    }

    #[test]
    fn test_info_summaries() {
        let mut store = seeded_store();
        let info = store.book_info(BookId::new(3)).unwrap();
        assert!(info.contains("Author: Anton Chekhov"));

        let order = store
            .create_order_at(CustomerId::new(1), &ids(&[3]), placed_at())
            .unwrap()
            .id();
        let info = store.order_info(order).unwrap();
        assert!(info.contains("Customer: Ivan Ivanov"));
        assert!(info.contains("The Cherry Orchard ($300.00)"));
    }
}
