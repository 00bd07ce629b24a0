//! # Order State Machine
//!
//! An order snapshots a list of books for one customer, caches its total at
//! creation, and moves money and books between the customer and the store
//! when it is processed or cancelled.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Created ── process() ──► Completed                                   │
//! │      │        (balance >= recomputed total:                            │
//! │      │         debit total, append books)                              │
//! │      │                         │                                        │
//! │      └──── cancel() ───────────┴──── cancel() ──► Cancelled            │
//! │            (no effect)          (refund cached total_price,            │
//! │                                  remove one purchase per book)         │
//! │                                                                         │
//! │   cancel() on Cancelled: stays Cancelled, returns true                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Totals
//! `total_price` is fixed when the order is created. `process` sums the
//! books' *current* prices instead, so a discount applied between creation
//! and processing lowers the debit but not the cached total (which is what
//! a later cancellation refunds).

use chrono::NaiveDateTime;
use std::fmt;

use crate::entity::{Book, Customer};
use crate::money::Money;
use crate::types::{BookId, CustomerId, OrderId, OrderStatus};

/// Format of [`Order::order_date`].
pub const ORDER_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// A customer order over a snapshot of books.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    book_ids: Vec<BookId>,
    status: OrderStatus,
    order_date: String,
    total_price: Money,
}

impl Order {
    /// Creates an order in the `Created` state.
    ///
    /// The book list is copied into the order and the total is computed
    /// from the prices at this instant.
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        books: &[&Book],
        placed_at: NaiveDateTime,
    ) -> Self {
        Order {
            id,
            customer_id,
            book_ids: books.iter().map(|book| book.id()).collect(),
            status: OrderStatus::Created,
            order_date: placed_at.format(ORDER_DATE_FORMAT).to_string(),
            total_price: books.iter().map(|book| book.price()).sum(),
        }
    }

    /// Rebuilds an order from persisted fields, trusting them as stored.
    pub(crate) fn restore(
        id: OrderId,
        customer_id: CustomerId,
        book_ids: Vec<BookId>,
        status: OrderStatus,
        order_date: String,
        total_price: Money,
    ) -> Self {
        Order {
            id,
            customer_id,
            book_ids,
            status,
            order_date,
            total_price,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// The snapshot, in order, duplicates included.
    pub fn book_ids(&self) -> &[BookId] {
        &self.book_ids
    }

    pub fn contains_book(&self, book: BookId) -> bool {
        self.book_ids.contains(&book)
    }

    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    pub fn order_date(&self) -> &str {
        &self.order_date
    }

    /// Total cached at creation.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Processes the order: debits the customer and hands over the books.
    ///
    /// `current_books` are the snapshot's books as the catalog holds them
    /// now; their prices make up the amount debited.
    ///
    /// ## Returns
    /// - `false` if the order is not `Created`, or the customer cannot
    ///   afford the recomputed total (nothing changes)
    /// - `true` once the customer was debited, the books were appended to
    ///   their purchases and the order is `Completed`
    pub fn process(&mut self, customer: &mut Customer, current_books: &[&Book]) -> bool {
        if !self.status.can_process() {
            return false;
        }

        let total: Money = current_books.iter().map(|book| book.price()).sum();
        if !customer.can_afford(total) {
            return false;
        }

        customer.debit(total);
        customer.record_purchases(&self.book_ids);
        self.status = OrderStatus::Completed;
        true
    }

    /// Cancels the order. Always succeeds.
    ///
    /// A `Completed` order refunds its cached `total_price` on top of the
    /// customer's current balance and removes one matching purchase per
    /// snapshot book. Any other state just flips to `Cancelled`.
    pub fn cancel(&mut self, customer: &mut Customer) -> bool {
        if self.status.refunds_on_cancel() {
            customer.credit(self.total_price);
            for book in &self.book_ids {
                customer.forget_purchase(*book);
            }
        }

        self.status = OrderStatus::Cancelled;
        true
    }

    /// Human-readable summary; customer and books are resolved by the caller.
    pub fn info(&self, customer: Option<&Customer>, books: &[&Book]) -> String {
        let lines: Vec<String> = books
            .iter()
            .map(|book| format!("  - {} ({})", book.title(), book.price()))
            .collect();
        format!(
            "Order #{}\nCustomer: {}\nDate: {}\nStatus: {}\nTotal: {}\nBooks:\n{}",
            self.id,
            customer.map_or("unknown customer", Customer::name),
            self.order_date,
            self.status,
            self.total_price,
            lines.join("\n")
        )
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order #{} - customer {} - {} - {}",
            self.id, self.customer_id, self.total_price, self.status
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthorId;
    use chrono::NaiveDate;

    fn placed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 7, 0)
            .unwrap()
    }

    fn book(id: u64, price_cents: i64) -> Book {
        Book::new(
            BookId::new(id),
            format!("Book {}", id),
            AuthorId::new(1),
            Money::from_cents(price_cents),
            None,
        )
        .unwrap()
    }

    fn customer(balance_cents: i64) -> Customer {
        Customer::new(
            CustomerId::new(1),
            "Ivan",
            "ivan@mail.ru",
            Money::from_cents(balance_cents),
        )
    }

    #[test]
    fn test_new_order_caches_total_and_date() {
        let (a, b) = (book(1, 50000), book(2, 45000));
        let order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a, &b], placed_at());

        assert_eq!(order.status(), &OrderStatus::Created);
        assert_eq!(order.total_price().cents(), 95000);
        assert_eq!(order.order_date(), "2024/03/05 09:07");
        assert_eq!(order.book_ids(), &[BookId::new(1), BookId::new(2)]);
    }

    #[test]
    fn test_process_debits_and_records_books() {
        let (a, b) = (book(1, 50000), book(2, 45000));
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a, &b], placed_at());
        let mut ivan = customer(100000);

        assert!(order.process(&mut ivan, &[&a, &b]));
        assert_eq!(ivan.balance().cents(), 5000);
        assert_eq!(ivan.purchased_books(), &[BookId::new(1), BookId::new(2)]);
        assert_eq!(order.status(), &OrderStatus::Completed);
    }

    #[test]
    fn test_process_insufficient_funds_changes_nothing() {
        let c = book(3, 30000);
        let mut order = Order::new(OrderId::new(2), CustomerId::new(1), &[&c], placed_at());
        let mut ivan = customer(5000);

        assert!(!order.process(&mut ivan, &[&c]));
        assert_eq!(ivan.balance().cents(), 5000);
        assert!(ivan.purchased_books().is_empty());
        assert_eq!(order.status(), &OrderStatus::Created);
    }

    #[test]
    fn test_process_twice_fails() {
        let a = book(1, 100);
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a], placed_at());
        let mut ivan = customer(1000);

        assert!(order.process(&mut ivan, &[&a]));
        assert!(!order.process(&mut ivan, &[&a]));
        assert_eq!(ivan.balance().cents(), 900);
        assert_eq!(ivan.purchased_books().len(), 1);
    }

    #[test]
    fn test_process_exact_balance_succeeds() {
        let a = book(1, 1000);
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a], placed_at());
        let mut ivan = customer(1000);

        assert!(order.process(&mut ivan, &[&a]));
        assert!(ivan.balance().is_zero());
    }

    #[test]
    fn test_process_keeps_duplicates() {
        let a = book(1, 100);
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a, &a], placed_at());
        let mut ivan = customer(1000);

        assert_eq!(order.total_price().cents(), 200);
        assert!(order.process(&mut ivan, &[&a, &a]));
        assert_eq!(ivan.purchased_books(), &[BookId::new(1), BookId::new(1)]);
        assert_eq!(ivan.balance().cents(), 800);
    }

    #[test]
    fn test_process_uses_current_prices_but_cancel_refunds_cached_total() {
        let mut a = book(1, 10000);
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a], placed_at());
        let mut ivan = customer(10000);

        // Discounted after creation: the debit follows, the cached total does not
        a.apply_discount(50.0);
        assert!(order.process(&mut ivan, &[&a]));
        assert_eq!(ivan.balance().cents(), 5000);
        assert_eq!(order.total_price().cents(), 10000);

        assert!(order.cancel(&mut ivan));
        assert_eq!(ivan.balance().cents(), 15000);
    }

    #[test]
    fn test_cancel_completed_refunds_and_removes_books() {
        let (a, b) = (book(1, 50000), book(2, 45000));
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a, &b], placed_at());
        let mut ivan = customer(100000);
        assert!(order.process(&mut ivan, &[&a, &b]));

        assert!(order.cancel(&mut ivan));
        assert_eq!(ivan.balance().cents(), 100000);
        assert!(ivan.purchased_books().is_empty());
        assert_eq!(order.status(), &OrderStatus::Cancelled);
    }

    #[test]
    fn test_cancel_removes_one_purchase_per_snapshot_entry() {
        let a = book(1, 100);
        let mut first = Order::new(OrderId::new(1), CustomerId::new(1), &[&a], placed_at());
        let mut second = Order::new(OrderId::new(2), CustomerId::new(1), &[&a], placed_at());
        let mut ivan = customer(1000);
        assert!(first.process(&mut ivan, &[&a]));
        assert!(second.process(&mut ivan, &[&a]));
        assert_eq!(ivan.purchased_books().len(), 2);

        assert!(first.cancel(&mut ivan));
        assert_eq!(ivan.purchased_books(), &[BookId::new(1)]);
        assert_eq!(ivan.balance().cents(), 900);
    }

    #[test]
    fn test_cancel_created_only_flips_status() {
        let a = book(1, 100);
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a], placed_at());
        let mut ivan = customer(1000);

        assert!(order.cancel(&mut ivan));
        assert_eq!(order.status(), &OrderStatus::Cancelled);
        assert_eq!(ivan.balance().cents(), 1000);

        // Cancelled is terminal for processing, and cancelling again is a no-op
        assert!(!order.process(&mut ivan, &[&a]));
        assert!(order.cancel(&mut ivan));
        assert_eq!(ivan.balance().cents(), 1000);
    }

    #[test]
    fn test_cancel_twice_refunds_once() {
        let a = book(1, 100);
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[&a], placed_at());
        let mut ivan = customer(1000);
        assert!(order.process(&mut ivan, &[&a]));

        assert!(order.cancel(&mut ivan));
        assert!(order.cancel(&mut ivan));
        assert_eq!(ivan.balance().cents(), 1000);
    }

    /// Legacy behavior: a restored order whose label is any casing of
    /// "created" can still be processed.
    #[test]
    fn test_restored_uppercase_created_can_process() {
        let a = book(1, 100);
        let mut order = Order::restore(
            OrderId::new(1),
            CustomerId::new(1),
            vec![BookId::new(1)],
            OrderStatus::from_label("CREATED"),
            "2024/03/05 09:07".to_string(),
            Money::from_cents(100),
        );
        let mut ivan = customer(1000);
        assert!(order.process(&mut ivan, &[&a]));
    }

    /// Legacy behavior: an unrecognized casing of "completed" is not treated
    /// as completed, so cancelling does not refund.
    #[test]
    fn test_restored_uppercase_completed_cancels_without_refund() {
        let mut order = Order::restore(
            OrderId::new(1),
            CustomerId::new(1),
            vec![BookId::new(1)],
            OrderStatus::from_label("COMPLETED"),
            "2024/03/05 09:07".to_string(),
            Money::from_cents(100),
        );
        let mut ivan = customer(0);
        assert!(order.cancel(&mut ivan));
        assert!(ivan.balance().is_zero());
        assert_eq!(order.status(), &OrderStatus::Cancelled);
    }

    #[test]
    fn test_empty_order() {
        let mut order = Order::new(OrderId::new(1), CustomerId::new(1), &[], placed_at());
        let mut ivan = customer(0);
        assert!(order.total_price().is_zero());
        assert!(order.process(&mut ivan, &[]));
    }

    #[test]
    fn test_info_lists_books() {
        let a = book(1, 50000);
        let order = Order::new(OrderId::new(7), CustomerId::new(1), &[&a], placed_at());
        let ivan = customer(0);
        let info = order.info(Some(&ivan), &[&a]);
        assert!(info.starts_with("Order #7\nCustomer: Ivan"));
        assert!(info.contains("  - Book 1 ($500.00)"));
        assert_eq!(order.to_string(), "Order #7 - customer 1 - $500.00 - Created");
    }
}
