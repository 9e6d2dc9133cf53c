//! Customer Statement
//!
//! Filters the order snapshot by delivery day and customer, and totals what
//! was ordered, what was paid and what is still outstanding.

use chrono::NaiveDate;
use std::io::Write;

use crate::error::{DairyError, DairyResult};
use crate::models::{CustomerFilter, Money, Order};
use crate::source::StatementSource;

/// What a statement should cover
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementRequest {
    /// First delivery day included
    pub start_date: NaiveDate,
    /// Last delivery day included
    pub end_date: NaiveDate,
    pub customer: CustomerFilter,
}

impl StatementRequest {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, customer: CustomerFilter) -> Self {
        Self {
            start_date,
            end_date,
            customer,
        }
    }

    /// A single-day request covering every customer
    pub fn for_day(day: NaiveDate) -> Self {
        Self::new(day, day, CustomerFilter::All)
    }

    /// Check if an order falls inside the range and matches the customer.
    ///
    /// An inverted range matches nothing.
    pub fn matches(&self, order: &Order) -> bool {
        order.date >= self.start_date
            && order.date <= self.end_date
            && self.customer.matches(&order.customer_id)
    }
}

/// A generated statement: matching orders, newest first, with totals
#[derive(Debug, Clone, PartialEq)]
pub struct StatementResult {
    pub orders: Vec<Order>,
    /// Sum of order totals
    pub total_amount: Money,
    /// Sum of amounts paid
    pub total_paid: Money,
    /// `total_amount - total_paid`; negative when customers overpaid
    pub pending_amount: Money,
    pub total_orders: usize,
    pub delivered_orders: usize,
    /// Orders whose status is anything but delivered
    pub pending_orders: usize,
}

impl StatementResult {
    /// Generate a statement over an order list
    pub fn generate(orders: &[Order], request: &StatementRequest) -> Self {
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|order| request.matches(order))
            .cloned()
            .collect();

        // Stable: same-day orders keep snapshot order
        matching.sort_by(|a, b| b.date.cmp(&a.date));

        let total_amount: Money = matching.iter().map(|o| o.total_amount).sum();
        let total_paid: Money = matching.iter().map(Order::paid).sum();
        let delivered_orders = matching.iter().filter(|o| o.is_delivered()).count();
        let total_orders = matching.len();

        Self {
            orders: matching,
            total_amount,
            total_paid,
            pending_amount: total_amount - total_paid,
            total_orders,
            delivered_orders,
            pending_orders: total_orders - delivered_orders,
        }
    }

    /// Generate a statement from a data source
    ///
    /// Fails with `DataLoading` while the source is not ready.
    pub fn from_source<S: StatementSource + ?Sized>(
        source: &S,
        request: &StatementRequest,
    ) -> DairyResult<Self> {
        if source.is_loading() {
            return Err(DairyError::DataLoading);
        }

        let orders = source.orders()?;
        let statement = Self::generate(&orders, request);

        tracing::info!(
            start = %request.start_date,
            end = %request.end_date,
            customer = %request.customer,
            scanned = orders.len(),
            matched = statement.total_orders,
            "generated statement"
        );

        Ok(statement)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Export the statement rows to CSV
    pub fn export_csv<W: Write>(&self, writer: W, date_format: &str) -> DairyResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer
            .write_record(["Date", "Customer", "Items", "Total", "Paid", "Balance", "Status"])
            .map_err(|e| DairyError::Export(e.to_string()))?;

        for order in &self.orders {
            csv_writer
                .write_record([
                    order.date.format(date_format).to_string(),
                    order.customer_name.clone(),
                    order.items_summary(),
                    order.total_amount.to_fixed(),
                    order.paid().to_fixed(),
                    order.balance().to_fixed(),
                    order.status.to_string(),
                ])
                .map_err(|e| DairyError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| DairyError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, CustomerId, OrderId, OrderStatus};
    use crate::source::Snapshot;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn order(id: &str, customer: &str, d: u32, total: i64, paid: Option<i64>) -> Order {
        let mut order = Order::new(
            CustomerId::from(customer),
            customer.to_uppercase(),
            day(d),
            Money::from_paise(total),
        );
        order.id = OrderId::from(id);
        order.amount_paid = paid.map(Money::from_paise);
        order
    }

    fn mixed_orders() -> Vec<Order> {
        let mut orders = vec![
            order("o1", "c1", 3, 4000, Some(4000)),
            order("o2", "c2", 1, 2550, None),
            order("o3", "c1", 5, 1000, Some(1500)),
            order("o4", "c2", 3, 700, Some(200)),
            order("o5", "c1", 9, 999, Some(999)),
        ];
        orders[0].status = OrderStatus::Delivered;
        orders[2].status = OrderStatus::Delivered;
        orders[3].status = OrderStatus::Cancelled;
        orders
    }

    #[test]
    fn test_range_boundary_compares_utc_days() {
        let json = r#"[
            {"id": "late-evening-est", "date": "2024-01-02T20:00:00-05:00",
             "customer_id": "c1", "total_amount": 10},
            {"id": "early-morning-ist", "date": "2024-01-01T03:00:00+05:30",
             "customer_id": "c1", "total_amount": 20},
            {"id": "last-minute-utc", "date": "2024-01-02T23:59:59Z",
             "customer_id": "c1", "total_amount": 40}
        ]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();

        // 20:00 EST is already the 3rd in UTC; 03:00 IST is still Dec 31st
        let result = StatementResult::generate(
            &orders,
            &StatementRequest::new(day(1), day(2), CustomerFilter::All),
        );
        let ids: Vec<_> = result.orders.iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["last-minute-utc"]);
        assert_eq!(result.total_amount.paise(), 4000);

        let next_day = StatementResult::generate(&orders, &StatementRequest::for_day(day(3)));
        assert_eq!(next_day.orders[0].id, OrderId::from("late-evening-est"));
    }

    #[test]
    fn test_two_order_scenario() {
        let mut first = order("a", "c1", 1, 10000, Some(10000));
        first.status = OrderStatus::Delivered;
        let second = order("b", "c1", 2, 5000, Some(0));

        let result = StatementResult::generate(
            &[first, second],
            &StatementRequest::new(day(1), day(2), CustomerFilter::All),
        );

        assert_eq!(result.total_orders, 2);
        assert_eq!(result.total_amount.paise(), 15000);
        assert_eq!(result.total_paid.paise(), 10000);
        assert_eq!(result.pending_amount.paise(), 5000);
        assert_eq!(result.delivered_orders, 1);
        assert_eq!(result.pending_orders, 1);
        assert_eq!(result.orders[0].date, day(2));
        assert_eq!(result.orders[1].date, day(1));
    }

    #[test]
    fn test_empty_order_set_is_all_zero() {
        let result = StatementResult::generate(&[], &StatementRequest::for_day(day(1)));

        assert!(result.is_empty());
        assert_eq!(result.total_amount, Money::zero());
        assert_eq!(result.total_paid, Money::zero());
        assert_eq!(result.pending_amount, Money::zero());
        assert_eq!(result.total_orders, 0);
        assert_eq!(result.delivered_orders, 0);
        assert_eq!(result.pending_orders, 0);
    }

    #[test]
    fn test_unknown_customer_matches_nothing() {
        let request = StatementRequest::new(
            day(1),
            day(31),
            CustomerFilter::Customer(CustomerId::from("nobody")),
        );
        let result = StatementResult::generate(&mixed_orders(), &request);
        assert!(result.is_empty());
        assert_eq!(result.total_amount, Money::zero());
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let orders = mixed_orders();
        for (start, end) in [(day(5), day(4)), (day(31), day(1)), (day(2), day(1))] {
            let result = StatementResult::generate(
                &orders,
                &StatementRequest::new(start, end, CustomerFilter::All),
            );
            assert!(result.is_empty(), "{} > {} should be empty", start, end);
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let request = StatementRequest::new(day(3), day(5), CustomerFilter::All);
        let result = StatementResult::generate(&mixed_orders(), &request);
        let ids: Vec<_> = result.orders.iter().map(|o| o.id.to_string()).collect();
        assert_eq!(ids, vec!["o3", "o1", "o4"]);
    }

    #[test]
    fn test_customer_filter() {
        let request = StatementRequest::new(
            day(1),
            day(31),
            CustomerFilter::Customer(CustomerId::from("c2")),
        );
        let result = StatementResult::generate(&mixed_orders(), &request);
        assert_eq!(result.total_orders, 2);
        assert!(result
            .orders
            .iter()
            .all(|o| o.customer_id == CustomerId::from("c2")));
    }

    #[test]
    fn test_totals_and_invariants() {
        let request = StatementRequest::new(day(1), day(31), CustomerFilter::All);
        let orders = mixed_orders();
        let result = StatementResult::generate(&orders, &request);

        let expected_total: i64 = orders.iter().map(|o| o.total_amount.paise()).sum();
        let expected_paid: i64 = orders.iter().map(|o| o.paid().paise()).sum();
        assert_eq!(result.total_amount.paise(), expected_total);
        assert_eq!(result.total_paid.paise(), expected_paid);
        assert_eq!(result.pending_amount + result.total_paid, result.total_amount);
        assert_eq!(result.delivered_orders + result.pending_orders, result.total_orders);
        // Cancelled counts as pending
        assert_eq!(result.delivered_orders, 2);
        assert_eq!(result.pending_orders, 3);
    }

    #[test]
    fn test_overpayment_is_not_clamped() {
        let orders = vec![order("o1", "c1", 1, 1000, Some(1500))];
        let result = StatementResult::generate(&orders, &StatementRequest::for_day(day(1)));
        assert_eq!(result.pending_amount.paise(), -500);
    }

    #[test]
    fn test_sorted_newest_first_with_stable_ties() {
        let request = StatementRequest::new(day(1), day(31), CustomerFilter::All);
        let result = StatementResult::generate(&mixed_orders(), &request);

        assert!(result.orders.windows(2).all(|w| w[0].date >= w[1].date));
        let ids: Vec<_> = result.orders.iter().map(|o| o.id.to_string()).collect();
        // o1 and o4 share day 3 and keep snapshot order
        assert_eq!(ids, vec!["o5", "o3", "o1", "o4", "o2"]);
    }

    #[test]
    fn test_from_source_refuses_while_loading() {
        let mut snapshot = Snapshot::new(mixed_orders(), vec![Customer::new("Sita")]);
        snapshot.loading = true;
        let request = StatementRequest::for_day(day(3));

        assert!(matches!(
            StatementResult::from_source(&snapshot, &request),
            Err(DairyError::DataLoading)
        ));

        snapshot.loading = false;
        let result = StatementResult::from_source(&snapshot, &request).unwrap();
        assert_eq!(result.total_orders, 2);
    }

    #[test]
    fn test_export_csv() {
        let mut orders = mixed_orders();
        orders[0].items = vec![
            crate::models::OrderItem::new("Milk", 2.0),
            crate::models::OrderItem::new("Ghee, 500g", 1.0),
        ];
        let result = StatementResult::generate(&orders, &StatementRequest::for_day(day(3)));

        let mut out = Vec::new();
        result.export_csv(&mut out, "%-d/%-m/%Y").unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Date,Customer,Items,Total,Paid,Balance,Status");
        assert_eq!(
            lines[1],
            "3/1/2024,C1,\"Milk x 2, Ghee, 500g x 1\",40.00,40.00,0.00,delivered"
        );
        assert_eq!(lines[2], "3/1/2024,C2,,7.00,2.00,5.00,cancelled");
    }
}
