//! Statement display formatting
//!
//! Renders a generated statement for the terminal: summary cards first, then
//! the order details table, or an empty-state notice when nothing matched.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::export::StatementMeta;
use crate::models::Order;
use crate::reports::StatementResult;

/// Shown instead of the order table when nothing matched
pub const EMPTY_STATE: &str = "No orders found for the selected criteria.";

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Items")]
    items: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Paid")]
    paid: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl OrderRow {
    fn new(order: &Order, meta: &StatementMeta) -> Self {
        Self {
            date: meta.display_date(order.date),
            customer: truncate(&order.customer_name, 24),
            items: truncate(&order.items_summary(), 32),
            total: meta.money(order.total_amount),
            paid: meta.money(order.paid()),
            balance: meta.money(order.balance()),
            status: order.status.to_string(),
        }
    }
}

/// Format a generated statement for terminal display
pub fn format_statement(statement: &StatementResult, meta: &StatementMeta) -> String {
    let mut output = String::new();

    output.push_str(&meta.title);
    output.push('\n');
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&meta.customer_line());
    output.push('\n');
    output.push_str(&meta.period_line());
    output.push_str("\n\n");

    for (label, value) in meta.summary(statement) {
        output.push_str(&format!("{:<20} {:>14}\n", label, value));
    }
    output.push_str(&format!("{:<20} {:>14}\n", "Total Orders", statement.total_orders));
    output.push_str(&format!(
        "{:<20} {:>14}\n",
        "Delivered / Pending",
        format!("{} / {}", statement.delivered_orders, statement.pending_orders)
    ));

    output.push_str("\nOrder Details\n");
    output.push_str(&"-".repeat(60));
    output.push('\n');

    if statement.is_empty() {
        output.push_str(EMPTY_STATE);
        output.push('\n');
        return output;
    }

    let rows: Vec<OrderRow> = statement
        .orders
        .iter()
        .map(|order| OrderRow::new(order, meta))
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');

    output
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 3 {
        "...".chars().take(max_chars).collect()
    } else {
        let kept: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    }
}
