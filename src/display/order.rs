//! Order display formatting
//!
//! A register-style listing of stored orders, independent of any statement
//! selection.

use crate::models::Order;

use super::statement::truncate;

/// Format orders as a register, most recent first
pub fn format_order_list(orders: &[Order], date_format: &str, currency: &str) -> String {
    if orders.is_empty() {
        return "No orders found.".to_string();
    }

    let mut sorted: Vec<&Order> = orders.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<20}  {:<24}  {:>12}  {:>12}  {}\n",
        "Date", "Customer", "Items", "Total", "Paid", "Status"
    ));
    output.push_str(&format!("{}\n", "-".repeat(96)));

    for order in sorted {
        output.push_str(&format!(
            "{:<10}  {:<20}  {:<24}  {:>12}  {:>12}  {}\n",
            order.date.format(date_format).to_string(),
            truncate(&order.customer_name, 20),
            truncate(&order.items_summary(), 24),
            order.total_amount.format_with_symbol(currency),
            order.paid().format_with_symbol(currency),
            order.status,
        ));
    }

    output
}
