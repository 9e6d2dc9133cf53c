//! Customer display formatting

use crate::models::Customer;

/// Format customers as a two-column list with order counts
pub fn format_customer_list(customers: &[(Customer, usize)]) -> String {
    if customers.is_empty() {
        return "No customers found.".to_string();
    }

    let name_width = customers
        .iter()
        .map(|(c, _)| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>6}  {}\n",
        "Name",
        "Orders",
        "ID",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:->6}  {:-<36}\n",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for (customer, order_count) in customers {
        output.push_str(&format!(
            "{:<name_width$}  {:>6}  {}\n",
            customer.name,
            order_count,
            customer.id,
            name_width = name_width,
        ));
    }

    output.push_str(&format!("\n{} customer(s)\n", customers.len()));
    output
}
