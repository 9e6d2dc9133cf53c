//! Order CLI commands
//!
//! Orders are normally imported from an exported snapshot; `add` exists for
//! manual corrections and small data sets.

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_order_list;
use crate::error::{DairyError, DairyResult};
use crate::models::{Customer, CustomerId, Money, Order, OrderItem, OrderStatus};
use crate::storage::{read_document, Storage};

use super::statement::parse_date;

/// Order subcommands
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Record an order
    Add {
        /// Customer ID or name
        #[arg(short, long)]
        customer: String,
        /// Delivery date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
        /// Order total (e.g., "120.50")
        #[arg(short, long)]
        total: String,
        /// Amount paid so far
        #[arg(short, long)]
        paid: Option<String>,
        /// Status (pending, delivered, cancelled)
        #[arg(short, long, default_value = "pending")]
        status: String,
        /// Line item as NAME:QUANTITY, may be repeated
        #[arg(short, long = "item")]
        items: Vec<String>,
    },
    /// List stored orders
    List {
        /// Only orders for this customer ID
        #[arg(short, long)]
        customer: Option<String>,
    },
    /// Import orders from a JSON or YAML file
    Import {
        /// Path to a file holding an array of orders
        file: PathBuf,
    },
}

/// Handle an order command
pub fn handle_order_command(
    storage: &Storage,
    settings: &Settings,
    cmd: OrderCommands,
) -> DairyResult<()> {
    match cmd {
        OrderCommands::Add {
            customer,
            date,
            total,
            paid,
            status,
            items,
        } => {
            let customer = find_customer(storage, &customer)?;
            let date = parse_date(&date, "order")?;
            let total = parse_money(&total)?;

            let mut order = Order::new(customer.id.clone(), customer.name.clone(), date, total);
            order.amount_paid = paid.as_deref().map(parse_money).transpose()?;
            order.status = OrderStatus::parse(&status).map_err(DairyError::Validation)?;
            order.items = items
                .iter()
                .map(|s| OrderItem::parse(s))
                .collect::<Result<Vec<_>, _>>()
                .map_err(DairyError::Validation)?;

            storage.orders.upsert(order.clone())?;
            storage.orders.save()?;
            println!(
                "Added order for {} on {}: {}",
                customer.name,
                order.date,
                order.total_amount.format_with_symbol(&settings.currency_symbol)
            );
        }
        OrderCommands::List { customer } => {
            let orders = match customer {
                Some(id) => storage.orders.get_by_customer(&CustomerId::from(id))?,
                None => storage.orders.get_all()?,
            };
            println!(
                "{}",
                format_order_list(
                    &orders,
                    &settings.display_date_format,
                    &settings.currency_symbol
                )
            );
        }
        OrderCommands::Import { file } => {
            let orders: Vec<Order> = read_document(&file)?;
            let total = orders.len();

            let registered = register_customers(storage, &orders)?;
            let added = storage.orders.import(orders)?;
            storage.save_all()?;

            tracing::info!(
                file = %file.display(),
                total,
                added,
                registered,
                "imported orders"
            );
            println!(
                "Imported {} order(s) from {} ({} new, {} updated)",
                total,
                file.display(),
                added,
                total - added
            );
            if registered > 0 {
                println!("Registered {} new customer(s)", registered);
            }
        }
    }

    Ok(())
}

/// Look up a customer by ID, then by name
fn find_customer(storage: &Storage, key: &str) -> DairyResult<Customer> {
    if let Some(customer) = storage.customers.get(&CustomerId::from(key))? {
        return Ok(customer);
    }
    storage
        .customers
        .find_by_name(key)?
        .ok_or_else(|| DairyError::customer_not_found(key))
}

fn parse_money(value: &str) -> DairyResult<Money> {
    Money::parse(value)
        .map_err(|e| DairyError::Validation(format!("Invalid amount '{}': {}", value, e)))
}

/// Add customers that imported orders reference but storage lacks
fn register_customers(storage: &Storage, orders: &[Order]) -> DairyResult<usize> {
    let mut registered = 0;
    for order in orders {
        if order.customer_name.trim().is_empty()
            || storage.customers.get(&order.customer_id)?.is_some()
        {
            continue;
        }
        storage.customers.upsert(Customer::with_id(
            order.customer_id.clone(),
            order.customer_name.clone(),
        ))?;
        registered += 1;
    }
    Ok(registered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DairyPaths;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DairyPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_find_customer_by_id_or_name() {
        let (_temp, storage) = create_test_storage();
        storage
            .customers
            .upsert(Customer::with_id(CustomerId::from("c1"), "Ramesh Patel"))
            .unwrap();

        assert_eq!(find_customer(&storage, "c1").unwrap().name, "Ramesh Patel");
        assert_eq!(
            find_customer(&storage, "ramesh patel").unwrap().id,
            CustomerId::from("c1")
        );
        assert!(find_customer(&storage, "nobody").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_order() {
        let (_temp, storage) = create_test_storage();
        storage
            .customers
            .upsert(Customer::with_id(CustomerId::from("c1"), "Sita"))
            .unwrap();

        handle_order_command(
            &storage,
            &Settings::default(),
            OrderCommands::Add {
                customer: "c1".into(),
                date: "2024-01-02".into(),
                total: "120.50".into(),
                paid: Some("20".into()),
                status: "delivered".into(),
                items: vec!["Milk:2".into(), "Curd:0.5".into()],
            },
        )
        .unwrap();

        let orders = storage.orders.get_all().unwrap();
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(order.customer_name, "Sita");
        assert_eq!(order.total_amount.paise(), 12050);
        assert_eq!(order.paid().paise(), 2000);
        assert!(order.is_delivered());
        assert_eq!(order.items_summary(), "Milk x 2, Curd x 0.5");
    }

    #[test]
    fn test_add_order_rejects_bad_amount() {
        let (_temp, storage) = create_test_storage();
        storage
            .customers
            .upsert(Customer::with_id(CustomerId::from("c1"), "Sita"))
            .unwrap();

        let err = handle_order_command(
            &storage,
            &Settings::default(),
            OrderCommands::Add {
                customer: "c1".into(),
                date: "2024-01-02".into(),
                total: "lots".into(),
                paid: None,
                status: "pending".into(),
                items: Vec::new(),
            },
        )
        .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.orders.count().unwrap(), 0);
    }

    #[test]
    fn test_import_registers_customers() {
        let (temp, storage) = create_test_storage();
        let file = temp.path().join("orders.yaml");
        std::fs::write(
            &file,
            "- id: o1\n  date: 2024-01-01T10:00:00Z\n  customer_id: c9\n  customer_name: Gopal\n  total_amount: 60\n  status: delivered\n",
        )
        .unwrap();

        handle_order_command(
            &storage,
            &Settings::default(),
            OrderCommands::Import { file: file.clone() },
        )
        .unwrap();

        assert_eq!(storage.orders.count().unwrap(), 1);
        assert_eq!(
            storage.customers.get(&CustomerId::from("c9")).unwrap().unwrap().name,
            "Gopal"
        );

        // Importing again updates rather than duplicates
        handle_order_command(&storage, &Settings::default(), OrderCommands::Import { file })
            .unwrap();
        assert_eq!(storage.orders.count().unwrap(), 1);
        assert_eq!(storage.customers.count().unwrap(), 1);
    }
}
