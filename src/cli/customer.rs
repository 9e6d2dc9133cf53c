//! Customer CLI commands

use clap::Subcommand;

use crate::display::format_customer_list;
use crate::error::{DairyError, DairyResult};
use crate::models::{Customer, CustomerId};
use crate::storage::Storage;

/// Customer subcommands
#[derive(Subcommand, Debug)]
pub enum CustomerCommands {
    /// Add a customer
    Add {
        /// Customer name
        name: String,
        /// Explicit ID (generated when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// List customers with their order counts
    List,
}

/// Handle a customer command
pub fn handle_customer_command(storage: &Storage, cmd: CustomerCommands) -> DairyResult<()> {
    match cmd {
        CustomerCommands::Add { name, id } => {
            let name = name.trim().to_string();
            let customer = match id {
                Some(id) => {
                    let id: CustomerId = id
                        .parse()
                        .map_err(|_| DairyError::Validation("Customer ID cannot be empty".into()))?;
                    if storage.customers.get(&id)?.is_some() {
                        return Err(DairyError::Duplicate {
                            entity_type: "Customer",
                            identifier: id.to_string(),
                        });
                    }
                    Customer::with_id(id, name)
                }
                None => Customer::new(name),
            };
            customer.validate().map_err(DairyError::Validation)?;

            if storage.customers.find_by_name(&customer.name)?.is_some() {
                return Err(DairyError::Duplicate {
                    entity_type: "Customer",
                    identifier: customer.name,
                });
            }

            storage.customers.upsert(customer.clone())?;
            storage.customers.save()?;
            println!("Added customer: {} ({})", customer.name, customer.id);
        }
        CustomerCommands::List => {
            let orders = storage.orders.get_all()?;
            let customers: Vec<(Customer, usize)> = storage
                .customers
                .get_all()?
                .into_iter()
                .map(|c| {
                    let count = orders.iter().filter(|o| o.customer_id == c.id).count();
                    (c, count)
                })
                .collect();
            println!("{}", format_customer_list(&customers));
        }
    }

    Ok(())
}
