use anyhow::Result;
use clap::{Parser, Subcommand};

use dairy_statement::cli::{
    handle_customer_command, handle_history_command, handle_order_command,
    handle_statement_command, CustomerCommands, OrderCommands, StatementCommands,
};
use dairy_statement::config::{paths::DairyPaths, settings::Settings};
use dairy_statement::logging::init_logging;
use dairy_statement::storage::Storage;

#[derive(Parser)]
#[command(
    name = "dairy",
    version,
    about = "Customer statements for dairy deliveries",
    long_about = "Generates customer statements from delivery orders: filter by \
                  date range and customer, see totals paid and pending, and \
                  export the statement as PDF, Excel or CSV."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,

    /// Generate, show and export statements
    #[command(subcommand)]
    Statement(StatementCommands),

    /// Customer management commands
    #[command(subcommand)]
    Customer(CustomerCommands),

    /// Order management commands
    #[command(subcommand)]
    Order(OrderCommands),

    /// List recent statement exports
    History {
        /// Number of exports to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = DairyPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_logging(&settings.log_level)?;

    // Initialize storage
    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing dairy-statement at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Run 'dairy order import <file>' to load orders.");
        }
        Some(Commands::Config) => {
            println!("dairy-statement Configuration");
            println!("=============================");
            println!("Config directory:  {}", paths.config_dir().display());
            println!("Data directory:    {}", paths.data_dir().display());
            println!(
                "Export directory:  {}",
                settings.resolve_export_dir(&paths).display()
            );
            println!("Export log:        {}", paths.export_log().display());
            println!();
            println!("Settings:");
            println!("  Business name:   {}", settings.business_name);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.display_date_format);
            println!("  Log level:       {}", settings.log_level);
        }
        Some(Commands::Statement(cmd)) => {
            handle_statement_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Customer(cmd)) => {
            handle_customer_command(&storage, cmd)?;
        }
        Some(Commands::Order(cmd)) => {
            handle_order_command(&storage, &settings, cmd)?;
        }
        Some(Commands::History { limit }) => {
            handle_history_command(&paths, limit)?;
        }
        None => {
            println!("dairy-statement - Customer statements for dairy deliveries");
            println!();
            println!("Run 'dairy --help' for usage information.");
            println!("Run 'dairy statement show' for today's statement.");
        }
    }

    Ok(())
}
