use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{handle_expense_command, ExpenseCommands};
use expense_tracker::config::{paths::DATA_DIR_ENV, Settings, TrackerPaths};
use expense_tracker::services::ExpenseStore;
use expense_tracker::storage::FileKeyValueStore;

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Personal expense tracker",
    long_about = "Record expenses by category and date, then review where the \
                  money went with category breakdowns and monthly trends."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    paths.ensure_directories()?;

    let audit = AuditLogger::new(paths.audit_log());

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut store = ExpenseStore::new(FileKeyValueStore::new(paths.data_dir()));
            if settings.audit_enabled {
                store = store.with_audit(audit);
            }
            store.load().await;

            handle_expense_command(&mut store, &settings, cmd).await?;
        }
        Some(Commands::History { count }) => {
            let entries = audit.read_recent(count).await?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }

            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Override with {}", DATA_DIR_ENV);
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Trend months:     {}", settings.trend_months);
            println!("  Top categories:   {}", settings.top_categories_limit);
            println!("  Audit enabled:    {}", settings.audit_enabled);
        }
        None => {
            println!("Expense Tracker - personal expense tracking");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense add 250 -c Food -d Lunch' to record an expense.");
        }
    }

    Ok(())
}
