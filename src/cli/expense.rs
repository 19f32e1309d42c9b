//! Expense CLI commands
//!
//! Implements CLI commands for recording, browsing and analysing expenses.

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use super::input::{
    parse_amount, parse_category, parse_date, parse_description, parse_new_expense,
};
use crate::config::Settings;
use crate::display::{format_expense_details, format_expense_table, format_statistics};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Amount, Category, Expense, ExpenseId, ExpenseUpdate};
use crate::reports::{filter_by_date_range, monthly_trend, top_categories, SpendingSummary};
use crate::services::{ExpenseFilter, ExpenseStore};
use crate::storage::KeyValueStore;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Amount (e.g., "250" or "12.50")
        amount: String,
        /// Category name
        #[arg(short, long, default_value = "Food")]
        category: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List expenses, newest first
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Text to search for in descriptions and categories
        #[arg(short, long)]
        search: Option<String>,
        /// Number of expenses to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show expense details
    Show {
        /// Expense ID or ID prefix
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID or ID prefix
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID or ID prefix
        id: String,
    },

    /// Show spending statistics
    Stats {
        /// Earliest date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Latest date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Months in the monthly trend
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// List the available categories with their totals
    Categories,

    /// Delete every expense
    Clear {
        /// Required to actually delete
        #[arg(long)]
        force: bool,
    },
}

/// Handle an expense command
pub async fn handle_expense_command<S: KeyValueStore>(
    store: &mut ExpenseStore<S>,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let today = Local::now().date_naive();
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            amount,
            category,
            description,
            date,
        } => {
            let input =
                parse_new_expense(&amount, &category, &description, date.as_deref(), today)?;

            let expense = store.add(input).await?;
            println!(
                "Added expense: {} {}",
                expense.amount.format_with_symbol(symbol),
                expense.label()
            );
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            category,
            from,
            to,
            search,
            limit,
        } => {
            let mut filter = ExpenseFilter::new();
            if let Some(category) = category {
                filter = filter.category(parse_category(&category)?);
            }
            if from.is_some() || to.is_some() {
                let (start, end) = date_range(from.as_deref(), to.as_deref())?;
                filter = filter.date_range(start, end);
            }
            if let Some(text) = search {
                filter = filter.text(text);
            }

            let mut expenses = store.search(&filter);
            expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            print!("{}", format_expense_table(&expenses, settings));
        }

        ExpenseCommands::Show { id } => {
            let expense = resolve_expense(store, &id)?;
            print!("{}", format_expense_details(expense, settings));
        }

        ExpenseCommands::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            let mut update = ExpenseUpdate::new();
            if let Some(amount) = amount {
                update = update.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                update = update.category(parse_category(&category)?);
            }
            if let Some(description) = description {
                update = update.description(parse_description(&description));
            }
            if let Some(date) = date {
                update = update.date(parse_date(&date)?);
            }

            let mut candidate = resolve_expense(store, &id)?.clone();

            if update.is_empty() {
                println!(
                    "No changes specified. Use --amount, --category, --description, or --date."
                );
                return Ok(());
            }

            candidate.apply(&update);
            candidate.validate()?;
            let expense_id = candidate.id;

            let updated = store
                .update(&expense_id, update)
                .await?
                .ok_or_else(|| ExpenseError::expense_not_found(expense_id.as_str()))?;
            println!(
                "Updated expense: {} {}",
                updated.amount.format_with_symbol(symbol),
                updated.label()
            );
        }

        ExpenseCommands::Delete { id } => {
            let expense = resolve_expense(store, &id)?.clone();
            store.remove(&expense.id).await?;
            println!(
                "Deleted expense: {} {}",
                expense.amount.format_with_symbol(symbol),
                expense.label()
            );
        }

        ExpenseCommands::Stats { from, to, months } => {
            let expenses: Vec<Expense> = if from.is_some() || to.is_some() {
                let (start, end) = date_range(from.as_deref(), to.as_deref())?;
                filter_by_date_range(store.expenses(), start, end)
            } else {
                store.expenses().to_vec()
            };

            let summary = SpendingSummary::generate(&expenses, today);
            let top = top_categories(&expenses, settings.top_categories_limit);
            let trend = monthly_trend(&expenses, months.unwrap_or(settings.trend_months), today);

            print!("{}", format_statistics(&summary, &top, &trend, settings));
        }

        ExpenseCommands::Categories => {
            println!("Categories");
            println!("{}", crate::display::report::separator(40));
            for category in Category::ALL {
                let expenses = store.by_category(category);
                let total: Amount = expenses.iter().map(|e| e.amount).sum();
                println!(
                    "{:<15} {:>4} {:>15}",
                    category.name(),
                    expenses.len(),
                    total.format_with_symbol(symbol)
                );
            }
        }

        ExpenseCommands::Clear { force } => {
            if !force {
                println!(
                    "This will delete all {} expenses. Re-run with --force to confirm.",
                    store.len()
                );
                return Ok(());
            }

            let removed = store.clear().await?;
            println!("Deleted {} expenses.", removed);
        }
    }

    Ok(())
}

/// Find the single expense referred to by user input
///
/// Accepts a full id or a unique prefix, with or without the `exp-` prefix.
pub fn resolve_expense<'a, S: KeyValueStore>(
    store: &'a ExpenseStore<S>,
    input: &str,
) -> ExpenseResult<&'a Expense> {
    let exact = ExpenseId::from_string(input.trim());
    if let Some(expense) = store.get(&exact) {
        return Ok(expense);
    }

    let matches = store.find_by_prefix(input);
    match matches.as_slice() {
        [] => Err(ExpenseError::expense_not_found(input)),
        [expense] => Ok(*expense),
        _ => Err(ExpenseError::Validation(format!(
            "'{}' matches {} expenses. Use more of the ID",
            input,
            matches.len()
        ))),
    }
}

fn date_range(from: Option<&str>, to: Option<&str>) -> ExpenseResult<(NaiveDate, NaiveDate)> {
    let start = from.map(parse_date).transpose()?.unwrap_or(NaiveDate::MIN);
    let end = to.map(parse_date).transpose()?.unwrap_or(NaiveDate::MAX);
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKeyValueStore;

    fn seeded(ids: &[&str]) -> MemoryKeyValueStore {
        let memory = MemoryKeyValueStore::new();
        let date = "2025-01-10";
        let records: Vec<String> = ids
            .iter()
            .map(|id| {
                format!(
                    r#"{{"id":"{}","amount":10.0,"category":"Food","description":"","date":"{}","createdAt":"2025-01-10T08:00:00Z"}}"#,
                    id, date
                )
            })
            .collect();
        memory.insert_raw(
            crate::storage::EXPENSES_KEY,
            format!("[{}]", records.join(",")),
        );
        memory
    }

    async fn store_with(ids: &[&str]) -> ExpenseStore<MemoryKeyValueStore> {
        ExpenseStore::open(seeded(ids)).await
    }

    #[tokio::test]
    async fn test_resolve_by_full_id_and_prefix() {
        let store = store_with(&["abc12345", "abd99999"]).await;

        assert_eq!(resolve_expense(&store, "abc12345").unwrap().id.as_str(), "abc12345");
        assert_eq!(resolve_expense(&store, "abc").unwrap().id.as_str(), "abc12345");
        assert_eq!(resolve_expense(&store, "exp-abd").unwrap().id.as_str(), "abd99999");
    }

    #[tokio::test]
    async fn test_resolve_ambiguous_and_missing() {
        let store = store_with(&["abc12345", "abd99999"]).await;

        assert!(resolve_expense(&store, "ab").unwrap_err().is_validation());
        assert!(resolve_expense(&store, "zzz").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_add_and_delete_commands() {
        let mut store = ExpenseStore::open(MemoryKeyValueStore::new()).await;
        let settings = Settings::default();

        handle_expense_command(
            &mut store,
            &settings,
            ExpenseCommands::Add {
                amount: "250".into(),
                category: "food".into(),
                description: "  Lunch ".into(),
                date: Some("2025-01-10".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.expenses()[0].description, "Lunch");

        let id = store.expenses()[0].id.as_str().to_string();
        handle_expense_command(&mut store, &settings, ExpenseCommands::Delete { id })
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_amount_without_writing() {
        let memory = MemoryKeyValueStore::new();
        let mut store = ExpenseStore::open(memory.clone()).await;

        let err = handle_expense_command(
            &mut store,
            &Settings::default(),
            ExpenseCommands::Add {
                amount: "abc".into(),
                category: "Food".into(),
                description: String::new(),
                date: None,
            },
        )
        .await
        .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(memory.write_count(), 0);
    }

    #[tokio::test]
    async fn test_edit_rejects_invalid_result_without_writing() {
        let memory = seeded(&["abc12345"]);
        let mut store = ExpenseStore::open(memory.clone()).await;
        let settings = Settings::default();
        let before = store.expenses().to_vec();

        let err = handle_expense_command(
            &mut store,
            &settings,
            ExpenseCommands::Edit {
                id: "abc".into(),
                amount: Some("0".into()),
                category: None,
                description: None,
                date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.is_validation());

        let err = handle_expense_command(
            &mut store,
            &settings,
            ExpenseCommands::Edit {
                id: "abc".into(),
                amount: None,
                category: None,
                description: Some("x".repeat(201)),
                date: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("at most 200 characters"));

        assert_eq!(store.expenses(), before.as_slice());
        assert_eq!(memory.write_count(), 0);
    }

    #[tokio::test]
    async fn test_clear_requires_force() {
        let mut store = store_with(&["a1", "b2"]).await;
        let settings = Settings::default();

        handle_expense_command(&mut store, &settings, ExpenseCommands::Clear { force: false })
            .await
            .unwrap();
        assert_eq!(store.len(), 2);

        handle_expense_command(&mut store, &settings, ExpenseCommands::Clear { force: true })
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_date_range_defaults() {
        let (start, end) = date_range(None, Some("2025-01-31")).unwrap();
        assert_eq!(start, NaiveDate::MIN);
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert!(date_range(Some("bad"), None).is_err());
    }
}
