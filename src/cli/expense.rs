//! Expense CLI commands
//!
//! Implements the add/update/delete/list/summary subcommands.
//!
//! No flag is required by the parser: a missing `--id` is 0 and a missing
//! `--amount` is "0", both of which the service rejects with a proper error.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list, format_summary};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseId, Money};
use crate::services::{sum_amounts, ExpenseService, UpdateExpenseInput};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record a new expense dated now
    Add {
        /// What the money was spent on
        #[arg(short, long, default_value = "")]
        description: String,
        /// Amount spent (e.g., "10.50")
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Change fields of an existing expense
    Update {
        /// Expense ID
        #[arg(short, long, default_value_t = 0)]
        id: u64,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New category (pass "" to clear)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        #[arg(short, long, default_value_t = 0)]
        id: u64,
    },
    /// List expenses
    List {
        /// Only show expenses in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show the total of all expenses, or of one calendar month
    Summary {
        /// Month number 1-12 (any year unless --year is given)
        #[arg(short, long)]
        month: Option<u32>,
        /// Restrict the month to a single year
        #[arg(short, long, requires = "month")]
        year: Option<i32>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let saved = service.add_expense(amount, &description, category.as_deref())?;
            println!("Expense added successfully (ID: {})", saved.id);
        }

        ExpenseCommands::Update {
            id,
            description,
            amount,
            category,
        } => {
            let input = UpdateExpenseInput {
                description,
                category,
                amount: amount.as_deref().map(parse_amount).transpose()?,
            };

            let updated = service.update_expense(ExpenseId::new(id), input)?;
            println!("Expense updated successfully");
            print!("{}", format_expense_details(&updated, settings));
        }

        ExpenseCommands::Delete { id } => {
            let removed = service.delete_expense(ExpenseId::new(id))?;
            println!("Expense deleted successfully (ID: {})", removed.id);
        }

        ExpenseCommands::List { category } => {
            let expenses = match category {
                Some(category) => service.list_by_category(&category)?,
                None => service.list_expenses()?,
            };
            let total = sum_amounts(&expenses)?;
            print!("{}", format_expense_list(&expenses, total, settings));
        }

        ExpenseCommands::Summary { month, year } => {
            // --month 0 alone means "no month"; with --year it is rejected
            let total = match (month, year) {
                (Some(month), Some(year)) => service.summary_by_month_in_year(month, year)?,
                (Some(month), None) if month != 0 => service.summary_by_month(month)?,
                _ => service.summary()?,
            };
            let month = month.filter(|m| *m != 0);
            println!("{}", format_summary(total, month, year, settings));
        }
    }

    Ok(())
}

fn parse_amount(amount: &str) -> ExpenseResult<Money> {
    Money::parse(amount).map_err(|e| {
        ExpenseError::Validation(format!(
            "{}. Use a decimal amount like '10.50'",
            e
        ))
    })
}
