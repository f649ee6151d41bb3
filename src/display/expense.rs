//! Expense display formatting
//!
//! Formats expenses and totals for terminal output.

use crate::config::settings::Settings;
use crate::models::{Expense, Money};

const MAX_DESCRIPTION_WIDTH: usize = 40;
const MAX_CATEGORY_WIDTH: usize = 20;

/// Format a list of expenses as a table closed by a `total` row
pub fn format_expense_list(expenses: &[Expense], total: Money, settings: &Settings) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let symbol = settings.currency_symbol.as_str();

    let rows: Vec<[String; 5]> = expenses
        .iter()
        .map(|e| {
            [
                e.id.to_string(),
                e.date.format(&settings.date_format).to_string(),
                truncate(&e.description, MAX_DESCRIPTION_WIDTH),
                truncate(e.category_name(), MAX_CATEGORY_WIDTH),
                e.amount.format_with_symbol(symbol),
            ]
        })
        .collect();

    let total_str = total.format_with_symbol(symbol);

    let headers = ["ID", "Date", "Description", "Category", "Amount"];
    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths[4] = widths[4].max(total_str.chars().count());

    let [id_w, date_w, desc_w, cat_w, amount_w] = widths;
    let mut output = String::new();

    output.push_str(&format!(
        "{:>id_w$}  {:<date_w$}  {:<desc_w$}  {:<cat_w$}  {:>amount_w$}\n",
        headers[0], headers[1], headers[2], headers[3], headers[4],
    ));
    output.push_str(&separator(&widths));

    for [id, date, description, category, amount] in &rows {
        output.push_str(&format!(
            "{:>id_w$}  {:<date_w$}  {:<desc_w$}  {:<cat_w$}  {:>amount_w$}\n",
            id, date, description, category, amount,
        ));
    }

    output.push_str(&separator(&widths));
    let label_width = id_w + date_w + desc_w + cat_w + 6;
    output.push_str(&format!(
        "{:<label_width$}  {:>amount_w$}\n",
        format!("TOTAL ({} expenses)", expenses.len()),
        total_str,
    ));

    output
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense #{}\n", expense.id));
    output.push_str(&format!(
        "  Date:        {}\n",
        expense.date.format(&settings.date_format)
    ));
    output.push_str(&format!("  Description: {}\n", expense.description));
    output.push_str(&format!(
        "  Category:    {}\n",
        expense.category.as_deref().unwrap_or("(none)")
    ));
    output.push_str(&format!(
        "  Amount:      {}\n",
        expense.amount.format_with_symbol(&settings.currency_symbol)
    ));

    output
}

/// Format a summary total line
pub fn format_summary(
    total: Money,
    month: Option<u32>,
    year: Option<i32>,
    settings: &Settings,
) -> String {
    let amount = total.format_with_symbol(&settings.currency_symbol);
    match (month, year) {
        (Some(month), Some(year)) => {
            format!("Total expenses for month {} of {}: {}", month, year, amount)
        }
        (Some(month), None) => format!("Total expenses for month {}: {}", month, amount),
        _ => format!("Total expenses: {}", amount),
    }
}

fn separator(widths: &[usize; 5]) -> String {
    let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    format!("{}\n", parts.join("  "))
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}
