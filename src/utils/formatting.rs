use chrono::{DateTime, Local};
use console::style;
use tabled::{Table, Tabled, settings::{Style, Alignment}};

use crate::models::Product;

const RULE: &str = "---------------";
const NAME_WIDTH: usize = 30;

#[derive(Tabled)]
struct ProductTableRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Product")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Table of the cart with 1-based positions, the numbers the CLI accepts.
pub fn format_cart_table(items: &[Product]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let rows: Vec<ProductTableRow> = items
        .iter()
        .enumerate()
        .map(|(index, item)| ProductTableRow {
            position: index + 1,
            name: truncate(item.name(), NAME_WIDTH),
            price: format_money(item.price()),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Alignment::left());

    table.to_string()
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn format_total(total: f64) -> String {
    format!("{}: {}", style("Total").bold(), style(format_money(total)).green().bold())
}

/// The boxed receipt: a receipt number that is shown once and never stored,
/// the item lines, the grand total and a thank-you line.
pub fn format_receipt(items: &[Product], total: f64, number: u32, issued_at: &DateTime<Local>) -> String {
    let mut receipt = String::new();

    receipt.push_str(&format!("{}\n", RULE));
    receipt.push_str(&format!("Receipt No: {}\n", number));
    receipt.push_str(&format!("Issued: {}\n", format_date(issued_at)));
    receipt.push_str(&format!("{}\n", RULE));
    for item in items {
        receipt.push_str(&format!("{}\n", item));
    }
    receipt.push_str(&format!("{}\n", RULE));
    receipt.push_str(&format!("Grand total: {}\n", format_money(total)));
    receipt.push_str("Thank you for shopping!\n");
    receipt.push_str(&format!("{}\n", RULE));

    receipt
}

pub fn format_date(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width - 3).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
