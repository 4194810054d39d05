use clap::{builder::RangedU64ValueParser, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shopping-cart")]
#[command(about = "A shopping cart manager that keeps your cart between runs")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Cart snapshot file (overrides CART_FILE)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a product to the end of the cart
    Add {
        /// Product name
        name: String,
        /// Product price
        #[arg(value_parser = parse_price, allow_negative_numbers = true)]
        price: f64,
    },
    /// Replace the name and price of a product
    Edit {
        /// Position of the product, as shown by `list`
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,
        /// New name
        name: String,
        /// New price
        #[arg(value_parser = parse_price, allow_negative_numbers = true)]
        price: f64,
    },
    /// Remove a product from the cart
    Remove {
        /// Position of the product, as shown by `list`
        #[arg(value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        position: usize,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// List the products in the cart
    List,
    /// Show the cart total
    Total,
    /// Print the invoice
    Invoice {
        /// Print the numbered receipt instead of the plain invoice
        #[arg(short, long)]
        receipt: bool,
        /// Receipt number to print (random when omitted)
        #[arg(short, long, requires = "receipt")]
        number: Option<u32>,
    },
    /// Interactive menu: add, edit, remove and invoice until you quit
    Shell,
}

/// Parses a price typed by the user. Anything `f64` can parse is a price,
/// including "inf" and "NaN".
pub fn parse_price(input: &str) -> Result<f64, String> {
    input
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid price", input.trim()))
}

/// Converts a 1-based position from the command line to a cart index.
pub fn position_to_index(position: usize) -> usize {
    position.saturating_sub(1)
}
