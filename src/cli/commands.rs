use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use rand::Rng;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    cli::args::*,
    services::{CartService, CartServiceError},
    storage::repositories::CartRepository,
    utils::{
        formatting::{format_cart_table, format_money, format_receipt, format_total},
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

const MAX_RECEIPT_NUMBER: u32 = 100_000;

pub struct CliApp {
    cart_service: CartService,
}

impl CliApp {
    pub fn new(config: &Config) -> Self {
        Self::with_repository(Arc::new(config.cart_repository()))
    }

    pub fn with_repository(cart_repository: Arc<dyn CartRepository>) -> Self {
        Self {
            cart_service: CartService::open(cart_repository),
        }
    }

    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Add { name, price } => self.handle_add(name, price),
            Commands::Edit { position, name, price } => self.handle_edit(position, name, price),
            Commands::Remove { position, force } => self.handle_remove(position, force),
            Commands::List => self.handle_list(),
            Commands::Total => self.handle_total(),
            Commands::Invoice { receipt, number } => self.handle_invoice(receipt, number),
            Commands::Shell => self.handle_shell(),
        }
    }

    fn handle_add(&mut self, name: String, price: f64) -> Result<()> {
        match self.cart_service.add_product(name, price) {
            Ok(product) => {
                println!("{} Added {}", CHECKMARK, style(&product).green());
            }
            Err(e) => self.report_failure("add product", &e),
        }
        self.print_total();
        Ok(())
    }

    fn handle_edit(&mut self, position: usize, name: String, price: f64) -> Result<()> {
        match self
            .cart_service
            .edit_product(position_to_index(position), name, price)
        {
            Ok(product) => {
                println!("{} Item {} is now {}", CHECKMARK, position, style(&product).green());
            }
            Err(e) => self.report_failure("edit product", &e),
        }
        self.print_total();
        Ok(())
    }

    fn handle_remove(&mut self, position: usize, force: bool) -> Result<()> {
        let index = position_to_index(position);
        let Some(product) = self.cart_service.items().get(index) else {
            println!(
                "{} There is no item {} in a cart of {}",
                CROSS,
                position,
                self.cart_service.items().len()
            );
            return Ok(());
        };

        // Confirm removal unless force flag is used
        if !force {
            let theme = ColorfulTheme::default();
            let confirm = Confirm::with_theme(&theme)
                .with_prompt(format!("Remove {}?", product))
                .default(false)
                .interact()?;

            if !confirm {
                println!("Removal cancelled");
                return Ok(());
            }
        }

        match self.cart_service.remove_product(index) {
            Ok(removed) => {
                println!("{} Removed {}", CHECKMARK, style(&removed).yellow());
            }
            Err(e) => self.report_failure("remove product", &e),
        }
        self.print_total();
        Ok(())
    }

    fn handle_list(&self) -> Result<()> {
        let items = self.cart_service.items();
        if items.is_empty() {
            println!("{} The cart is empty", INFO);
        } else {
            println!("{} {}", CART, style(format!("{} item(s)", items.len())).bold());
            println!("{}", format_cart_table(items));
        }
        self.print_total();
        Ok(())
    }

    fn handle_total(&self) -> Result<()> {
        self.print_total();
        Ok(())
    }

    fn handle_invoice(&self, receipt: bool, number: Option<u32>) -> Result<()> {
        if receipt {
            let number = number.unwrap_or_else(|| rand::thread_rng().gen_range(0..MAX_RECEIPT_NUMBER));
            println!(
                "{}",
                format_receipt(
                    self.cart_service.items(),
                    self.cart_service.total(),
                    number,
                    &chrono::Local::now(),
                )
            );
        } else {
            println!("{}", self.cart_service.invoice());
        }
        Ok(())
    }

    // Stands in for the cart window: one action at a time until Quit.
    fn handle_shell(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let actions = ["Add product", "Edit product", "Remove product", "Invoice", "Quit"];

        println!(
            "{} {} ({})",
            CART,
            style("Shopping cart").bold().cyan(),
            style(self.cart_service.location()).dim()
        );

        loop {
            self.handle_list()?;

            let choice = Select::with_theme(&theme)
                .with_prompt("What next?")
                .items(&actions)
                .default(0)
                .interact()?;

            match choice {
                0 => {
                    let (name, price) = prompt_product(&theme, "Product name", "Price")?;
                    self.handle_add(name, price)?;
                }
                1 | 2 => {
                    let Some(position) = self.select_position(&theme)? else {
                        continue;
                    };
                    if choice == 1 {
                        let (name, price) = prompt_product(&theme, "New name", "New price")?;
                        self.handle_edit(position, name, price)?;
                    } else {
                        self.handle_remove(position, false)?;
                    }
                }
                3 => self.handle_invoice(true, None)?,
                _ => break,
            }
        }

        info!("Interactive session finished");
        Ok(())
    }

    fn select_position(&self, theme: &ColorfulTheme) -> Result<Option<usize>> {
        let labels: Vec<String> = self
            .cart_service
            .items()
            .iter()
            .map(|item| item.to_string())
            .collect();

        if labels.is_empty() {
            println!("{} Add a product first", WARNING);
            return Ok(None);
        }

        let index = Select::with_theme(theme)
            .with_prompt("Which product?")
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("Failed to read selection")?;

        Ok(index.map(|i| i + 1))
    }

    fn print_total(&self) {
        println!("{}", format_total(self.cart_service.total()));
    }

    fn report_failure(&self, action: &str, e: &CartServiceError) {
        match e {
            CartServiceError::CartError(_) => {
                println!("{} Failed to {}: {}", CROSS, action, style(e).red());
            }
            CartServiceError::StorageError(_) => {
                println!(
                    "{} Change applied but not saved to {}: {}",
                    WARNING,
                    style(self.cart_service.location()).cyan(),
                    style(e).red()
                );
                error!("Failed to {}: {}", action, e);
            }
        }
    }
}

fn prompt_product(theme: &ColorfulTheme, name_prompt: &str, price_prompt: &str) -> Result<(String, f64)> {
    let name: String = Input::with_theme(theme)
        .with_prompt(name_prompt)
        .interact_text()?;

    let price_text: String = Input::with_theme(theme)
        .with_prompt(price_prompt)
        .validate_with(|input: &String| -> Result<(), String> { parse_price(input).map(|_| ()) })
        .interact_text()?;

    let price = parse_price(&price_text).map_err(anyhow::Error::msg)?;
    info!("Read product '{}' at {}", name, format_money(price));
    Ok((name, price))
}
