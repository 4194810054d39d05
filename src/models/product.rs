use serde::{Deserialize, Serialize};
use std::fmt;

/// A single line of the cart: a product name and its unit price.
///
/// No validation is applied; any name and any price (zero, negative,
/// infinite, NaN) is accepted. Parsing user input into a price is the front end's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    #[serde(with = "crate::storage::snapshot::price")]
    price: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price;
    }
}

// "Apple - $1.5". Debug formatting keeps the ".0" on whole prices
// ("Bread - $2.0") and is Rust's float notation, not a locale or currency format.
impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - ${:?}", self.name, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_any_price() {
        let free = Product::new("Sample", 0.0);
        let refund = Product::new("Refund", -3.25);

        assert_eq!(free.price(), 0.0);
        assert_eq!(refund.price(), -3.25);
        assert_eq!(refund.name(), "Refund");
    }

    #[test]
    fn test_setters_mutate_in_place() {
        let mut product = Product::new("Apple", 1.5);
        product.set_name("Green apple");
        product.set_price(1.75);

        assert_eq!(product.name(), "Green apple");
        assert_eq!(product.price(), 1.75);
    }

    #[test]
    fn test_display_line() {
        assert_eq!(Product::new("Apple", 1.5).to_string(), "Apple - $1.5");
        assert_eq!(Product::new("Bread", 2.0).to_string(), "Bread - $2.0");
    }

    #[test]
    fn test_display_line_extreme_prices() {
        assert_eq!(Product::new("Car", 1e7).to_string(), "Car - $10000000.0");
        assert_eq!(Product::new("Planet", 1e20).to_string(), "Planet - $1e20");
        assert_eq!(Product::new("Dust", 1e-5).to_string(), "Dust - $1e-5");
        assert_eq!(Product::new("Unknown", f64::NAN).to_string(), "Unknown - $NaN");
        assert_eq!(Product::new("Debt", f64::NEG_INFINITY).to_string(), "Debt - $-inf");
    }
}
