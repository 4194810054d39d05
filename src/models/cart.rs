use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    models::product::Product,
    storage::snapshot::{self, StorageError},
};

#[derive(Error, Debug, PartialEq)]
pub enum CartError {
    #[error("Index {index} is out of range for a cart of {len} item(s)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Ordered collection of products.
///
/// Insertion order is the display and indexing order. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Product>) -> Self {
        Self { items }
    }

    pub fn add_item(&mut self, product: Product) {
        self.items.push(product);
    }

    /// Removes the product at `index`, shifting every later product down by one.
    pub fn remove_item(&mut self, index: usize) -> Result<Product, CartError> {
        self.check_index(index)?;
        Ok(self.items.remove(index))
    }

    /// Overwrites both fields of the product at `index`.
    pub fn edit_item(
        &mut self,
        index: usize,
        new_name: impl Into<String>,
        new_price: f64,
    ) -> Result<&Product, CartError> {
        let len = self.items.len();
        let product = self
            .items
            .get_mut(index)
            .ok_or(CartError::IndexOutOfRange { index, len })?;

        product.set_name(new_name);
        product.set_price(new_price);
        Ok(&*product)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn calculate_total(&self) -> f64 {
        // fold from +0.0: an empty float `sum()` may yield -0.0 and print as "-0.00"
        self.items.iter().fold(0.0, |total, item| total + item.price())
    }

    /// Plain-text invoice: a header, one `"<name> - $<price>"` line per item
    /// and the total rounded to cents.
    pub fn render_invoice(&self) -> String {
        let mut invoice = String::from("Invoice:\n");
        for item in &self.items {
            invoice.push_str(&format!("{}\n", item));
        }
        invoice.push_str(&format!("Total: ${:.2}", self.calculate_total()));
        invoice
    }

    /// Writes the whole cart as one snapshot, replacing whatever is at `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        snapshot::write_snapshot(path.as_ref(), &self.items)
    }

    /// Reads a cart back from `path`.
    ///
    /// Returns `None` when the file is missing, unreadable or not a snapshot;
    /// callers fall back to `Cart::new()`.
    pub fn load_from_file(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match snapshot::read_snapshot(path) {
            Ok(Some(items)) => Some(Self::from_items(items)),
            Ok(None) => {
                debug!("No cart snapshot at {}", path.display());
                None
            }
            Err(e) => {
                warn!("Ignoring unusable cart snapshot at {}: {}", path.display(), e);
                None
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<(), CartError> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(CartError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
        }
    }
}
