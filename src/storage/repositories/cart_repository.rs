use std::path::{Path, PathBuf};
use tracing::info;

use crate::{models::cart::Cart, storage::snapshot::StorageError};

/// Where a cart lives between runs
pub trait CartRepository {
    /// Loads the stored cart, or `None` if there is nothing usable to load.
    fn load(&self) -> Option<Cart>;
    fn save(&self, cart: &Cart) -> Result<(), StorageError>;
    /// Human-readable location, used in messages.
    fn location(&self) -> String;
}

/// Snapshot file on the local filesystem.
pub struct FileCartRepository {
    path: PathBuf,
}

impl FileCartRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartRepository for FileCartRepository {
    fn load(&self) -> Option<Cart> {
        let cart = Cart::load_from_file(&self.path)?;
        info!("Cart loaded from {} ({} items)", self.path.display(), cart.len());
        Some(cart)
    }

    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        cart.save_to_file(&self.path)?;
        info!("Cart saved to {} ({} items)", self.path.display(), cart.len());
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
