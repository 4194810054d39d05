use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    models::{Cart, CartError, Product},
    storage::{repositories::CartRepository, StorageError},
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("{0}")]
    CartError(#[from] CartError),

    #[error("Failed to save cart: {0}")]
    StorageError(#[from] StorageError),
}

/// Owns the working cart and writes a full snapshot after every mutation.
///
/// When the save fails the change is still applied in memory and the
/// storage error is returned, so the caller can report it and carry on.
pub struct CartService {
    cart_repository: Arc<dyn CartRepository>,
    cart: Cart,
}

impl CartService {
    /// Loads the stored cart, starting empty if there is none.
    pub fn open(cart_repository: Arc<dyn CartRepository>) -> Self {
        let cart = match cart_repository.load() {
            Some(cart) => cart,
            None => {
                info!("Starting with an empty cart at {}", cart_repository.location());
                Cart::new()
            }
        };

        Self {
            cart_repository,
            cart,
        }
    }

    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Product, CartServiceError> {
        let product = Product::new(name, price);
        info!("Adding product '{}' at {}", product.name(), product.price());

        self.cart.add_item(product.clone());
        self.persist()?;
        Ok(product)
    }

    pub fn edit_product(
        &mut self,
        index: usize,
        name: impl Into<String>,
        price: f64,
    ) -> Result<Product, CartServiceError> {
        let product = self
            .cart
            .edit_item(index, name, price)
            .map_err(|e| {
                warn!("Edit rejected: {}", e);
                e
            })?
            .clone();
        info!("Edited item {} to '{}' at {}", index, product.name(), product.price());

        self.persist()?;
        Ok(product)
    }

    pub fn remove_product(&mut self, index: usize) -> Result<Product, CartServiceError> {
        let removed = self.cart.remove_item(index).map_err(|e| {
            warn!("Remove rejected: {}", e);
            e
        })?;
        info!("Removed item {} ('{}')", index, removed.name());

        self.persist()?;
        Ok(removed)
    }

    pub fn items(&self) -> &[Product] {
        self.cart.items()
    }

    pub fn total(&self) -> f64 {
        self.cart.calculate_total()
    }

    pub fn invoice(&self) -> String {
        self.cart.render_invoice()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn location(&self) -> String {
        self.cart_repository.location()
    }

    fn persist(&self) -> Result<(), CartServiceError> {
        self.cart_repository.save(&self.cart).map_err(|e| {
            error!("Failed to save cart to {}: {}", self.cart_repository.location(), e);
            CartServiceError::StorageError(e)
        })?;

        debug!("Cart persisted with {} items", self.cart.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    // Mock repository for testing
    struct MockCartRepository {
        stored: Mutex<Option<Cart>>,
        saves: Mutex<usize>,
        fail_saves: AtomicBool,
    }

    impl MockCartRepository {
        fn new() -> Self {
            Self {
                stored: Mutex::new(None),
                saves: Mutex::new(0),
                fail_saves: AtomicBool::new(false),
            }
        }

        fn with_cart(cart: Cart) -> Self {
            let repo = Self::new();
            *repo.stored.lock().unwrap() = Some(cart);
            repo
        }

        fn stored(&self) -> Option<Cart> {
            self.stored.lock().unwrap().clone()
        }

        fn save_count(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    impl CartRepository for MockCartRepository {
        fn load(&self) -> Option<Cart> {
            self.stored.lock().unwrap().clone()
        }

        fn save(&self, cart: &Cart) -> Result<(), StorageError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::IoError(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            *self.stored.lock().unwrap() = Some(cart.clone());
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    #[test]
    fn test_open_without_stored_cart_starts_empty() {
        let repo = Arc::new(MockCartRepository::new());
        let service = CartService::open(repo.clone());

        assert!(service.items().is_empty());
        assert_eq!(service.total(), 0.0);
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn test_open_restores_stored_cart() {
        let stored = Cart::from_items(vec![Product::new("Tea", 3.2)]);
        let repo = Arc::new(MockCartRepository::with_cart(stored.clone()));

        let service = CartService::open(repo);
        assert_eq!(service.cart(), &stored);
    }

    #[test]
    fn test_every_mutation_saves_full_cart() {
        let repo = Arc::new(MockCartRepository::new());
        let mut service = CartService::open(repo.clone());

        service.add_product("Apple", 1.5).unwrap();
        service.add_product("Bread", 2.0).unwrap();
        service.edit_product(0, "Apple", 1.75).unwrap();
        service.remove_product(1).unwrap();

        assert_eq!(repo.save_count(), 4);
        assert_eq!(
            repo.stored().unwrap().items(),
            &[Product::new("Apple", 1.75)]
        );
    }

    #[test]
    fn test_rejected_index_does_not_save() {
        let repo = Arc::new(MockCartRepository::new());
        let mut service = CartService::open(repo.clone());
        service.add_product("Apple", 1.5).unwrap();

        let result = service.remove_product(5);
        assert!(matches!(
            result,
            Err(CartServiceError::CartError(CartError::IndexOutOfRange { index: 5, len: 1 }))
        ));
        assert!(service.edit_product(1, "Pear", 0.5).is_err());
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn test_failed_save_keeps_change_in_memory() {
        let repo = Arc::new(MockCartRepository::new());
        let mut service = CartService::open(repo.clone());
        repo.fail_saves.store(true, Ordering::SeqCst);

        let result = service.add_product("Apple", 1.5);

        assert!(matches!(result, Err(CartServiceError::StorageError(_))));
        assert_eq!(service.items().len(), 1);
        assert!(repo.stored().is_none());
    }
}
