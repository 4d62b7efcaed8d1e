//! Product Repository Trait
//!
//! Defines the persistence abstraction for products.
//! Implemented by adapters in the infrastructure layer.

use async_trait::async_trait;

use super::aggregate::Product;
use super::errors::CatalogError;
use crate::domain::shared::ProductId;

/// Repository trait for Product persistence.
///
/// This is a domain interface (port) that is implemented by
/// infrastructure adapters (document store, in-memory, etc.).
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Save a product (insert or update).
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, product: &Product) -> Result<(), CatalogError>;

    /// Find a product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// Find all products currently on sale.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    async fn find_active(&self) -> Result<Vec<Product>, CatalogError>;

    /// Delete a product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the product is missing or deletion fails.
    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError>;
}
