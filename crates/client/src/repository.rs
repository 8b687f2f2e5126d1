//! Repository trait and its error model.

use thiserror::Error;

use margin_core::ProductId;
use margin_products::{Product, ProductPayload};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Failure at the repository boundary.
///
/// Every variant is transient from the caller's point of view: the user may
/// retry by re-issuing the action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("product not found")]
    NotFound,
    #[error("request rejected by backend: {0}")]
    Rejected(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RepositoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound)
    }
}

/// Async product repository interface.
///
/// Result sequences preserve the backend's order.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products.
    async fn list_all(&self) -> RepositoryResult<Vec<Product>>;

    /// A single product by id.
    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Product>;

    /// Create a product; the repository assigns the id.
    async fn create(&self, payload: &ProductPayload) -> RepositoryResult<Product>;

    /// Replace the editable fields of an existing product.
    async fn update(&self, id: ProductId, payload: &ProductPayload) -> RepositoryResult<Product>;

    async fn delete(&self, id: ProductId) -> RepositoryResult<()>;

    /// Products whose name matches `name`.
    async fn search_by_name(&self, name: &str) -> RepositoryResult<Vec<Product>>;

    /// Products in `category`.
    async fn by_category(&self, category: &str) -> RepositoryResult<Vec<Product>>;
}
