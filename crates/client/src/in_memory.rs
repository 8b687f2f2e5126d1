use tokio::sync::RwLock;

use margin_core::ProductId;
use margin_products::{Product, ProductPayload};

use crate::repository::{ProductRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Catalog {
    next_id: u64,
    products: Vec<Product>,
}

/// In-memory product repository.
///
/// Intended for tests/dev. Behaves like the backend: ids are assigned
/// sequentially from 1, derived fields are computed on every write, insertion
/// order is preserved and name search is a case-insensitive substring match.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    catalog: RwLock<Catalog>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with payloads, assigning ids in order.
    pub async fn seeded(payloads: impl IntoIterator<Item = ProductPayload>) -> RepositoryResult<Self> {
        let repo = Self::new();
        for payload in payloads {
            repo.create(&payload).await?;
        }
        Ok(repo)
    }

    pub async fn len(&self) -> usize {
        self.catalog.read().await.products.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn check_payload(payload: &ProductPayload) -> RepositoryResult<()> {
    if payload.product_name.trim().is_empty() {
        return Err(RepositoryError::Rejected("productName must not be blank".to_string()));
    }
    if !(payload.cost_price >= 0.0) || !(payload.selling_price >= 0.0) {
        return Err(RepositoryError::Rejected("prices must be non-negative".to_string()));
    }
    Ok(())
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        Ok(self.catalog.read().await.products.clone())
    }

    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        self.catalog
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, payload: &ProductPayload) -> RepositoryResult<Product> {
        check_payload(payload)?;

        let mut catalog = self.catalog.write().await;
        catalog.next_id += 1;
        let product = Product::from_payload(ProductId::new(catalog.next_id), payload.clone());
        catalog.products.push(product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, payload: &ProductPayload) -> RepositoryResult<Product> {
        check_payload(payload)?;

        let mut catalog = self.catalog.write().await;
        let slot = catalog
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = Product::from_payload(id, payload.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        let mut catalog = self.catalog.write().await;
        let before = catalog.products.len();
        catalog.products.retain(|p| p.id != id);
        if catalog.products.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn search_by_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        let needle = name.to_lowercase();
        Ok(self
            .catalog
            .read()
            .await
            .products
            .iter()
            .filter(|p| p.product_name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn by_category(&self, category: &str) -> RepositoryResult<Vec<Product>> {
        Ok(self
            .catalog
            .read()
            .await
            .products
            .iter()
            .filter(|p| {
                p.category
                    .as_deref()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category))
            })
            .cloned()
            .collect())
    }
}
