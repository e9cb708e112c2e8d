//! `products/*` endpoints.

use tracing::{debug, instrument};

use shopfront_core::{Product, ProductId};

use super::cache::{CacheKey, CacheValue};
use super::{ApiClient, ApiError};

impl ApiClient {
    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        if let Some(CacheValue::Products(products)) = self.cached(CacheKey::Products).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let url = self.endpoint("products")?;
        let products: Vec<Product> = self.get(url).await?;

        self.cache_insert(CacheKey::Products, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the product does not exist, or any
    /// transport/parse error.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        let key = CacheKey::Product(product_id);
        if let Some(CacheValue::Product(product)) = self.cached(key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let url = self.endpoint(&format!("products/{product_id}"))?;
        let product: Product = self.get(url).await?;

        self.cache_insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Server-side product search. Results are not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("products/search")?;
        url.query_pairs_mut().append_pair("q", query);
        self.get(url).await
    }
}
