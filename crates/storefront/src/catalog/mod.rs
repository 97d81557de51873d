//! Client for the third-party mock catalog API.
//!
//! Plain REST over JSON with `reqwest`. The API accepts writes but does not
//! durably persist them, so create/update/delete report success based on
//! the response alone and callers update local state optimistically.
//!
//! No response caching: the catalog is small and the UI re-fetches on
//! navigation, matching the upstream behavior.

mod error;

pub use error::CatalogError;

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use luxe_core::ProductId;

use crate::models::{NewProduct, Product};

/// Client for the mock catalog API.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

#[derive(Debug)]
struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a new catalog client for the given API base URL.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    /// Fetch the full product listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(["products"])?;
        self.get_json(url, "products").await
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        let url = self.endpoint(["products", &id.to_string()])?;
        self.get_json(url, &format!("product {id}")).await
    }

    /// Fetch the products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn products_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, CatalogError> {
        let url = self.endpoint(["products", "category", category])?;
        self.get_json(url, &format!("category {category}")).await
    }

    /// Create a product.
    ///
    /// The mock API echoes the record with a generated id without storing
    /// it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, product), fields(title = %product.title))]
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, CatalogError> {
        let url = self.endpoint(["products"])?;
        let request = self.inner.client.post(url).json(product);
        Self::send_json(request, "created product").await
    }

    /// Replace a product record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self, product), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, CatalogError> {
        let url = self.endpoint(["products", &id.to_string()])?;
        let request = self.inner.client.put(url).json(product);
        Self::send_json(request, &format!("product {id}")).await
    }

    /// Delete a product, returning the deleted record when the API echoes
    /// one.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let url = self.endpoint(["products", &id.to_string()])?;
        let request = self.inner.client.delete(url);
        Self::send_json(request, &format!("product {id}")).await
    }

    /// Build an endpoint URL under the configured base.
    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, CatalogError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::BadBaseUrl)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T, CatalogError> {
        Self::send_json(self.inner.client.get(url), what).await
    }

    async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, CatalogError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            tracing::error!(%status, what, "catalog API returned non-success status");
            return Err(CatalogError::Status { status });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_paths() {
        let client = client("https://fakestoreapi.com");

        let url = client.endpoint(["products"]).unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products");

        let url = client.endpoint(["products", "7"]).unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products/7");
    }

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let client = client("https://fakestoreapi.com/");
        let url = client.endpoint(["products"]).unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/products");
    }

    #[test]
    fn test_endpoint_encodes_category_names() {
        let client = client("https://fakestoreapi.com");
        let url = client
            .endpoint(["products", "category", "men's clothing"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://fakestoreapi.com/products/category/men's%20clothing"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = CatalogError::NotFound("product 42".to_string());
        assert_eq!(err.to_string(), "not found: product 42");
    }
}
