//! HTTP client for the remote product/stock query service.
//!
//! Read-only REST lookups over `reqwest`. Product records are cached via
//! `moka` (TTL from config) - display attributes do not change often enough
//! to justify a round trip per add. Stock is NEVER cached: the manager
//! validates quantities against the amount available at call time.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tracing::{debug, error, instrument};
use url::Url;

use rocket_shoes_core::{Product, ProductId, Stock};

use crate::config::CatalogConfig;
use crate::error::CatalogError;

/// Client for the product/stock query service.
///
/// Cheaply cloneable; all clones share the HTTP connection pool and the
/// product cache.
#[derive(Clone, Debug)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

#[derive(Debug)]
struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    access_token: Option<String>,
    cache: Cache<ProductId, Product>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.base_url.clone(),
                access_token: config
                    .access_token
                    .as_ref()
                    .map(|t| t.expose_secret().to_string()),
                cache,
            }),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Execute a GET against `path` and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, CatalogError> {
        let mut request = self.inner.client.get(self.endpoint(path));
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        // Body as text first for better error diagnostics
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    /// Get a product by id.
    ///
    /// Records are cached for the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the catalog has no such product, or an error
    /// if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.cache.get(&id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        let product: Product = match self.get_json(&format!("products/{id}")).await {
            Ok(product) => product,
            Err(CatalogError::Status(status)) if status == StatusCode::NOT_FOUND => {
                return Err(CatalogError::NotFound(id));
            }
            Err(e) => return Err(e),
        };

        self.inner.cache.insert(id, product.clone()).await;
        Ok(product)
    }

    /// List the whole catalog.
    ///
    /// Uncached: used for storefront listings where freshness matters more
    /// than the extra round trip.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        self.get_json("products").await
    }

    /// Get current stock for a product.
    ///
    /// Never cached: quantity checks must see the amount available at call
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the service tracks no stock for this id, or an
    /// error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        match self.get_json(&format!("stock/{id}")).await {
            Err(CatalogError::Status(status)) if status == StatusCode::NOT_FOUND => {
                Err(CatalogError::NotFound(id))
            }
            other => other,
        }
    }

    /// Drop the cached record for a product, forcing the next lookup to hit
    /// the service.
    pub async fn invalidate_product(&self, id: ProductId) {
        self.inner.cache.invalidate(&id).await;
    }
}
