//! HTTP implementation of [`ProductRepository`].
//!
//! Endpoint layout (relative to the configured base URL):
//!
//! | Operation        | Request                      |
//! |------------------|------------------------------|
//! | list-all         | `GET {base}`                 |
//! | get-by-id        | `GET {base}/{id}`            |
//! | create           | `POST {base}`                |
//! | update           | `PUT {base}/{id}`            |
//! | delete           | `DELETE {base}/{id}`         |
//! | search-by-name   | `GET {base}/search?name=..`  |
//! | by-category      | `GET {base}/category/{name}` |

use anyhow::Context;
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use margin_core::ProductId;
use margin_products::{Product, ProductPayload};

use crate::config::ClientConfig;
use crate::repository::{ProductRepository, RepositoryError, RepositoryResult};

/// Product repository backed by the REST API.
#[derive(Debug, Clone)]
pub struct HttpProductRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpProductRepository {
    pub fn new(config: ClientConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client for product API")?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Build a client from `MARGIN_API_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL extended with percent-encoded path segments.
    fn url(&self, segments: &[&str]) -> RepositoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RepositoryError::Network(format!("cannot extend base url {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> RepositoryResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;
        check_status(response).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> RepositoryResult<T> {
        tracing::debug!("GET {url}");
        let response = self.send(self.client.get(url)).await?;
        decode(response).await
    }
}

async fn check_status(response: Response) -> RepositoryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => RepositoryError::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => RepositoryError::Rejected(body),
        _ => RepositoryError::Status {
            status: status.as_u16(),
            body,
        },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| RepositoryError::Decode(e.to_string()))
}

#[async_trait::async_trait]
impl ProductRepository for HttpProductRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<Product>> {
        self.fetch(self.url(&[])?).await
    }

    async fn get_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        self.fetch(self.url(&[&id.to_string()])?).await
    }

    async fn create(&self, payload: &ProductPayload) -> RepositoryResult<Product> {
        let url = self.url(&[])?;
        tracing::debug!("POST {url}");
        let response = self.send(self.client.post(url).json(payload)).await?;
        decode(response).await
    }

    async fn update(&self, id: ProductId, payload: &ProductPayload) -> RepositoryResult<Product> {
        let url = self.url(&[&id.to_string()])?;
        tracing::debug!("PUT {url}");
        let response = self.send(self.client.put(url).json(payload)).await?;
        decode(response).await
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<()> {
        let url = self.url(&[&id.to_string()])?;
        tracing::debug!("DELETE {url}");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn search_by_name(&self, name: &str) -> RepositoryResult<Vec<Product>> {
        let mut url = self.url(&["search"])?;
        url.query_pairs_mut().append_pair("name", name);
        self.fetch(url).await
    }

    async fn by_category(&self, category: &str) -> RepositoryResult<Vec<Product>> {
        self.fetch(self.url(&["category", category])?).await
    }
}
