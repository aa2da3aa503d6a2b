use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::products::{
    dto::{CreatedProduct, MessageResponse},
    repo_types::{NewProduct, Product},
};

pub const DEFAULT_API_URL: &str = "http://localhost:3000/products";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// The server's own explanation when there is one, otherwise the transport error.
    pub fn reason(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(e) => e.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status(),
        }
    }
}

/// HTTP client for the `/products` resource.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProductClient {
    /// `base_url` is the collection URL, e.g. `http://localhost:3000/products`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let res = self.http.get(&self.base_url).send().await?;
        decode(res).await
    }

    pub async fn get(&self, id: i64) -> Result<Product, ClientError> {
        let res = self.http.get(self.item_url(id)).send().await?;
        decode(res).await
    }

    /// Posts any JSON body; the server decides whether it is a valid product.
    pub async fn create<T: Serialize + ?Sized>(&self, body: &T) -> Result<CreatedProduct, ClientError> {
        let res = self.http.post(&self.base_url).json(body).send().await?;
        let created: CreatedProduct = decode(res).await?;
        debug!(id = created.id, "product created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, product: &NewProduct) -> Result<MessageResponse, ClientError> {
        let res = self.http.put(self.item_url(id)).json(product).send().await?;
        decode(res).await
    }

    pub async fn delete(&self, id: i64) -> Result<MessageResponse, ClientError> {
        let res = self.http.delete(self.item_url(id)).send().await?;
        decode(res).await
    }
}

async fn decode<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res.json::<T>().await?);
    }

    let message = res
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(ClientError::Api { status, message })
}
