//! HTTP transport for the book API.
//!
//! Requires the `http` feature. Uses reqwest; one `Client` is shared by every
//! call so connections are pooled.
//!
//! ## Example
//!
//! ```ignore
//! use bookshelf::api::{BookApi, Endpoints, HttpBookApi};
//!
//! let api = HttpBookApi::new(Endpoints::new("http://localhost:8080"));
//! let books = api.list().await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};

use super::{ApiError, BookApi, Endpoints};
use crate::book::{Book, BookId, BookInput, Profile};
use crate::config::ClientConfig;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// `BookApi` over a REST backend.
#[derive(Debug, Clone)]
pub struct HttpBookApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpBookApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self::with_client(Client::new(), endpoints)
    }

    /// Use a preconfigured client (proxies, TLS roots, default headers).
    pub fn with_client(client: Client, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.endpoints())
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Send and reject any non-2xx status, whatever the body says.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list(&self) -> Result<Vec<Book>, ApiError> {
        let url = self.endpoints.books();
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(&url)).await?;
        let body = response.bytes().await?;
        decode_list(&body)
    }

    async fn get(&self, id: BookId) -> Result<Book, ApiError> {
        let url = self.endpoints.book(id);
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(&url)).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn create(&self, input: &BookInput) -> Result<(), ApiError> {
        let url = self.endpoints.books();
        tracing::debug!(%url, title = %input.title, year = input.year, "POST");
        self.send(self.client.post(&url).json(input)).await?;
        Ok(())
    }

    async fn update(&self, id: BookId, input: &BookInput) -> Result<(), ApiError> {
        let url = self.endpoints.book(id);
        tracing::debug!(%url, title = %input.title, year = input.year, "PUT");
        self.send(self.client.put(&url).json(input)).await?;
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<(), ApiError> {
        let url = self.endpoints.book(id);
        tracing::debug!(%url, "DELETE");
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn profile(&self) -> Result<Option<Profile>, ApiError> {
        let Some(url) = self.endpoints.profile() else {
            return Ok(None);
        };
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(&url)).await?;
        let body = response.bytes().await?;
        Ok(Some(serde_json::from_slice(&body)?))
    }
}

/// An empty body or a JSON `null` both mean "no books".
fn decode_list(body: &[u8]) -> Result<Vec<Book>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let books: Option<Vec<Book>> = serde_json::from_slice(body)?;
    Ok(books.unwrap_or_default())
}
