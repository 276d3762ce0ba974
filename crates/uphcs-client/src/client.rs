use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE, HeaderName};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4353";

/// Connection to the backend: base URL plus the session token, if any.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

/// A downloaded file.
#[derive(Debug, Clone)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: trimmed.to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Map a non-2xx response to `ClientError::Fetch`, preferring the
    /// backend's `{"error": ...}` message over the raw body.
    async fn check(path: &str, resp: Response) -> Result<Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_string()
                } else {
                    body
                }
            });
        tracing::debug!(path, status = status.as_u16(), %message, "request failed");
        Err(ClientError::Fetch {
            path: path.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn send(&self, method: Method, path: &str, req: RequestBuilder) -> Result<Response, ClientError> {
        tracing::debug!(%method, path, "request");
        let resp = req.send().await?;
        Self::check(path, resp).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self.send(Method::GET, path, self.request(Method::GET, path)).await?;
        Ok(resp.json().await?)
    }

    /// Like [`get_json`](Self::get_json), but a 404 means "nothing there".
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        match self.get_json(path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.request(Method::POST, path).json(body);
        let resp = self.send(Method::POST, path, req).await?;
        Ok(resp.json().await?)
    }

    /// POST and ignore whatever the backend returns.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let req = self.request(Method::POST, path).json(body);
        self.send(Method::POST, path, req).await?;
        Ok(())
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ClientError> {
        let req = self.request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, req).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, path, self.request(Method::DELETE, path))
            .await?;
        Ok(())
    }

    pub async fn get_bytes(&self, path: &str) -> Result<Download, ClientError> {
        let resp = self.send(Method::GET, path, self.request(Method::GET, path)).await?;
        let header = |name: HeaderName| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let content_type = header(CONTENT_TYPE);
        let content_disposition = header(CONTENT_DISPOSITION);
        let bytes = resp.bytes().await?.to_vec();
        Ok(Download {
            bytes,
            content_type,
            content_disposition,
        })
    }
}
