//! reqwest-backed transport
//!
//! Builds each request with a JSON content type and the token in the
//! `authorization` header. Non-2xx responses are returned as-is (no retry);
//! only failures to obtain a response at all become `Error::Http`.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::{ApiResponse, Error, Result, Transport};

/// Production transport speaking HTTP(S) to the configured base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given base URL.
    ///
    /// A trailing slash on the base URL is trimmed so that endpoint paths
    /// (which start with `/`) concatenate cleanly.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL this transport targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn execute(&self, request: reqwest::RequestBuilder, token: &str) -> Result<ApiResponse> {
        let response = request
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::AUTHORIZATION, token)
            .send()
            .await
            .map_err(|e| Error::Http(format!("request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        debug!(status, "upstream response");
        Ok(ApiResponse { status, body })
    }
}

impl Transport for HttpTransport {
    fn get<'a>(
        &'a self,
        token: &'a str,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!("{}{path}", self.base_url);
            self.execute(self.client.get(&url), token).await
        })
    }

    fn post<'a>(
        &'a self,
        token: &'a str,
        path: &'a str,
        body: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + 'a>> {
        Box::pin(async move {
            let url = format!("{}{path}", self.base_url);
            self.execute(self.client.post(&url).json(&body), token).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("https://api.example.com/v1/");
        assert_eq!(transport.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn base_url_without_slash_is_kept() {
        let transport = HttpTransport::new("https://api.example.com/v1");
        assert_eq!(transport.base_url(), "https://api.example.com/v1");
    }

    #[tokio::test]
    async fn unreachable_host_yields_http_error() {
        // Port 1 on localhost is never listening; the request fails before
        // any response exists.
        let transport = HttpTransport::new("http://127.0.0.1:1");
        let result = transport.get("token", "/users/@me").await;
        assert!(matches!(result, Err(Error::Http(_))));
    }
}
