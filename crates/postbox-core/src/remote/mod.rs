//! Remote source: fetches the full post collection from the origin server.

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::{Error, Result};
use crate::models::Post;

/// Capability to retrieve the current full post collection.
///
/// A single transport or decode failure aborts the whole fetch; there is no
/// pagination or partial-result contract.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch every post the origin currently has.
    async fn fetch_all(&self) -> Result<Vec<Post>>;
}

/// HTTP implementation of [`RemoteSource`] over a JSON REST origin.
#[derive(Clone)]
pub struct HttpRemoteSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemoteSource {
    /// Create a client for the given base URL.
    ///
    /// The URL must carry an http/https scheme; a trailing slash is
    /// stripped so endpoint paths can be appended uniformly.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    /// The normalized base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_all(&self) -> Result<Vec<Post>> {
        let url = format!("{}/posts", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format_api_error(status, &body)));
        }

        Ok(response.json::<Vec<Post>>().await?)
    }
}

fn format_api_error(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        let excerpt: String = trimmed.chars().take(200).collect();
        format!("{} ({})", excerpt, status.as_u16())
    }
}

fn normalize_base_url(raw: String) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "remote base URL must not be empty".to_string(),
        ));
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(
            "remote base URL must include http:// or https://".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert!(normalize_base_url(String::new()).is_err());
        assert!(normalize_base_url("jsonplaceholder.typicode.com".to_string()).is_err());
    }

    #[test]
    fn normalize_base_url_strips_trailing_slash() {
        let url = normalize_base_url("https://example.com/api/".to_string()).unwrap();
        assert_eq!(url, "https://example.com/api");
    }

    #[test]
    fn http_remote_source_keeps_normalized_url() {
        let source = HttpRemoteSource::new("https://example.com/").unwrap();
        assert_eq!(source.base_url(), "https://example.com");
    }

    #[test]
    fn format_api_error_without_body() {
        assert_eq!(
            format_api_error(StatusCode::SERVICE_UNAVAILABLE, "  "),
            "HTTP 503"
        );
    }

    #[test]
    fn format_api_error_with_body_excerpt() {
        let message = format_api_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(message, "upstream down (502)");
    }
}
