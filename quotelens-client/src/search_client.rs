//! HTTP client for the external search backend

use quotelens_core::{ErrorEnvelope, Location, QuotelensError, SearchQuery, SearchResults};
use serde::Deserialize;

/// Async client for a search backend speaking the quotelens wire shape:
/// `POST /search` with a [`SearchQuery`] body, `GET /instance` for
/// instance metadata. The client retries nothing; failures propagate to
/// the caller.
pub struct SearchClient {
    base_url: String,
    client: reqwest::Client,
}

/// Instance metadata returned by `GET /instance`.
///
/// A backend carrying a `local_prefix` is a private instance: searches
/// run across all of its repositories, so no repo filter is applied.
#[derive(Debug, Clone, Deserialize)]
pub struct InstanceInfo {
    pub service: String,
    #[serde(default)]
    pub local_prefix: Option<String>,
}

fn connection_error(err: reqwest::Error) -> QuotelensError {
    QuotelensError::BackendError {
        code: "connection_error".to_string(),
        message: err.to_string(),
        hint: "Is the search backend running?".to_string(),
    }
}

fn decode_error(err: reqwest::Error) -> QuotelensError {
    QuotelensError::BackendError {
        code: "parse_error".to_string(),
        message: err.to_string(),
        hint: "Unexpected response from the search backend".to_string(),
    }
}

impl SearchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a search and flatten the response into locations.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Location>, QuotelensError> {
        let url = format!("{}/search", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .map_err(connection_error)?;

        if !resp.status().is_success() {
            return Self::handle_error(resp).await;
        }

        let body: SearchResults = resp.json().await.map_err(decode_error)?;
        Ok(body.into_locations())
    }

    pub async fn instance(&self) -> Result<InstanceInfo, QuotelensError> {
        let url = format!("{}/instance", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(connection_error)?;

        if !resp.status().is_success() {
            return Self::handle_error(resp).await;
        }

        resp.json().await.map_err(decode_error)
    }

    /// Whether the backend is a private instance (searches are not
    /// scoped to a single repository).
    pub async fn is_private(&self) -> Result<bool, QuotelensError> {
        Ok(self.instance().await?.local_prefix.is_some())
    }

    async fn handle_error<T>(resp: reqwest::Response) -> Result<T, QuotelensError> {
        let status = resp.status();
        match resp.json::<ErrorEnvelope>().await {
            Ok(envelope) => Err(QuotelensError::BackendError {
                code: envelope.code,
                message: envelope.message,
                hint: envelope.hint,
            }),
            Err(_) => Err(QuotelensError::BackendError {
                code: format!("http_{}", status.as_u16()),
                message: format!("HTTP {} from search backend", status),
                hint: "Check backend logs".to_string(),
            }),
        }
    }
}

/// Check if an error carries a specific backend error code
pub fn is_error_code(err: &QuotelensError, code: &str) -> bool {
    matches!(err, QuotelensError::BackendError { code: c, .. } if c == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let client = SearchClient::new("http://localhost:7080/");
        assert_eq!(client.base_url(), "http://localhost:7080");
    }

    #[test]
    fn error_code_matcher() {
        let err = QuotelensError::BackendError {
            code: "connection_error".to_string(),
            message: "refused".to_string(),
            hint: "".to_string(),
        };
        assert!(is_error_code(&err, "connection_error"));
        assert!(!is_error_code(&err, "parse_error"));
    }
}
