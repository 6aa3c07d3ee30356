//! HTTP client abstraction for testability

use super::types::GeocoderError;
use std::future::Future;
use tracing::{debug, trace, warn};

/// Trait for blocking HTTP operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request with query parameters.
    ///
    /// Parameter values are URL-encoded by the implementation.
    fn get_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, GeocoderError>;
}

/// Trait for asynchronous HTTP operations.
///
/// Preferred for bulk ingestion; uses non-blocking I/O so concurrent
/// facility fan-out does not exhaust a thread pool.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request with query parameters.
    fn get_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, GeocoderError>> + Send;
}

/// Default request timeout for geocoding calls.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, GeocoderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new ReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, GeocoderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GeocoderError::Http(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get_with_query(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, GeocoderError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .map_err(|e| GeocoderError::Http(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GeocoderError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| GeocoderError::Http(format!("failed to read response: {}", e)))
    }
}

/// Async HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a new AsyncReqwestClient with default configuration.
    pub fn new() -> Result<Self, GeocoderError> {
        Self::with_timeout(DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a new AsyncReqwestClient with custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, GeocoderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| {
                GeocoderError::Http(format!("failed to create async HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<u8>, GeocoderError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).query(query).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(GeocoderError::Http(format!("request failed: {}", e)));
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url,
                status = response.status().as_u16(),
                "HTTP error status"
            );
            return Err(GeocoderError::Http(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| GeocoderError::Http(format!("failed to read response: {}", e)))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    /// Mock HTTP client for testing (blocking)
    #[derive(Clone)]
    pub struct MockHttpClient {
        pub response: Result<Vec<u8>, GeocoderError>,
    }

    impl HttpClient for MockHttpClient {
        fn get_with_query(
            &self,
            _url: &str,
            _query: &[(&str, &str)],
        ) -> Result<Vec<u8>, GeocoderError> {
            self.response.clone()
        }
    }

    /// Mock async HTTP client for testing
    #[derive(Clone)]
    pub struct MockAsyncHttpClient {
        pub response: Result<Vec<u8>, GeocoderError>,
    }

    impl AsyncHttpClient for MockAsyncHttpClient {
        async fn get_with_query(
            &self,
            _url: &str,
            _query: &[(&str, &str)],
        ) -> Result<Vec<u8>, GeocoderError> {
            self.response.clone()
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient {
            response: Ok(b"{}".to_vec()),
        };
        let result = mock.get_with_query("http://example.com", &[]);
        assert_eq!(result.unwrap(), b"{}");
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient {
            response: Err(GeocoderError::Http("test error".to_string())),
        };
        assert!(mock.get_with_query("http://example.com", &[]).is_err());
    }

    #[tokio::test]
    async fn test_mock_async_client_success() {
        let mock = MockAsyncHttpClient {
            response: Ok(b"{}".to_vec()),
        };
        let result = mock.get_with_query("http://example.com", &[]).await;
        assert!(result.is_ok());
    }
}
