use std::time::Instant;

use backon::Retryable;
use serde::de::DeserializeOwned;

use crate::http::{HttpMethod, HttpRequest, HttpTransport};
use crate::retry::RetryConfig;

use super::error::{Result, UpstreamError};
use super::types::{Envelope, Page};

/// Parameters for one paginated list request.
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    /// Relation include specifier (e.g. `squad`, `staff`).
    pub include: Option<&'static str>,
}

/// Client for the upstream sports-data API.
///
/// Generic over [`HttpTransport`] so the whole pipeline can run against the
/// in-memory mock in tests. The client retries transient failures (429, 5xx,
/// network) with exponential backoff and jitter; permanent failures propagate
/// immediately. It never caches - persistence is the orchestrator's job.
pub struct UpstreamClient<T: HttpTransport> {
    transport: T,
    base_url: String,
    token: String,
    retry: RetryConfig,
}

impl<T: HttpTransport> UpstreamClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            retry: RetryConfig::default(),
        }
    }

    /// Override the retry policy (tests use millisecond delays).
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Build the request URL for a list endpoint page.
    fn route(&self, endpoint: &str, query: &PageQuery) -> String {
        let mut url = format!(
            "{}{}?page={}&per_page={}",
            self.base_url, endpoint, query.page, query.per_page
        );
        if let Some(include) = query.include {
            url.push_str("&include=");
            url.push_str(include);
        }
        url
    }

    /// Fetch one page of records from a list endpoint.
    ///
    /// # Errors
    /// Returns the last [`UpstreamError`] once transient-failure retries are
    /// exhausted, or immediately for permanent failures.
    pub async fn fetch_page<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &PageQuery,
    ) -> Result<Page<R>> {
        let fetch = || async { self.fetch_page_once(endpoint, query).await };

        fetch
            .retry(self.retry.clone().into_backoff())
            .when(UpstreamError::is_transient)
            .notify(|err: &UpstreamError, dur| {
                tracing::debug!(
                    delay_ms = dur.as_millis() as u64,
                    error = %err,
                    "retrying upstream fetch"
                );
            })
            .await
    }

    /// One attempt, independently timed for observability.
    async fn fetch_page_once<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &PageQuery,
    ) -> Result<Page<R>> {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: self.route(endpoint, query),
            headers: vec![
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.token),
                ),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        };

        let started = Instant::now();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| UpstreamError::Network {
                message: e.to_string(),
            })?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match response.status {
            200..=299 => {
                let envelope: Envelope<R> =
                    serde_json::from_slice(&response.body).map_err(|e| UpstreamError::Decode {
                        message: e.to_string(),
                    })?;
                tracing::debug!(
                    endpoint,
                    page = query.page,
                    rows = envelope.data.len(),
                    has_more = envelope.pagination.has_more,
                    elapsed_ms,
                    "fetched upstream page"
                );
                Ok(Page {
                    rows: envelope.data,
                    has_more: envelope.pagination.has_more,
                })
            }
            429 => {
                tracing::debug!(endpoint, page = query.page, elapsed_ms, "rate limited");
                Err(UpstreamError::RateLimited)
            }
            status if status >= 500 => {
                tracing::debug!(endpoint, page = query.page, status, elapsed_ms, "server error");
                Err(UpstreamError::Server { status })
            }
            status => {
                tracing::debug!(endpoint, page = query.page, status, elapsed_ms, "client error");
                Err(UpstreamError::Client { status })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use crate::http::MockTransport;
    use crate::upstream::types::RawLeague;

    use super::*;

    fn fast_retry() -> RetryConfig {
        RetryConfig::new(Duration::from_millis(1), Duration::from_millis(5), 3).with_jitter(false)
    }

    fn client(transport: MockTransport) -> UpstreamClient<MockTransport> {
        UpstreamClient::new(transport, "https://api.example.com/v1", "secret")
            .with_retry(fast_retry())
    }

    fn query() -> PageQuery {
        PageQuery {
            page: 1,
            per_page: 100,
            include: None,
        }
    }

    #[test]
    fn route_includes_pagination_and_relation_params() {
        let client = client(MockTransport::new());
        let url = client.route(
            "/teams",
            &PageQuery {
                page: 3,
                per_page: 50,
                include: Some("squad"),
            },
        );
        assert_eq!(
            url,
            "https://api.example.com/v1/teams?page=3&per_page=50&include=squad"
        );
    }

    #[tokio::test]
    async fn fetch_page_parses_envelope_and_sends_bearer_token() {
        let transport = MockTransport::new();
        transport.push_json(
            "https://api.example.com/v1/leagues?page=1&per_page=100",
            200,
            &json!({
                "data": [{"id": 1, "name": "Premier League"}],
                "pagination": {"has_more": true}
            }),
        );

        let client = client(transport.clone());
        let page: Page<RawLeague> = client
            .fetch_page("/leagues", &query())
            .await
            .expect("fetch should succeed");

        assert_eq!(page.rows.len(), 1);
        assert!(page.has_more);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(
            requests[0]
                .headers
                .iter()
                .any(|(k, v)| k == "Authorization" && v == "Bearer secret")
        );
    }

    #[tokio::test]
    async fn fetch_page_retries_transient_failures_until_success() {
        let url = "https://api.example.com/v1/leagues?page=1&per_page=100";
        let transport = MockTransport::new();
        transport.push_json(url, 429, &json!({}));
        transport.push_json(url, 503, &json!({}));
        transport.push_json(url, 200, &json!({"data": [], "pagination": {"has_more": false}}));

        let client = client(transport.clone());
        let page: Page<RawLeague> = client
            .fetch_page("/leagues", &query())
            .await
            .expect("third attempt should succeed");

        assert!(!page.has_more);
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn fetch_page_exhausts_retries_and_returns_last_error() {
        let url = "https://api.example.com/v1/leagues?page=1&per_page=100";
        let transport = MockTransport::new();
        for _ in 0..4 {
            transport.push_json(url, 429, &json!({}));
        }

        let client = client(transport.clone());
        let err = client
            .fetch_page::<RawLeague>("/leagues", &query())
            .await
            .expect_err("retries should exhaust");

        assert!(matches!(err, UpstreamError::RateLimited));
        // Initial attempt plus the configured maximum retries.
        assert_eq!(transport.requests().len(), 4);
    }

    #[tokio::test]
    async fn fetch_page_does_not_retry_permanent_failures() {
        let url = "https://api.example.com/v1/leagues?page=1&per_page=100";
        let transport = MockTransport::new();
        transport.push_json(url, 404, &json!({}));

        let client = client(transport.clone());
        let err = client
            .fetch_page::<RawLeague>("/leagues", &query())
            .await
            .expect_err("404 should fail immediately");

        assert!(matches!(err, UpstreamError::Client { status: 404 }));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn fetch_page_reports_decode_errors_without_retry() {
        let url = "https://api.example.com/v1/leagues?page=1&per_page=100";
        let transport = MockTransport::new();
        transport.push_response(
            HttpMethod::Get,
            url,
            crate::http::HttpResponse {
                status: 200,
                body: b"not json".to_vec(),
            },
        );

        let client = client(transport.clone());
        let err = client
            .fetch_page::<RawLeague>("/leagues", &query())
            .await
            .expect_err("bad body should fail");

        assert!(matches!(err, UpstreamError::Decode { .. }));
        assert_eq!(transport.requests().len(), 1);
    }
}
