use crate::error::{LoadError, Result};
use futures::future::BoxFuture;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = concat!("page-loader/", env!("CARGO_PKG_VERSION"));

/// Transport capability: fetch a URL and hand back the raw body.
///
/// Implementations must treat any non-2xx response as [`LoadError::HttpStatus`]
/// and network-level failures as [`LoadError::Transport`]. Bodies are returned
/// untouched so binary assets survive the trip.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Vec<u8>>>;
}

#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_settings(DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Self::with_settings(timeout_secs, DEFAULT_USER_AGENT)
    }

    pub fn with_settings(timeout_secs: u64, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs((timeout_secs / 2).max(1)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(LoadError::Client)?;

        Ok(Self { client })
    }

    async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "Fetching");
        let transport = |source| LoadError::Transport {
            url: url.to_string(),
            source,
        };

        let start = Instant::now();
        let response = self.client.get(url.clone()).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::HttpStatus {
                code: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        debug!(%url, bytes = body.len(), elapsed_ms = start.elapsed().as_millis() as u64, "Fetched");
        Ok(body.to_vec())
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(self.get(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    #[tokio::test]
    async fn test_fetch_returns_body_bytes_verbatim() {
        let mock_server = MockServer::start().await;
        let png_header: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

        Mock::given(method("GET"))
            .and(path("/assets/logo.png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "image/png")
                    .set_body_bytes(png_header),
            )
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/assets/logo.png", mock_server.uri())).unwrap();
        let body = fetcher.fetch(&url).await.unwrap();

        assert_eq!(body, png_header);
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/"))
            .and(header("user-agent", "mirror-test/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::with_settings(5, "mirror-test/1.0").unwrap();
        let url = Url::parse(&mock_server.uri()).unwrap();
        assert_eq!(fetcher.fetch(&url).await.unwrap(), b"ok");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new().unwrap();
        let url = Url::parse(&format!("{}/missing", mock_server.uri())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert_eq!(err.status_code(), Some(404));
        let msg = err.to_string();
        assert!(msg.contains("Status Code: 404. Status message: Not Found"), "{msg}");
        assert!(msg.contains("/missing"), "{msg}");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Bind and release a port so nothing is listening on it
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpFetcher::with_timeout(2).unwrap();
        let url = Url::parse(&format!("http://{addr}/")).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, LoadError::Transport { .. }), "{err:?}");
    }
}
