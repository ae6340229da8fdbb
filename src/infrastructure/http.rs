use async_trait::async_trait;

use crate::domain::services::NewsSource;
use crate::domain::services::poller::check_status;
use crate::shared::errors::RefreshError;

/// Browser fetch through gloo-net. Relative URLs resolve against the page.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooNewsSource;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl NewsSource for GlooNewsSource {
    async fn fetch(&self, url: &str) -> Result<String, RefreshError> {
        use gloo_net::http::Request;

        let response = Request::get(url)
            .send()
            .await
            .map_err(RefreshError::network)?;

        check_status(response.status())?;

        response.text().await.map_err(RefreshError::network)
    }
}

/// Native fetch through reqwest. Needs an absolute URL.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default)]
pub struct ReqwestNewsSource {
    client: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl ReqwestNewsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl NewsSource for ReqwestNewsSource {
    async fn fetch(&self, url: &str) -> Result<String, RefreshError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RefreshError::network)?;

        check_status(response.status().as_u16())?;

        response.text().await.map_err(RefreshError::network)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::domain::models::{Endpoint, RefreshOutcome};
    use crate::domain::services::NewsPoller;
    use crate::domain::services::poller::test_support::RecordingContainer;
    use crate::shared::constants::ERROR_NOTICE;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::response::Html;
    use axum::routing::get;
    use axum::Router;
    use std::collections::HashMap;
    use std::net::SocketAddr;

    async fn spawn_server() -> SocketAddr {
        let app = Router::new()
            .route("/latest-news", get(|| async { Html("<p>Hello</p>") }))
            .route(
                "/echo-t",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    params.get("t").cloned().unwrap_or_default()
                }),
            )
            .route(
                "/broken",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn poller(addr: SocketAddr, path: &str) -> NewsPoller<ReqwestNewsSource, RecordingContainer> {
        let endpoint = Endpoint::new(format!("http://{addr}{path}")).unwrap();
        NewsPoller::new(ReqwestNewsSource::new(), RecordingContainer::default(), endpoint)
    }

    #[tokio::test]
    async fn test_fetches_fragment() {
        let addr = spawn_server().await;
        let poller = poller(addr, "/latest-news");

        let outcome = poller.refresh().await;

        assert!(outcome.is_rendered());
        assert_eq!(poller.container().html(), "<p>Hello</p>");
    }

    #[tokio::test]
    async fn test_sends_cache_busting_timestamp() {
        let addr = spawn_server().await;
        let source = ReqwestNewsSource::new();

        let body = source
            .fetch(&format!("http://{addr}/echo-t?t=1700000000123"))
            .await
            .unwrap();

        assert_eq!(body, "1700000000123");
    }

    #[tokio::test]
    async fn test_server_error_maps_to_fetch_error() {
        let addr = spawn_server().await;
        let poller = poller(addr, "/broken");

        let outcome = poller.refresh().await;

        assert_eq!(outcome, RefreshOutcome::Failed(RefreshError::Fetch { status: 500 }));
        assert_eq!(poller.container().html(), ERROR_NOTICE);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_fetch_error() {
        let addr = spawn_server().await;
        let source = ReqwestNewsSource::new();

        let err = source
            .fetch(&format!("http://{addr}/missing"))
            .await
            .unwrap_err();

        assert_eq!(err, RefreshError::Fetch { status: 404 });
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Grab a free port, then close it
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let poller = poller(addr, "/latest-news");
        let outcome = poller.refresh().await;

        assert!(matches!(outcome, RefreshOutcome::Failed(RefreshError::Network(_))));
        assert_eq!(poller.container().html(), ERROR_NOTICE);
    }
}
