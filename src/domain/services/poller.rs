//! News poller: one refresh cycle = fetch the fragment, render it into the
//! container, or show the error notice.
//!
//! Failures never escape `refresh()`. The container always ends up showing
//! either the rendered body or the notice, and the outcome is returned for
//! diagnostics only.

use std::cell::RefCell;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::models::{Endpoint, NewsPanel, RefreshOutcome, RenderPolicy};
use crate::shared::constants::ERROR_NOTICE;
use crate::shared::errors::RefreshError;
use crate::shared::logging;

/// Where news fragments come from (gloo-net in the browser, reqwest natively)
#[async_trait(?Send)]
pub trait NewsSource {
    /// GET `url` and return its body. Non-2xx statuses map to
    /// `RefreshError::Fetch`, anything else that goes wrong to `Network`.
    async fn fetch(&self, url: &str) -> Result<String, RefreshError>;
}

/// Where rendered fragments go. Implementations replace, never append.
pub trait NewsContainer {
    fn replace_html(&self, html: &str);
}

impl NewsContainer for RefCell<NewsPanel> {
    fn replace_html(&self, html: &str) {
        self.replace(NewsPanel::showing(html));
    }
}

/// Map an HTTP status to success or `FetchError`
pub fn check_status(status: u16) -> Result<(), RefreshError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(RefreshError::Fetch { status })
    }
}

pub struct NewsPoller<S, C> {
    source: S,
    container: C,
    endpoint: Endpoint,
    render: RenderPolicy,
}

impl<S: NewsSource, C: NewsContainer> NewsPoller<S, C> {
    pub fn new(source: S, container: C, endpoint: Endpoint) -> Self {
        Self {
            source,
            container,
            endpoint,
            render: RenderPolicy::default(),
        }
    }

    pub fn with_render_policy(mut self, render: RenderPolicy) -> Self {
        self.render = render;
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Run one refresh cycle stamped with the current time.
    pub async fn refresh(&self) -> RefreshOutcome {
        self.refresh_at(Utc::now()).await
    }

    /// Run one refresh cycle with an explicit cache-busting timestamp.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> RefreshOutcome {
        let url = self.endpoint.cache_busted(now.timestamp_millis());
        logging::log_refresh_start(&url);

        match self.source.fetch(&url).await {
            Ok(body) => {
                logging::log_body_preview(&body);
                let html = self.render.render(&body);
                self.container.replace_html(&html);
                logging::log_render(self.render.as_str(), html.len());
                RefreshOutcome::Rendered { bytes: html.len() }
            }
            Err(err) => {
                logging::log_refresh_error(&url, &err);
                self.container.replace_html(ERROR_NOTICE);
                RefreshOutcome::Failed(err)
            }
        }
    }
}
