//! Structured logging module for news-pulse
//!
//! Provides consistent, contextual logging across the poller, the scheduler
//! and the sidebar toggle. Uses tracing with structured fields; the
//! subscriber is installed by the entry point (tracing-subscriber natively,
//! the Dioxus logger in the browser).

use std::time::Duration;

use crate::domain::models::SidebarState;
use crate::shared::constants::BODY_PREVIEW_CHARS;
use crate::shared::errors::RefreshError;

/// Log operations for the different subsystems
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    Refresh,
    Render,
    Schedule,
    Sidebar,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::Refresh => "refresh",
            LogOperation::Render => "render",
            LogOperation::Schedule => "schedule",
            LogOperation::Sidebar => "sidebar",
        }
    }
}

/// Log refresh attempt
pub fn log_refresh_start(url: &str) {
    tracing::debug!(
        operation = LogOperation::Refresh.as_str(),
        url = url,
        "Attempting to refresh news"
    );
}

/// Log the head of a received body
pub fn log_body_preview(body: &str) {
    tracing::debug!(
        operation = LogOperation::Refresh.as_str(),
        body_len = body.len(),
        preview = %preview(body),
        "Received HTML"
    );
}

/// Log rendered fragment
pub fn log_render(policy: &str, bytes: usize) {
    tracing::debug!(
        operation = LogOperation::Render.as_str(),
        policy = policy,
        bytes = bytes,
        "News container updated"
    );
}

/// Log refresh failure (swallowed, replaced by the error notice)
pub fn log_refresh_error(url: &str, error: &RefreshError) {
    tracing::error!(
        operation = LogOperation::Refresh.as_str(),
        url = url,
        status = error.status(),
        error = %error,
        "Error refreshing news"
    );
}

/// Log schedule start
pub fn log_schedule_start(interval: Duration, overlap: &str) {
    tracing::info!(
        operation = LogOperation::Schedule.as_str(),
        interval_ms = interval.as_millis() as u64,
        overlap = overlap,
        "Refresh schedule started"
    );
}

/// Log an interval raised to the configured floor
pub fn log_interval_clamped(requested: Duration, floor: Duration) {
    tracing::warn!(
        operation = LogOperation::Schedule.as_str(),
        requested_ms = requested.as_millis() as u64,
        floor_ms = floor.as_millis() as u64,
        "Refresh interval below minimum, clamping"
    );
}

/// Log a tick suppressed by the in-flight guard
pub fn log_tick_skipped(in_flight: usize) {
    tracing::debug!(
        operation = LogOperation::Schedule.as_str(),
        in_flight = in_flight,
        "Previous refresh still in flight, skipping tick"
    );
}

/// Log schedule shutdown
pub fn log_schedule_stopped(fired: u64, completed: u64, skipped: u64) {
    tracing::info!(
        operation = LogOperation::Schedule.as_str(),
        fired = fired,
        completed = completed,
        skipped = skipped,
        "Refresh schedule cancelled"
    );
}

/// Log sidebar transition
pub fn log_sidebar_toggled(state: SidebarState) {
    tracing::debug!(
        operation = LogOperation::Sidebar.as_str(),
        state = state.as_str(),
        "Sidebar toggled"
    );
}

// First BODY_PREVIEW_CHARS characters, never splitting a UTF-8 sequence
fn preview(body: &str) -> String {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Macro for creating structured log context
#[macro_export]
macro_rules! log_context {
    ($endpoint:expr) => {
        tracing::info_span!("news_pulse", endpoint = $endpoint)
    };
    ($endpoint:expr, $cycle:expr) => {
        tracing::info_span!("news_pulse", endpoint = $endpoint, cycle = $cycle)
    };
}
