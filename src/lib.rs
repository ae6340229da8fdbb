// Public API exports (shared between browser and native)
pub mod config;
pub mod domain;
pub mod shared;
pub mod infrastructure;

// Dioxus page shell (browser only)
#[cfg(target_arch = "wasm32")]
pub mod app;

// Headless watcher CLI (NOT compiled for WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

pub use config::PollerConfig;
pub use domain::models::{Endpoint, NewsPanel, RefreshOutcome, RenderPolicy, SidebarState};
pub use domain::services::{
    ClassTarget, Lifecycle, NewsContainer, NewsPoller, NewsSource, OverlapPolicy, RefreshSchedule,
    ScheduleStats, Scheduler, SidebarToggle, Sleeper,
};
pub use shared::errors::{ConfigError, RefreshError};
