// Endpoint serving the "latest news" HTML fragment
pub const DEFAULT_ENDPOINT: &str = "/latest-news";

// Query parameter used to defeat HTTP caching
pub const CACHE_BUST_PARAM: &str = "t";

// The two observed refresh rates were 1s and 100s; the slower one is the default
pub const DEFAULT_INTERVAL_MS: u64 = 100_000;
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1_000;

// How much of each received body goes into the debug log
pub const BODY_PREVIEW_CHARS: usize = 100;

/// Markup shown in the news container whenever a refresh cycle fails.
pub const ERROR_NOTICE: &str = r#"<div class="bg-red-900 text-white p-4 rounded">Error loading news. Please try again later.</div>"#;

// DOM contract
pub const NEWS_CONTAINER_ID: &str = "news-container";
pub const SIDEBAR_ID: &str = "sidebar";
pub const SIDEBAR_TOGGLE_ID: &str = "sidebar-toggle";
pub const TOGGLE_ICON_SELECTOR: &str = "i";

// Sidebar class sets
pub const SIDEBAR_HIDDEN_CLASS: &str = "hidden";
pub const ICON_EXPANDED_CLASSES: &[&str] = &["fa-times"];
pub const ICON_COLLAPSED_CLASSES: &[&str] = &["fa-bars"];
pub const BUTTON_CONTAINER_EXPANDED_CLASSES: &[&str] = &["flex", "justify-end"];
pub const BUTTON_CONTAINER_COLLAPSED_CLASSES: &[&str] = &["fixed", "left-4", "top-4"];
