pub mod components;
pub mod layouts;

use dioxus::prelude::*;

use crate::app::components::{NewsFeed, SidebarToggleButton};
use crate::app::layouts::GlobalSidebar;
use crate::config::PollerConfig;
use crate::domain::models::SidebarState;

// Optional JSON config embedded by the server:
// <meta name="news-pulse-config" content='{"intervalMs": 1000}'>
const CONFIG_META_SELECTOR: &str = "meta[name=\"news-pulse-config\"]";

const FONT_AWESOME_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

/// Read the page's embedded config, falling back to defaults.
pub fn page_config() -> PollerConfig {
    let content = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.query_selector(CONFIG_META_SELECTOR).ok().flatten())
        .and_then(|meta| meta.get_attribute("content"));

    match content {
        Some(json) => PollerConfig::from_json(&json).unwrap_or_else(|e| {
            tracing::warn!("Ignoring invalid news-pulse-config: {}", e);
            PollerConfig::default()
        }),
        None => PollerConfig::default(),
    }
}

#[component]
pub fn App() -> Element {
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    let sidebar_state = use_signal(SidebarState::default);
    let config = use_hook(page_config);

    use_effect(|| {
        tracing::info!("news-pulse app initialized");
    });

    rsx! {
        document::Link { rel: "stylesheet", href: BUNDLE_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME_CSS }
        div { class: "c-layout",
            GlobalSidebar { state: sidebar_state }
            main { class: "c-layout__main",
                SidebarToggleButton { state: sidebar_state }
                h1 { class: "c-layout__title", "Latest news" }
                NewsFeed { config }
            }
        }
    }
}
