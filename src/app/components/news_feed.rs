use dioxus::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::config::PollerConfig;
use crate::domain::models::NewsPanel;
use crate::domain::services::{NewsContainer, NewsPoller, Scheduler};
use crate::infrastructure::http::GlooNewsSource;
use crate::infrastructure::timer::GlooSleeper;
use crate::shared::constants::NEWS_CONTAINER_ID;

// Signal-backed container: a write re-renders the feed
#[derive(Clone, Copy)]
struct SignalContainer(Signal<NewsPanel>);

impl NewsContainer for SignalContainer {
    fn replace_html(&self, html: &str) {
        let mut signal = self.0;
        signal.set(NewsPanel::showing(html));
    }
}

/// Live news panel. Polls on the configured schedule for as long as the
/// component is mounted.
#[component]
pub fn NewsFeed(config: PollerConfig) -> Element {
    let panel = use_signal(NewsPanel::default);
    let cancel = use_hook(CancellationToken::new);

    use_drop({
        let cancel = cancel.clone();
        move || cancel.cancel()
    });

    use_future(move || {
        let config = config.clone();
        let cancel = cancel.clone();
        async move {
            let poller = NewsPoller::new(
                GlooNewsSource,
                SignalContainer(panel),
                config.endpoint.clone(),
            )
            .with_render_policy(config.render);
            let scheduler = Scheduler::new(config.schedule(), GlooSleeper, cancel);
            scheduler.run(|| poller.refresh()).await;
        }
    });

    // The element carrying the container id holds the fragment itself
    match panel().html() {
        Some(content) => rsx! {
            section {
                id: NEWS_CONTAINER_ID,
                class: "c-news",
                dangerous_inner_html: "{content}",
            }
        },
        None => rsx! {
            section { id: NEWS_CONTAINER_ID, class: "c-news",
                div { class: "c-loading",
                    div { class: "c-loading__spinner" }
                    p { class: "c-loading__text", "Loading news..." }
                }
            }
        },
    }
}
