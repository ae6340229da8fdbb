//! news-pulse - Main Entry Point
//!
//! Browser build: launches the Dioxus page shell (sidebar + live news panel).
//! Native build: headless watcher CLI.

// WASM entry point (browser)
#[cfg(target_arch = "wasm32")]
fn main() {
    use news_pulse::app::{page_config, App};

    let _ = dioxus::logger::init(page_config().log_level());

    // Log to browser console to confirm WASM loaded
    web_sys::console::log_1(&"[WASM] news-pulse initialized".into());
    dioxus::launch(App);
}

// Native entry point (headless watcher)
#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use news_pulse::cli::{init_tracing, run, Cli};

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::info!("Starting news-pulse watcher...");
    run(cli).await
}
