// Platform adapters for the domain traits
// Browser: gloo-net, gloo-timers, web-sys. Native: reqwest, tokio, files.

pub mod http;
pub mod timer;

// Browser-only DOM bindings
#[cfg(target_arch = "wasm32")]
pub mod dom;

// Native-only output targets for the headless watcher
#[cfg(not(target_arch = "wasm32"))]
pub mod output;
