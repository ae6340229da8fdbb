use std::future::Future;
use std::time::Duration;

use crate::domain::services::Sleeper;

/// Browser timer backed by `setTimeout`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooSleeper;

#[cfg(target_arch = "wasm32")]
impl Sleeper for GlooSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        gloo_timers::future::sleep(duration)
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[cfg(not(target_arch = "wasm32"))]
impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> {
        tokio::time::sleep(duration)
    }
}

/// Timer for the current target
#[cfg(target_arch = "wasm32")]
pub type PlatformSleeper = GlooSleeper;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformSleeper = TokioSleeper;
