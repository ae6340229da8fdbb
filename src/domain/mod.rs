// Domain layer: pure Rust, no DOM or runtime dependencies
pub mod models;
pub mod services;
