// Domain models
// Pure Rust, no framework dependencies

pub mod endpoint;
pub mod refresh;
pub mod render;
pub mod sidebar;

pub use endpoint::Endpoint;
pub use refresh::{NewsPanel, RefreshOutcome};
pub use render::RenderPolicy;
pub use sidebar::{class_list, SidebarState};
