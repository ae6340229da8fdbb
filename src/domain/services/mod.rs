// Business logic services
// Framework-agnostic, 100% testable: DOM, HTTP and timers come in through traits

pub mod lifecycle;
pub mod poller;
pub mod scheduler;
pub mod sidebar_toggle;

pub use lifecycle::Lifecycle;
pub use poller::{NewsContainer, NewsPoller, NewsSource};
pub use scheduler::{OverlapPolicy, RefreshSchedule, ScheduleStats, Scheduler, Sleeper};
pub use sidebar_toggle::{ClassTarget, SidebarToggle};
