pub mod news_feed;
pub mod sidebar_toggle;

pub use news_feed::NewsFeed;
pub use sidebar_toggle::SidebarToggleButton;
