pub mod global_sidebar;

pub use global_sidebar::GlobalSidebar;
