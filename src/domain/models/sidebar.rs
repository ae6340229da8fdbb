use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    BUTTON_CONTAINER_COLLAPSED_CLASSES, BUTTON_CONTAINER_EXPANDED_CLASSES, ICON_COLLAPSED_CLASSES,
    ICON_EXPANDED_CLASSES, SIDEBAR_HIDDEN_CLASS,
};

/// Sidebar visibility. Every class the toggle touches is derived from this
/// value, so the sidebar, its icon and the button container cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
    #[default]
    Expanded,
    Collapsed,
}

impl SidebarState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarState::Expanded => "expanded",
            SidebarState::Collapsed => "collapsed",
        }
    }

    /// State implied by the presence of the hidden marker on the sidebar
    pub fn from_hidden(hidden: bool) -> Self {
        if hidden {
            SidebarState::Collapsed
        } else {
            SidebarState::Expanded
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            SidebarState::Expanded => SidebarState::Collapsed,
            SidebarState::Collapsed => SidebarState::Expanded,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, SidebarState::Collapsed)
    }

    pub fn hidden_class(&self) -> Option<&'static str> {
        self.is_hidden().then_some(SIDEBAR_HIDDEN_CLASS)
    }

    pub fn icon_classes(&self) -> &'static [&'static str] {
        match self {
            SidebarState::Expanded => ICON_EXPANDED_CLASSES,
            SidebarState::Collapsed => ICON_COLLAPSED_CLASSES,
        }
    }

    pub fn button_container_classes(&self) -> &'static [&'static str] {
        match self {
            SidebarState::Expanded => BUTTON_CONTAINER_EXPANDED_CLASSES,
            SidebarState::Collapsed => BUTTON_CONTAINER_COLLAPSED_CLASSES,
        }
    }

    pub fn aria_label(&self) -> &'static str {
        match self {
            SidebarState::Expanded => "Hide sidebar",
            SidebarState::Collapsed => "Show sidebar",
        }
    }
}

/// Join a fixed class list with the classes a state contributes.
pub fn class_list(base: &str, extra: &[&str]) -> String {
    let mut classes: Vec<&str> = base.split_whitespace().collect();
    for class in extra {
        if !classes.contains(class) {
            classes.push(class);
        }
    }
    classes.join(" ")
}
