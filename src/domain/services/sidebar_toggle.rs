use crate::domain::models::SidebarState;
use crate::shared::constants::SIDEBAR_HIDDEN_CLASS;
use crate::shared::logging;

/// Anything with a class list (a DOM element's `classList`, or a test double)
pub trait ClassTarget {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Click handler state for the sidebar. Holds the three elements it mutates;
/// the current state is always read back from the sidebar's hidden marker.
pub struct SidebarToggle<T> {
    sidebar: T,
    icon: T,
    button_container: T,
}

impl<T: ClassTarget> SidebarToggle<T> {
    pub fn new(sidebar: T, icon: T, button_container: T) -> Self {
        Self {
            sidebar,
            icon,
            button_container,
        }
    }

    pub fn state(&self) -> SidebarState {
        SidebarState::from_hidden(self.sidebar.has_class(SIDEBAR_HIDDEN_CLASS))
    }

    /// Flip the sidebar and bring the icon and button container in line.
    pub fn toggle(&self) -> SidebarState {
        let next = self.state().toggle();
        self.apply(next);
        logging::log_sidebar_toggled(next);
        next
    }

    /// Force every element into `state`'s class set.
    pub fn apply(&self, state: SidebarState) {
        if state.is_hidden() {
            self.sidebar.add_class(SIDEBAR_HIDDEN_CLASS);
        } else {
            self.sidebar.remove_class(SIDEBAR_HIDDEN_CLASS);
        }

        swap_classes(&self.icon, state.toggle().icon_classes(), state.icon_classes());
        swap_classes(
            &self.button_container,
            state.toggle().button_container_classes(),
            state.button_container_classes(),
        );
    }
}

fn swap_classes<T: ClassTarget>(target: &T, remove: &[&str], add: &[&str]) {
    for class in remove {
        target.remove_class(class);
    }
    for class in add {
        target.add_class(class);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FakeElement;
    use super::*;

    struct Page {
        sidebar: FakeElement,
        icon: FakeElement,
        button_container: FakeElement,
    }

    impl Page {
        // Markup as shipped: sidebar visible
        fn expanded() -> Self {
            Self {
                sidebar: FakeElement::with_classes("w-64 bg-gray-800"),
                icon: FakeElement::with_classes("fas fa-times"),
                button_container: FakeElement::with_classes("flex justify-end p-2"),
            }
        }

        fn toggle(&self) -> SidebarToggle<&FakeElement> {
            SidebarToggle::new(&self.sidebar, &self.icon, &self.button_container)
        }

        fn snapshot(&self) -> [Vec<String>; 3] {
            [
                self.sidebar.class_set(),
                self.icon.class_set(),
                self.button_container.class_set(),
            ]
        }
    }

    #[test]
    fn test_initial_state_is_expanded() {
        let page = Page::expanded();
        assert_eq!(page.toggle().state(), SidebarState::Expanded);
    }

    #[test]
    fn test_single_click_collapses_sidebar() {
        let page = Page::expanded();

        let state = page.toggle().toggle();

        assert_eq!(state, SidebarState::Collapsed);
        assert!(page.sidebar.has_class("hidden"));
        assert!(page.icon.has_class("fa-bars"));
        assert!(!page.icon.has_class("fa-times"));
        assert!(page.icon.has_class("fas"));
        for class in ["fixed", "left-4", "top-4"] {
            assert!(page.button_container.has_class(class));
        }
        for class in ["flex", "justify-end"] {
            assert!(!page.button_container.has_class(class));
        }
        assert!(page.button_container.has_class("p-2"));
        assert_eq!(page.icon.class_name(), "fas fa-bars");
    }

    #[test]
    fn test_double_click_restores_original_classes() {
        let page = Page::expanded();
        let before = page.snapshot();

        let toggle = page.toggle();
        toggle.toggle();
        assert_ne!(page.snapshot(), before);
        toggle.toggle();

        assert_eq!(page.snapshot(), before);
    }

    #[test]
    fn test_state_is_read_from_sidebar_each_time() {
        let page = Page::expanded();
        let toggle = page.toggle();

        // Something else hid the sidebar; the next click must show it
        page.sidebar.add_class("hidden");
        assert_eq!(toggle.toggle(), SidebarState::Expanded);
        assert!(!page.sidebar.has_class("hidden"));
        assert!(page.icon.has_class("fa-times"));
        assert!(page.button_container.has_class("justify-end"));
    }

    #[test]
    fn test_apply_repairs_drifted_markup() {
        let page = Page::expanded();
        page.icon.add_class("fa-bars");

        page.toggle().apply(SidebarState::Expanded);

        assert!(page.icon.has_class("fa-times"));
        assert!(!page.icon.has_class("fa-bars"));
    }
}
