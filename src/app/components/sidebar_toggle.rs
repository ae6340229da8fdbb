use dioxus::prelude::*;

use crate::domain::models::{class_list, SidebarState};
use crate::shared::constants::SIDEBAR_TOGGLE_ID;
use crate::shared::logging;

/// Sidebar toggle button. The icon glyph and the wrapper's layout classes are
/// both derived from the one state signal, so they flip together.
#[component]
pub fn SidebarToggleButton(state: Signal<SidebarState>) -> Element {
    let mut state = state;
    let current = state();

    let toggle_sidebar = move |_| {
        let next = state().toggle();
        state.set(next);
        logging::log_sidebar_toggled(next);
    };

    let container_class = class_list("c-sidebar-toggle", current.button_container_classes());
    let icon_class = class_list("fas", current.icon_classes());

    rsx! {
        div { class: "{container_class}",
            button {
                id: SIDEBAR_TOGGLE_ID,
                class: "c-sidebar-toggle__button",
                r#type: "button",
                aria_label: current.aria_label(),
                aria_expanded: !current.is_hidden(),
                onclick: toggle_sidebar,
                i { class: "{icon_class}" }
            }
        }
    }
}
