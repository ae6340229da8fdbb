use dioxus::prelude::*;

use crate::domain::models::{class_list, SidebarState};
use crate::shared::constants::SIDEBAR_ID;

/// Left navigation. Visibility comes from the shared sidebar state; the
/// toggle button lives outside so it stays reachable while collapsed.
#[component]
pub fn GlobalSidebar(state: Signal<SidebarState>) -> Element {
    let sidebar_class = class_list("c-sidebar", state().hidden_class().as_slice());

    rsx! {
        aside { id: SIDEBAR_ID, class: "{sidebar_class}",
            div { class: "c-sidebar__header",
                h2 { "Feeds" }
            }
            nav { class: "c-sidebar__nav",
                ul {
                    li {
                        a { href: "/", "📰 Latest news" }
                    }
                    li {
                        a { href: "/feeds", "📡 All feeds" }
                    }
                }
            }
        }
    }
}
