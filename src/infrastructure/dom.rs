//! DOM bindings for pages that ship their own markup.
//!
//! `mount_news_page` looks up the news container, the sidebar and the toggle
//! button by id once the document is ready, then starts the refresh schedule
//! and wires the click handler. Nothing here is global: every element handle
//! lives inside the component that mutates it.

use std::rc::Rc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget};

use crate::config::PollerConfig;
use crate::domain::services::{
    ClassTarget, Lifecycle, NewsContainer, NewsPoller, Scheduler, SidebarToggle,
};
use crate::infrastructure::http::GlooNewsSource;
use crate::infrastructure::timer::GlooSleeper;
use crate::shared::constants::TOGGLE_ICON_SELECTOR;

/// `innerHTML` target
pub struct DomContainer(Element);

impl DomContainer {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl NewsContainer for DomContainer {
    fn replace_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }
}

/// `classList` target
pub struct DomClassTarget(Element);

impl DomClassTarget {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl ClassTarget for DomClassTarget {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            tracing::warn!("Failed to add class {}: {:?}", class, e);
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.0.class_list().remove_1(class) {
            tracing::warn!("Failed to remove class {}: {:?}", class, e);
        }
    }
}

/// Hook that removes `closure` from `target` and then drops it
fn detach_listener(
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
) -> impl FnOnce() + 'static {
    move || {
        if let Err(e) =
            target.remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to remove {} listener: {:?}", event, e);
        }
    }
}

/// Returned to JavaScript; `stop()` cancels polling and detaches every listener
/// the mount added, including a pending `DOMContentLoaded` one.
#[wasm_bindgen]
pub struct NewsPageHandle {
    lifecycle: Rc<Lifecycle>,
}

#[wasm_bindgen]
impl NewsPageHandle {
    pub fn stop(&self) {
        self.lifecycle.stop();
        tracing::info!("News page unmounted");
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.lifecycle.is_stopped()
    }
}

/// Start the poller and the sidebar toggle on the current page.
///
/// `config` is an optional object with the `PollerConfig` fields
/// (`endpoint`, `intervalMs`, `overlap`, `render`, `debug`, `ids`).
#[wasm_bindgen]
pub fn mount_news_page(config: JsValue) -> Result<NewsPageHandle, JsValue> {
    let config: PollerConfig = if config.is_undefined() || config.is_null() {
        PollerConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Already installed when running inside the Dioxus shell
    let _ = dioxus::logger::init(config.log_level());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    let lifecycle = Rc::new(Lifecycle::new());

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready_lifecycle = lifecycle.clone();
        let on_ready = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let lifecycle = &on_ready_lifecycle;
            lifecycle.start_if_active(|| {
                if let Err(e) = start(&doc, &config, lifecycle) {
                    web_sys::console::error_1(&e);
                }
            });
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        lifecycle.on_stop(detach_listener(document.into(), "DOMContentLoaded", on_ready));
    } else {
        start(&document, &config, &lifecycle)?;
    }

    Ok(NewsPageHandle { lifecycle })
}

fn start(
    document: &Document,
    config: &PollerConfig,
    lifecycle: &Lifecycle,
) -> Result<(), JsValue> {
    attach_sidebar_toggle(document, config, lifecycle)?;

    match document.get_element_by_id(&config.ids.news_container) {
        Some(container) => start_poller(container, config, lifecycle.cancel_token()),
        None => tracing::warn!(
            "No #{} element on this page, news polling disabled",
            config.ids.news_container
        ),
    }

    Ok(())
}

fn start_poller(container: Element, config: &PollerConfig, cancel: CancellationToken) {
    let poller = NewsPoller::new(
        GlooNewsSource,
        DomContainer::new(container),
        config.endpoint.clone(),
    )
    .with_render_policy(config.render);
    let scheduler = Scheduler::new(config.schedule(), GlooSleeper, cancel);

    let span = crate::log_context!(poller.endpoint().as_str());
    wasm_bindgen_futures::spawn_local(
        async move {
            scheduler.run(|| poller.refresh()).await;
        }
        .instrument(span),
    );
}

fn attach_sidebar_toggle(
    document: &Document,
    config: &PollerConfig,
    lifecycle: &Lifecycle,
) -> Result<(), JsValue> {
    let ids = &config.ids;
    let (Some(sidebar), Some(button)) = (
        document.get_element_by_id(&ids.sidebar),
        document.get_element_by_id(&ids.sidebar_toggle),
    ) else {
        tracing::warn!(
            "Missing #{} or #{}, sidebar toggle disabled",
            ids.sidebar,
            ids.sidebar_toggle
        );
        return Ok(());
    };

    let Some(icon) = button.query_selector(TOGGLE_ICON_SELECTOR)? else {
        tracing::warn!("Toggle button has no icon element, sidebar toggle disabled");
        return Ok(());
    };
    let Some(button_container) = button.parent_element() else {
        tracing::warn!("Toggle button has no parent element, sidebar toggle disabled");
        return Ok(());
    };

    let toggle = SidebarToggle::new(
        DomClassTarget::new(sidebar),
        DomClassTarget::new(icon),
        DomClassTarget::new(button_container),
    );

    let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        toggle.toggle();
    });
    button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;

    lifecycle.on_stop(detach_listener(button.into(), "click", closure));
    Ok(())
}
