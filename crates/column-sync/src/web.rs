//! Browser host backed by `web-sys`.
//!
//! Controls expose `selected` as a JS property (custom elements such as
//! `md-switch`), tables carry the flag as a `data-` attribute, and listeners
//! are closures leaked for the lifetime of the page.

use futures::future;
use js_sys::{Function, Promise, Reflect};
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure, prelude::wasm_bindgen};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, Event};

use crate::{
    Host, Selector, SyncConfig,
    host::{Listener, Ready},
    initialize,
};

/// [`Host`] over a live browser document.
#[derive(Clone, Debug)]
pub struct WebHost {
    /// The page document.
    document: Document,
}

impl WebHost {
    /// Wrap `document`.
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Host for the current window's document, if there is one.
    pub fn from_window() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    /// `document.readyState`, read reflectively.
    fn ready_state(&self) -> Option<String> {
        Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .ok()?
            .as_string()
    }
}

impl Host for WebHost {
    type Element = Element;

    fn query_all(&self, selector: &Selector) -> Vec<Element> {
        let list = match self.document.query_selector_all(&selector.to_string()) {
            Ok(list) => list,
            Err(err) => {
                warn!(selector = %selector, error = ?err, "query_selector_all failed");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            warn!(name, error = ?err, "set_attribute failed");
        }
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        if let Err(err) = element.remove_attribute(name) {
            warn!(name, error = ?err, "remove_attribute failed");
        }
    }

    fn selected(&self, control: &Element) -> bool {
        Reflect::get(control, &JsValue::from_str("selected"))
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn set_selected(&self, control: &Element, selected: bool) {
        let key = JsValue::from_str("selected");
        if let Err(err) = Reflect::set(control, &key, &JsValue::from_bool(selected)) {
            warn!(error = ?err, "setting selected failed");
        }
    }

    fn listen(&self, element: &Element, signal: &str, mut listener: Listener) {
        let closure = Closure::wrap(Box::new(move |_: Event| listener()) as Box<dyn FnMut(_)>);
        if let Err(err) =
            element.add_event_listener_with_callback(signal, closure.as_ref().unchecked_ref())
        {
            warn!(signal, error = ?err, "add_event_listener failed");
        }
        closure.forget();
    }

    fn parsed(&self) -> Ready {
        if self.ready_state().as_deref() != Some("loading") {
            return Box::pin(future::ready(()));
        }
        let document = self.document.clone();
        let promise = Promise::new(&mut |resolve, _reject| {
            if let Err(err) =
                document.add_event_listener_with_callback("DOMContentLoaded", &resolve)
            {
                warn!(error = ?err, "DOMContentLoaded listener failed");
            }
        });
        Box::pin(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!(error = ?err, "waiting for DOMContentLoaded failed");
            }
        })
    }

    fn when_defined(&self, tag: &str) -> Option<Ready> {
        let window = web_sys::window()?;
        let registry = Reflect::get(&window, &JsValue::from_str("customElements"))
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())?;
        let when_defined = Reflect::get(&registry, &JsValue::from_str("whenDefined"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let promise = when_defined
            .call1(&registry, &JsValue::from_str(tag))
            .ok()?
            .dyn_into::<Promise>()
            .ok()?;
        let tag = tag.to_string();
        Some(Box::pin(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!(tag = %tag, error = ?err, "whenDefined rejected");
            }
        }))
    }
}

/// Start syncing the current page with the default configuration.
#[wasm_bindgen(js_name = initOptionalColumnToggles)]
pub fn start() {
    spawn_init(SyncConfig::default());
}

/// Start syncing the current page with a RON configuration.
#[wasm_bindgen(js_name = initOptionalColumnTogglesWith)]
pub fn start_with_config(config_ron: &str) -> Result<(), JsValue> {
    let config = config::from_ron_str(config_ron).map_err(|e| JsValue::from_str(&e.pretty()))?;
    spawn_init(config);
    Ok(())
}

/// Spawn initialization on the page's event loop.
fn spawn_init(config: SyncConfig) {
    let Some(host) = WebHost::from_window() else {
        warn!("no window document; optional column toggles not started");
        return;
    };
    spawn_local(async move {
        initialize(&host, &config).await;
    });
}
