//! In-memory host document.
//!
//! [`Document`] holds a flat list of elements in document order, each with a
//! tag, an attribute map and a `selected` property, plus the listener table
//! and the two readiness signals a browser document would provide. It is the
//! reference [`Host`] used by the driver binary and by tests.

mod snapshot;

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt,
    rc::Rc,
};

use futures::future;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::trace;

pub use snapshot::{DocumentSnapshot, ElementSnapshot};

use crate::{
    Error, Result, Selector, ShowOptional,
    host::{Host, Listener, Ready},
};

/// Position of an element in its document. Ordering is document order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(usize);

impl ElementId {
    /// Identifier of the element at `index` in document order.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Index in document order.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Parse progress of a document, mirroring `document.readyState`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadyState {
    /// Still parsing.
    Loading,
    /// Parsed; subresources may still load.
    Interactive,
    /// Fully loaded.
    #[default]
    Complete,
}

/// One element of the document.
#[derive(Debug, Clone)]
struct Node {
    /// Tag name.
    tag: String,
    /// Attributes by name.
    attributes: BTreeMap<String, String>,
    /// The `selected` property (meaningful for controls).
    selected: bool,
}

/// Mutable document state behind the shared handle.
struct Inner {
    /// Elements in document order.
    nodes: Vec<Node>,
    /// Listeners keyed by element and signal, in registration order.
    listeners: HashMap<(ElementId, String), Vec<Listener>>,
    /// Parse progress.
    ready: watch::Sender<ReadyState>,
    /// Custom element definitions; `None` when the host has no registry.
    registry: Option<HashMap<String, watch::Sender<bool>>>,
}

/// Shared handle to a single-threaded in-memory document.
#[derive(Clone)]
pub struct Document {
    /// Shared state; clones observe the same document.
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Document")
            .field("elements", &inner.nodes.len())
            .field("ready_state", &*inner.ready.borrow())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty, fully parsed document whose host has no definition registry.
    pub fn new() -> Self {
        Self::with_state(ReadyState::Complete, None)
    }

    /// An empty document still loading, with a registry where nothing is defined yet.
    pub fn loading() -> Self {
        Self::with_state(ReadyState::Loading, Some(HashMap::new()))
    }

    /// Build an empty document in the given state.
    fn with_state(state: ReadyState, registry: Option<HashMap<String, watch::Sender<bool>>>) -> Self {
        let (ready, _) = watch::channel(state);
        Self {
            inner: Rc::new(RefCell::new(Inner {
                nodes: Vec::new(),
                listeners: HashMap::new(),
                ready,
                registry,
            })),
        }
    }

    /// Append an element and return its id.
    pub fn add_element(&self, tag: &str, attributes: &[(&str, &str)]) -> ElementId {
        let node = Node {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            selected: false,
        };
        let mut inner = self.inner.borrow_mut();
        inner.nodes.push(node);
        ElementId(inner.nodes.len() - 1)
    }

    /// Append an `md-switch` control with an optional `data-optional-group`.
    pub fn add_control(&self, group: Option<&str>, selected: bool) -> ElementId {
        let attrs: Vec<(&str, &str)> = group
            .map(|g| vec![("data-optional-group", g)])
            .unwrap_or_default();
        let id = self.add_element("md-switch", &attrs);
        self.inner.borrow_mut().nodes[id.0].selected = selected;
        id
    }

    /// Append a `table` with an optional `data-optional-group` and `data-show-optional` flag.
    pub fn add_table(&self, group: Option<&str>, show: ShowOptional) -> ElementId {
        let mut attrs: Vec<(&str, &str)> = Vec::new();
        if let Some(g) = group {
            attrs.push(("data-optional-group", g));
        }
        if let Some(flag) = show.as_attr() {
            attrs.push(("data-show-optional", flag));
        }
        self.add_element("table", &attrs)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// True when the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tag of element `id`.
    pub fn tag(&self, id: ElementId) -> Result<String> {
        self.with_node(id, |n| n.tag.clone())
    }

    /// Set an attribute, failing for unknown ids.
    pub fn try_set_attribute(&self, id: ElementId, name: &str, value: &str) -> Result<()> {
        self.with_node_mut(id, |n| {
            n.attributes.insert(name.to_string(), value.to_string());
        })
    }

    /// Remove an attribute, failing for unknown ids.
    pub fn try_remove_attribute(&self, id: ElementId, name: &str) -> Result<()> {
        self.with_node_mut(id, |n| {
            n.attributes.remove(name);
        })
    }

    /// Simulate a user interaction: set `selected`, then fire `signal`.
    ///
    /// Returns the number of listeners that ran.
    pub fn toggle(&self, id: ElementId, selected: bool, signal: &str) -> Result<usize> {
        self.with_node_mut(id, |n| n.selected = selected)?;
        Ok(self.dispatch(id, signal))
    }

    /// Run every listener registered for `signal` on `id`, in registration order.
    ///
    /// Listeners run with no internal borrow held, so they may read and write
    /// the document. Listeners registered while dispatching run next time.
    pub fn dispatch(&self, id: ElementId, signal: &str) -> usize {
        let key = (id, signal.to_string());
        let mut running = self
            .inner
            .borrow_mut()
            .listeners
            .remove(&key)
            .unwrap_or_default();
        for listener in &mut running {
            listener();
        }
        let ran = running.len();
        trace!(element = %id, signal, listeners = ran, "dispatch");
        let mut inner = self.inner.borrow_mut();
        let slot = inner.listeners.entry(key).or_default();
        running.append(slot);
        *slot = running;
        ran
    }

    /// Number of listeners registered for `signal` on `id`.
    pub fn listener_count(&self, id: ElementId, signal: &str) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(&(id, signal.to_string()))
            .map_or(0, Vec::len)
    }

    /// Current parse progress.
    pub fn ready_state(&self) -> ReadyState {
        *self.inner.borrow().ready.borrow()
    }

    /// Advance parse progress, waking anything waiting on [`Host::parsed`].
    pub fn set_ready_state(&self, state: ReadyState) {
        self.inner.borrow().ready.send_replace(state);
    }

    /// Mark the initial parse as finished (`DOMContentLoaded`).
    pub fn finish_parsing(&self) {
        self.set_ready_state(ReadyState::Interactive);
    }

    /// True when the host exposes a definition registry.
    pub fn has_registry(&self) -> bool {
        self.inner.borrow().registry.is_some()
    }

    /// Complete the definition of custom element `tag`.
    ///
    /// No effect when the host has no registry.
    pub fn define(&self, tag: &str) {
        let mut inner = self.inner.borrow_mut();
        if let Some(registry) = inner.registry.as_mut() {
            registry
                .entry(tag.to_ascii_lowercase())
                .or_insert_with(|| watch::channel(false).0)
                .send_replace(true);
        }
    }

    /// True when `tag` has been defined in the registry.
    pub fn is_defined(&self, tag: &str) -> bool {
        self.inner
            .borrow()
            .registry
            .as_ref()
            .and_then(|r| r.get(&tag.to_ascii_lowercase()).map(|tx| *tx.borrow()))
            .unwrap_or(false)
    }

    /// Read from element `id`.
    fn with_node<T>(&self, id: ElementId, f: impl FnOnce(&Node) -> T) -> Result<T> {
        let inner = self.inner.borrow();
        inner.nodes.get(id.0).map(f).ok_or(Error::UnknownElement { id })
    }

    /// Mutate element `id`.
    fn with_node_mut<T>(&self, id: ElementId, f: impl FnOnce(&mut Node) -> T) -> Result<T> {
        let mut inner = self.inner.borrow_mut();
        inner
            .nodes
            .get_mut(id.0)
            .map(f)
            .ok_or(Error::UnknownElement { id })
    }
}

impl Host for Document {
    type Element = ElementId;

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        inner
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| {
                selector.matches(&n.tag, |name| n.attributes.get(name).map(String::as_str))
            })
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.with_node(*element, |n| n.attributes.get(name).cloned())
            .ok()
            .flatten()
    }

    fn set_attribute(&self, element: &ElementId, name: &str, value: &str) {
        if self.try_set_attribute(*element, name, value).is_err() {
            trace!(element = %element, name, "set_attribute on unknown element");
        }
    }

    fn remove_attribute(&self, element: &ElementId, name: &str) {
        if self.try_remove_attribute(*element, name).is_err() {
            trace!(element = %element, name, "remove_attribute on unknown element");
        }
    }

    fn selected(&self, control: &ElementId) -> bool {
        self.with_node(*control, |n| n.selected).unwrap_or(false)
    }

    fn set_selected(&self, control: &ElementId, selected: bool) {
        if self.with_node_mut(*control, |n| n.selected = selected).is_err() {
            trace!(element = %control, "set_selected on unknown element");
        }
    }

    fn listen(&self, element: &ElementId, signal: &str, listener: Listener) {
        self.inner
            .borrow_mut()
            .listeners
            .entry((*element, signal.to_string()))
            .or_default()
            .push(listener);
    }

    fn parsed(&self) -> Ready {
        let mut rx = self.inner.borrow().ready.subscribe();
        Box::pin(async move {
            if rx.wait_for(|s| *s != ReadyState::Loading).await.is_err() {
                // The document went away before it finished parsing.
                future::pending::<()>().await;
            }
        })
    }

    fn when_defined(&self, tag: &str) -> Option<Ready> {
        let mut inner = self.inner.borrow_mut();
        let registry = inner.registry.as_mut()?;
        let mut rx = registry
            .entry(tag.to_ascii_lowercase())
            .or_insert_with(|| watch::channel(false).0)
            .subscribe();
        Some(Box::pin(async move {
            if rx.wait_for(|defined| *defined).await.is_err() {
                future::pending::<()>().await;
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::FutureExt;

    use super::*;

    #[test]
    fn query_respects_document_order_and_values() {
        let doc = Document::new();
        let t1 = doc.add_table(Some("g"), ShowOptional::Unset);
        let _other = doc.add_table(Some("h"), ShowOptional::Unset);
        let _bare = doc.add_table(None, ShowOptional::Unset);
        let t2 = doc.add_table(Some("g"), ShowOptional::Shown);

        let sel = Selector::attribute_equals("table", "data-optional-group", "g");
        assert_eq!(doc.query_all(&sel), vec![t1, t2]);

        let any = Selector::has_attribute("table", "data-optional-group");
        assert_eq!(doc.query_all(&any).len(), 3);
    }

    #[test]
    fn dispatch_runs_listeners_in_order_and_allows_reentry() {
        let doc = Document::new();
        let c = doc.add_control(Some("g"), false);
        let t = doc.add_table(Some("g"), ShowOptional::Unset);
        let order = Rc::new(RefCell::new(Vec::new()));

        for n in 0..2 {
            let order = order.clone();
            let inner = doc.clone();
            doc.listen(
                &c,
                "input",
                Box::new(move || {
                    order.borrow_mut().push(n);
                    let flag = ShowOptional::from_selected(inner.selected(&c));
                    inner.set_show_optional(&t, "data-show-optional", flag);
                }),
            );
        }

        assert_eq!(doc.toggle(c, true, "input").unwrap(), 2);
        assert_eq!(*order.borrow(), vec![0, 1]);
        assert_eq!(doc.attribute(&t, "data-show-optional").as_deref(), Some("1"));
        assert_eq!(doc.dispatch(c, "change"), 0);
        assert_eq!(doc.listener_count(c, "input"), 2);
    }

    #[test]
    fn listener_added_during_dispatch_runs_next_time() {
        let doc = Document::new();
        let c = doc.add_control(Some("g"), false);
        let hits = Rc::new(Cell::new(0));
        let registrar = doc.clone();
        let counter = hits.clone();
        doc.listen(
            &c,
            "input",
            Box::new(move || {
                let counter = counter.clone();
                registrar.listen(&c, "input", Box::new(move || counter.set(counter.get() + 1)));
            }),
        );
        assert_eq!(doc.dispatch(c, "input"), 1);
        assert_eq!(hits.get(), 0);
        assert_eq!(doc.dispatch(c, "input"), 2);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn unknown_ids_are_errors_for_driver_calls() {
        let doc = Document::new();
        let missing = ElementId::new(7);
        assert_eq!(
            doc.toggle(missing, true, "input"),
            Err(Error::UnknownElement { id: missing })
        );
        assert!(!doc.selected(&missing));
        assert_eq!(doc.attribute(&missing, "x"), None);
    }

    #[test]
    fn readiness_signals() {
        let doc = Document::loading();
        let mut parsed = doc.parsed();
        assert!((&mut parsed).now_or_never().is_none());
        doc.finish_parsing();
        assert!(parsed.now_or_never().is_some());
        assert!(doc.parsed().now_or_never().is_some());

        let mut defined = doc.when_defined("md-switch").unwrap();
        assert!((&mut defined).now_or_never().is_none());
        doc.define("MD-SWITCH");
        assert!(defined.now_or_never().is_some());
        assert!(doc.is_defined("md-switch"));

        let plain = Document::new();
        assert!(plain.when_defined("md-switch").is_none());
        assert!(!plain.has_registry());
    }
}
