//! The seam between the sync logic and the document that owns the elements.

use std::fmt::Debug;

use futures::future::LocalBoxFuture;

use crate::{Selector, ShowOptional};

/// Callback run each time a control fires its change signal.
pub type Listener = Box<dyn FnMut()>;

/// One-shot readiness signal provided by the host.
pub type Ready = LocalBoxFuture<'static, ()>;

/// A host document: the owner of controls and tables.
///
/// Hosts are single-threaded UI documents, so handles are cheap clones and
/// nothing here is `Send`. Implementations never create or destroy elements
/// on behalf of the sync logic; they only answer queries and relay reads,
/// writes and listener registration.
pub trait Host: Clone + 'static {
    /// Handle to one element of the document.
    type Element: Clone + Debug + 'static;

    /// Every element matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<Self::Element>;

    /// Current value of attribute `name`, `None` when absent.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Set attribute `name` to `value`.
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    /// Remove attribute `name`.
    fn remove_attribute(&self, element: &Self::Element, name: &str);

    /// The control's boolean `selected` property.
    fn selected(&self, control: &Self::Element) -> bool;

    /// Overwrite the control's `selected` property without firing signals.
    fn set_selected(&self, control: &Self::Element, selected: bool);

    /// Register `listener` for `signal` on `element` for the document lifetime.
    fn listen(&self, element: &Self::Element, signal: &str, listener: Listener);

    /// Resolves once the document has finished its initial parse.
    ///
    /// Resolves immediately when parsing already completed.
    fn parsed(&self) -> Ready;

    /// Resolves once custom element `tag` is defined.
    ///
    /// `None` when the host has no definition registry, in which case the
    /// element type is assumed to be available already.
    fn when_defined(&self, tag: &str) -> Option<Ready>;

    /// Read a table's visibility flag from `attribute`.
    fn show_optional(&self, table: &Self::Element, attribute: &str) -> ShowOptional {
        ShowOptional::from_attr(self.attribute(table, attribute).as_deref())
    }

    /// Write a table's visibility flag to `attribute`; `Unset` removes it.
    fn set_show_optional(&self, table: &Self::Element, attribute: &str, value: ShowOptional) {
        match value.as_attr() {
            Some(v) => self.set_attribute(table, attribute, v),
            None => self.remove_attribute(table, attribute),
        }
    }
}
