//! Serializable snapshots of a [`Document`].

use std::collections::BTreeMap;

use ron::{ser, ser::PrettyConfig};
use serde::{Deserialize, Serialize};

use super::{Document, ElementId, Node, ReadyState};
use crate::{Error, Result};

/// A document as plain data: elements in document order.
///
/// Element ids are positions in `elements`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    /// Parse progress; defaults to `complete`.
    #[serde(default)]
    pub ready_state: ReadyState,
    /// Elements in document order.
    pub elements: Vec<ElementSnapshot>,
}

/// One element of a [`DocumentSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Tag name.
    pub tag: String,
    /// Attributes by name.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// The `selected` property.
    #[serde(default)]
    pub selected: bool,
}

impl DocumentSnapshot {
    /// Parse a snapshot from RON.
    pub fn from_ron(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| Error::Parse {
            format: "ron",
            message: e.to_string(),
        })
    }

    /// Parse a snapshot from JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    /// Render as pretty RON.
    pub fn to_ron(&self) -> Result<String> {
        ser::to_string_pretty(self, PrettyConfig::default()).map_err(|e| {
            Error::Render {
                format: "ron",
                message: e.to_string(),
            }
        })
    }

    /// Render as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Render {
            format: "json",
            message: e.to_string(),
        })
    }
}

impl Document {
    /// Build a document from a snapshot. The host has no definition registry.
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Self {
        let doc = Self::with_state(snapshot.ready_state, None);
        doc.inner.borrow_mut().nodes = snapshot
            .elements
            .iter()
            .map(|e| Node {
                tag: e.tag.clone(),
                attributes: e.attributes.clone(),
                selected: e.selected,
            })
            .collect();
        doc
    }

    /// Capture the current elements and ready state.
    pub fn snapshot(&self) -> DocumentSnapshot {
        let inner = self.inner.borrow();
        DocumentSnapshot {
            ready_state: *inner.ready.borrow(),
            elements: inner
                .nodes
                .iter()
                .map(|n| ElementSnapshot {
                    tag: n.tag.clone(),
                    attributes: n.attributes.clone(),
                    selected: n.selected,
                })
                .collect(),
        }
    }

    /// Snapshot of a single element.
    pub fn element(&self, id: ElementId) -> Result<ElementSnapshot> {
        self.with_node(id, |n| ElementSnapshot {
            tag: n.tag.clone(),
            attributes: n.attributes.clone(),
            selected: n.selected,
        })
    }
}
