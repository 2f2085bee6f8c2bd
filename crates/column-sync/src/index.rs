//! Explicit partition of controls and tables by group key.

use std::{collections::BTreeMap, fmt};

use config::SyncConfig;
use tracing::debug;

use crate::{Host, Selector, binder::resolve_group};

/// Raw value of a group attribute. Compared byte for byte, never trimmed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    /// Wrap an attribute value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw attribute value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the empty-string group.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Controls and tables of one document, partitioned by group.
///
/// Built with two queries regardless of how many groups exist. Controls keep
/// document order; each group's tables keep document order.
#[derive(Debug, Clone)]
pub struct GroupIndex<E> {
    /// Every control carrying the group attribute, in document order.
    controls: Vec<E>,
    /// Tables per group key, in document order.
    tables: BTreeMap<GroupKey, Vec<E>>,
}

impl<E: Clone> GroupIndex<E> {
    /// Query `host` once for controls and once for tables and partition them.
    pub fn build<H>(host: &H, config: &SyncConfig) -> Self
    where
        H: Host<Element = E>,
    {
        let controls = host.query_all(&Selector::has_attribute(
            &config.control_tag,
            &config.group_attribute,
        ));
        let mut tables: BTreeMap<GroupKey, Vec<E>> = BTreeMap::new();
        for table in host.query_all(&Selector::has_attribute(
            &config.table_tag,
            &config.group_attribute,
        )) {
            if let Ok(key) = resolve_group(host, &table, config) {
                tables.entry(key).or_default().push(table);
            }
        }
        debug!(
            controls = controls.len(),
            groups = tables.len(),
            "group_index_built"
        );
        Self { controls, tables }
    }

    /// Controls in document order.
    pub fn controls(&self) -> &[E] {
        &self.controls
    }

    /// Tables of group `key` in document order; empty when none match.
    pub fn tables(&self, key: &GroupKey) -> &[E] {
        self.tables.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Group keys that have at least one table, in key order.
    pub fn groups(&self) -> impl Iterator<Item = &GroupKey> {
        self.tables.keys()
    }
}
