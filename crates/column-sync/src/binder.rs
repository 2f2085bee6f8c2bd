//! Binding one control to its group of tables.
//!
//! Binding runs in order: resolve the control's group, discover the group's
//! tables, reconcile the control with any flag the tables already carry,
//! broadcast the control's state to every table, then subscribe so each
//! later change re-broadcasts. Absent groups and empty table sets are normal
//! outcomes and leave everything untouched.

use std::rc::Rc;

use config::SyncConfig;
use tracing::{debug, trace};

use crate::{GroupKey, Host, Selector, ShowOptional};

/// Why a control was left unbound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The control carries no group attribute.
    NoGroup,
    /// The group attribute is empty and empty groups are configured as absent.
    EmptyGroup,
    /// No table shares the control's group.
    NoTables(GroupKey),
}

/// Which side supplied the group's initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InitialState {
    /// A table already carried an explicit flag; the control adopted it.
    Tables {
        /// Position of that table within the group's table list.
        index: usize,
        /// The adopted state.
        shown: bool,
    },
    /// No table had an explicit flag; the control's own state was kept.
    Control {
        /// The control's state.
        selected: bool,
    },
}

/// Result of binding one control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindOutcome {
    /// The control now drives its group's tables.
    Bound {
        /// Group key.
        group: GroupKey,
        /// Number of tables bound.
        tables: usize,
        /// Where the initial state came from.
        source: InitialState,
    },
    /// Nothing was changed.
    Skipped {
        /// Why.
        reason: SkipReason,
    },
}

impl BindOutcome {
    /// True for [`BindOutcome::Bound`].
    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound { .. })
    }
}

/// Read a control's (or table's) group key.
///
/// An absent attribute is never a group. An empty one is a group of its own
/// unless `config.skip_empty_groups` is set.
pub fn resolve_group<H: Host>(
    host: &H,
    element: &H::Element,
    config: &SyncConfig,
) -> Result<GroupKey, SkipReason> {
    match host.attribute(element, &config.group_attribute) {
        None => Err(SkipReason::NoGroup),
        Some(v) if v.is_empty() && config.skip_empty_groups => Err(SkipReason::EmptyGroup),
        Some(v) => Ok(GroupKey::new(v)),
    }
}

/// A control together with the tables it drives.
///
/// The table list is captured once; membership is never re-evaluated.
pub struct GroupBinding<H: Host> {
    /// Host owning the elements.
    host: H,
    /// The driving control.
    control: H::Element,
    /// Shared group key.
    group: GroupKey,
    /// Captured tables in document order.
    tables: Rc<[H::Element]>,
    /// Attribute holding each table's flag.
    show_attribute: Rc<str>,
}

impl<H: Host> Clone for GroupBinding<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            control: self.control.clone(),
            group: self.group.clone(),
            tables: self.tables.clone(),
            show_attribute: self.show_attribute.clone(),
        }
    }
}

impl<H: Host> GroupBinding<H> {
    /// Pair `control` with its discovered `tables`.
    pub fn new(
        host: &H,
        control: &H::Element,
        group: GroupKey,
        tables: Vec<H::Element>,
        config: &SyncConfig,
    ) -> Self {
        Self {
            host: host.clone(),
            control: control.clone(),
            group,
            tables: tables.into(),
            show_attribute: config.show_attribute.as_str().into(),
        }
    }

    /// Group key shared by the control and its tables.
    pub fn group(&self) -> &GroupKey {
        &self.group
    }

    /// Captured tables.
    pub fn tables(&self) -> &[H::Element] {
        &self.tables
    }

    /// Adopt the first explicit table flag, in document order, into the control.
    ///
    /// When tables disagree the first one wins. Without any explicit flag the
    /// control keeps its state and becomes the source of truth.
    pub fn reconcile(&self) -> InitialState {
        let existing = self.tables.iter().enumerate().find_map(|(i, t)| {
            self.host
                .show_optional(t, &self.show_attribute)
                .explicit()
                .map(|shown| (i, shown))
        });
        match existing {
            Some((index, shown)) => {
                self.host.set_selected(&self.control, shown);
                InitialState::Tables { index, shown }
            }
            None => InitialState::Control {
                selected: self.host.selected(&self.control),
            },
        }
    }

    /// Broadcast the control's current state to every captured table.
    pub fn apply(&self) {
        let selected = self.host.selected(&self.control);
        let flag = ShowOptional::from_selected(selected);
        for table in self.tables.iter() {
            self.host.set_show_optional(table, &self.show_attribute, flag);
        }
        trace!(group = %self.group, selected, tables = self.tables.len(), "apply");
    }

    /// Re-run [`apply`](Self::apply) every time the control fires `signal`.
    pub fn subscribe(&self, signal: &str) {
        let binding = self.clone();
        self.host
            .listen(&self.control, signal, Box::new(move || binding.apply()));
    }
}

/// Bind `control` to already-discovered `tables`: reconcile, apply, subscribe.
pub fn bind<H: Host>(
    host: &H,
    control: &H::Element,
    group: GroupKey,
    tables: Vec<H::Element>,
    config: &SyncConfig,
) -> BindOutcome {
    if tables.is_empty() {
        debug!(control = ?control, group = %group, "skip_no_tables");
        return BindOutcome::Skipped {
            reason: SkipReason::NoTables(group),
        };
    }
    let binding = GroupBinding::new(host, control, group, tables, config);
    let source = binding.reconcile();
    binding.apply();
    binding.subscribe(&config.change_signal);
    debug!(
        control = ?control,
        group = %binding.group(),
        tables = binding.tables().len(),
        source = ?source,
        "bound"
    );
    BindOutcome::Bound {
        group: binding.group().clone(),
        tables: binding.tables().len(),
        source,
    }
}

/// Bind a single control, querying the host for its group's tables.
///
/// Useful for controls inserted after initialization; the group value is
/// escaped into the table selector.
pub fn bind_control<H: Host>(host: &H, control: &H::Element, config: &SyncConfig) -> BindOutcome {
    let group = match resolve_group(host, control, config) {
        Ok(group) => group,
        Err(reason) => {
            debug!(control = ?control, reason = ?reason, "skip");
            return BindOutcome::Skipped { reason };
        }
    };
    let selector =
        Selector::attribute_equals(&config.table_tag, &config.group_attribute, group.as_str());
    let tables = host.query_all(&selector);
    bind(host, control, group, tables, config)
}
