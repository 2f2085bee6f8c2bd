//! column-sync: keep optional table columns in step with toggle controls.
//!
//! Controls and tables that share a group attribute form a group. On startup
//! [`initialize`] waits for the host document to be ready, partitions
//! controls and tables with a [`GroupIndex`], and binds every control: the
//! first table already carrying an explicit visibility flag decides the
//! control's initial state, the control's state is then broadcast to every
//! table in its group, and each later change signal re-broadcasts it.
//!
//! The host document sits behind the [`Host`] trait. [`Document`] is an
//! in-memory implementation; the `web` feature adds a browser host.
#![warn(missing_docs)]

mod binder;
mod document;
mod error;
mod host;
mod index;
mod initializer;
mod selector;
mod visibility;
#[cfg(feature = "web")]
pub mod web;

pub mod test_support;

pub use binder::{
    BindOutcome, GroupBinding, InitialState, SkipReason, bind, bind_control, resolve_group,
};
pub use config::SyncConfig;
pub use document::{Document, DocumentSnapshot, ElementId, ElementSnapshot, ReadyState};
pub use error::{Error, Result};
pub use host::{Host, Listener, Ready};
pub use index::{GroupIndex, GroupKey};
pub use initializer::{InitReport, bind_all, initialize, wait_ready};
pub use selector::{Selector, escape_css};
pub use visibility::ShowOptional;
