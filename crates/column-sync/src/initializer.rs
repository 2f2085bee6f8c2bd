//! One-shot startup: wait for the host, then bind every grouped control.

use config::SyncConfig;
use tracing::{debug, info};

use crate::{
    BindOutcome, GroupIndex, Host,
    binder::{bind, resolve_group},
};

/// Outcomes of an initialization pass, one per control in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Per-control outcomes in document order.
    pub outcomes: Vec<BindOutcome>,
}

impl InitReport {
    /// Number of controls now driving tables.
    pub fn bound(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_bound()).count()
    }

    /// Number of controls left untouched.
    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.bound()
    }
}

/// Wait until the host has parsed the document and defined the control element.
///
/// Both waits are one-shot with no timeout. A host without a definition
/// registry skips the second wait.
pub async fn wait_ready<H: Host>(host: &H, config: &SyncConfig) {
    host.parsed().await;
    debug!("document_parsed");
    if let Some(defined) = host.when_defined(&config.control_tag) {
        defined.await;
        debug!(tag = %config.control_tag, "control_defined");
    }
}

/// Bind every control in `host` that carries a group attribute.
///
/// Controls are bound synchronously in document order; a skipped control
/// never prevents later ones from binding. Calling this twice binds twice.
pub async fn initialize<H: Host>(host: &H, config: &SyncConfig) -> InitReport {
    wait_ready(host, config).await;
    let report = bind_all(host, config);
    info!(
        controls = report.outcomes.len(),
        bound = report.bound(),
        skipped = report.skipped(),
        "optional_columns_initialized"
    );
    report
}

/// Build the group index and bind each control, without waiting on readiness.
pub fn bind_all<H: Host>(host: &H, config: &SyncConfig) -> InitReport {
    let index = GroupIndex::build(host, config);
    let outcomes = index
        .controls()
        .iter()
        .map(|control| match resolve_group(host, control, config) {
            Ok(group) => {
                let tables = index.tables(&group).to_vec();
                bind(host, control, group, tables, config)
            }
            Err(reason) => {
                debug!(control = ?control, reason = ?reason, "skip");
                BindOutcome::Skipped { reason }
            }
        })
        .collect();
    InitReport { outcomes }
}
