//! Best-effort permission granting.

use std::fmt;

use apkgrant_common::{InterruptibleScope, take_interrupt};
use tracing::{debug, info};

use crate::bridge::{DeviceBridge, DeviceContext};
use crate::runner::CommandRunner;

/// Result of a single `pm grant`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantOutcome {
    Granted,
    /// The device refused, e.g. a normal or signature permission.
    Rejected { reason: String },
    /// The grant command could not be run at all.
    Failed { reason: String },
}

impl GrantOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, GrantOutcome::Granted)
    }
}

impl fmt::Display for GrantOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrantOutcome::Granted => f.write_str("granted"),
            GrantOutcome::Rejected { reason } => write!(f, "rejected: {reason}"),
            GrantOutcome::Failed { reason } => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    pub permission: String,
    pub outcome: GrantOutcome,
}

/// Every grant attempted for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantReport {
    pub package: String,
    pub results: Vec<PermissionGrant>,
    /// Ctrl+C stopped the loop before every permission was attempted.
    pub interrupted: bool,
}

impl GrantReport {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            results: Vec::new(),
            interrupted: false,
        }
    }

    pub fn granted_count(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_granted()).count()
    }

    pub fn not_granted_count(&self) -> usize {
        self.results.len() - self.granted_count()
    }
}

/// Grant each permission in order, one command per permission.
///
/// A refused or failed grant never stops the loop. Ctrl+C does: the
/// remaining permissions of this package are skipped and the report is
/// marked interrupted.
pub fn grant_permissions<R: CommandRunner>(
    bridge: &DeviceBridge<R>,
    device: &DeviceContext,
    package: &str,
    permissions: &[String],
) -> GrantReport {
    let mut report = GrantReport::new(package);
    let _scope = InterruptibleScope::enter();

    for permission in permissions {
        let outcome = bridge.grant(device, package, permission);
        if !outcome.is_granted() {
            debug!(package, permission = %permission, %outcome, "Permission not granted");
        }
        report.results.push(PermissionGrant {
            permission: permission.clone(),
            outcome,
        });

        if take_interrupt() {
            info!(package, "Grant loop interrupted");
            report.interrupted = true;
            break;
        }
    }

    report
}
