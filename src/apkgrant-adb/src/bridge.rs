//! Device-bridge (`adb`) operations.

use std::path::{Path, PathBuf};

use apkgrant_common::{InterruptibleScope, SeparatedOutput, take_interrupt};
use tracing::{debug, warn};

use crate::device::{Device, parse_device_list};
use crate::error::{AdbError, Result};
use crate::grant::GrantOutcome;
use crate::ident::{is_package_name, is_permission_name};
use crate::package::{PackageListing, parse_package_list};
use crate::runner::{CommandRunner, Invocation};

/// The device every targeted command is addressed to.
///
/// Passed explicitly to each call as `adb -s <serial>`; nothing is read from
/// or written to `ANDROID_SERIAL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceContext {
    serial: String,
}

impl DeviceContext {
    pub fn new(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
        }
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }
}

impl From<&Device> for DeviceContext {
    fn from(device: &Device) -> Self {
        Self::new(device.serial.clone())
    }
}

/// Typed front-end over the `adb` executable.
#[derive(Debug, Clone)]
pub struct DeviceBridge<R> {
    adb: PathBuf,
    runner: R,
}

impl<R: CommandRunner> DeviceBridge<R> {
    pub fn new(adb: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            adb: adb.into(),
            runner,
        }
    }

    /// `adb devices -l`.
    ///
    /// Any stderr output, or failure to start adb, yields an empty list.
    pub fn list_devices(&self) -> Vec<Device> {
        let invocation = Invocation::new(&self.adb, ["devices", "-l"]);
        match self.run_checked(&invocation) {
            Ok(output) => parse_device_list(&output.stdout),
            Err(err) => {
                warn!(error = %err, "Device listing failed");
                Vec::new()
            }
        }
    }

    /// `adb -s <serial> shell pm list packages -f -3`: file-backed,
    /// third-party packages only.
    ///
    /// Ctrl+C while the listing runs abandons it and yields an empty listing,
    /// as does any stderr output.
    pub fn list_packages(&self, device: &DeviceContext) -> PackageListing {
        let invocation =
            self.device_invocation(device, ["shell", "pm", "list", "packages", "-f", "-3"]);

        let _scope = InterruptibleScope::enter();
        let result = self.run_checked(&invocation);
        if take_interrupt() {
            warn!("Package listing interrupted");
            return PackageListing::default();
        }

        match result {
            Ok(output) => parse_package_list(&output.stdout),
            Err(err) => {
                warn!(error = %err, "Package listing failed");
                PackageListing::default()
            }
        }
    }

    /// `adb -s <serial> pull <remote> <local>`.
    ///
    /// Success is judged from stderr alone; the local file is not inspected
    /// and is left as-is on failure.
    pub fn pull(&self, device: &DeviceContext, remote: &str, local: &Path) -> Result<()> {
        let local = local.to_string_lossy().into_owned();
        let invocation = self.device_invocation(device, ["pull", remote, local.as_str()]);
        self.run_checked(&invocation).map(|_| ())
    }

    /// `adb -s <serial> shell pm grant <package> <permission>`.
    ///
    /// Both words are interpreted by the device shell, so a package or
    /// permission that is not a plain identifier is refused without running
    /// adb.
    pub fn grant(&self, device: &DeviceContext, package: &str, permission: &str) -> GrantOutcome {
        if !is_package_name(package) {
            warn!(package, "Refusing to grant for invalid package name");
            return GrantOutcome::Failed {
                reason: format!("invalid package name {package:?}"),
            };
        }
        if !is_permission_name(permission) {
            warn!(package, permission, "Refusing to grant invalid permission name");
            return GrantOutcome::Failed {
                reason: format!("invalid permission name {permission:?}"),
            };
        }

        let invocation = self.device_invocation(device, ["shell", "pm", "grant", package, permission]);
        match self.run_checked(&invocation) {
            Ok(_) => GrantOutcome::Granted,
            Err(AdbError::Reported { message, .. }) => GrantOutcome::Rejected { reason: message },
            Err(err) => GrantOutcome::Failed {
                reason: err.to_string(),
            },
        }
    }

    fn device_invocation<'a, I>(&self, device: &'a DeviceContext, args: I) -> Invocation
    where
        I: IntoIterator<Item = &'a str>,
    {
        let args = ["-s", device.serial()].into_iter().chain(args);
        Invocation::new(&self.adb, args)
    }

    fn run_checked(&self, invocation: &Invocation) -> Result<SeparatedOutput> {
        run_checked(&self.runner, invocation)
    }
}

/// Run an invocation and turn stderr output into [`AdbError::Reported`].
pub(crate) fn run_checked<R: CommandRunner>(
    runner: &R,
    invocation: &Invocation,
) -> Result<SeparatedOutput> {
    let output = runner.run(invocation).map_err(|source| AdbError::Spawn {
        program: invocation.program_name(),
        source,
    })?;

    if output.has_stderr() {
        debug!(command = %invocation, stderr = %output.stderr.trim_end(), "Command reported an error");
        return Err(AdbError::Reported {
            program: invocation.program_name(),
            message: output.stderr_summary(),
        });
    }

    Ok(output)
}
