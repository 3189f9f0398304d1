//! The end-to-end run: preflight, device discovery and selection, package
//! discovery, then pull / inspect / delete / grant for every package.
//!
//! Fatal problems (missing tools, no devices, no selection) end the run with
//! a [`PipelineError`]. Everything that goes wrong for a single package is
//! recorded in the [`RunSummary`] instead and the run carries on.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use apkgrant_adb::{
    AdbError, CommandRunner, Device, DeviceBridge, DeviceContext, GrantReport, MalformedLine,
    Package, PackagingTool, SystemRunner, ToolOverrides, ToolPaths, grant_permissions,
    resolve_tools,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::progress::ProgressReporter;
use crate::selector::{print_menu, select_index};

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub tools: ToolOverrides,
    /// Directory the APKs are pulled into.
    pub work_dir: PathBuf,
    /// Preselected device serial; used only if that device is connected.
    pub serial: Option<String>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            tools: ToolOverrides::default(),
            work_dir: PathBuf::from("."),
            serial: None,
        }
    }
}

/// Errors that abort the whole run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required packages not found.\n{}", .0.join(", "))]
    MissingTools(Vec<String>),

    #[error("Could not find any device")]
    NoDevices,

    #[error("No device selected")]
    NoSelection,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl PipelineError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::MissingTools(_)
            | PipelineError::NoDevices
            | PipelineError::NoSelection
            | PipelineError::Io(_) => 1,
        }
    }
}

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageOutcome {
    /// Permissions were read and every grant was attempted (unless interrupted).
    Granted(GrantReport),
    /// `adb pull` reported an error; nothing else was attempted.
    PullFailed { package: Package, reason: String },
    /// `aapt` could not read the APK; no grants were attempted.
    DumpFailed { package: Package, reason: String },
}

impl PackageOutcome {
    pub fn is_skipped(&self) -> bool {
        !matches!(self, PackageOutcome::Granted(_))
    }
}

/// Per-item results of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub device: Device,
    pub packages: Vec<PackageOutcome>,
    pub malformed_lines: Vec<MalformedLine>,
}

impl RunSummary {
    pub fn granted_packages(&self) -> usize {
        self.packages.iter().filter(|p| !p.is_skipped()).count()
    }

    pub fn skipped_packages(&self) -> usize {
        self.packages.iter().filter(|p| p.is_skipped()).count()
    }

    /// Grants the device refused or that could not be issued.
    pub fn failed_grants(&self) -> usize {
        self.reports().map(GrantReport::not_granted_count).sum()
    }

    pub fn interrupted_packages(&self) -> usize {
        self.reports().filter(|r| r.interrupted).count()
    }

    fn reports(&self) -> impl Iterator<Item = &GrantReport> {
        self.packages.iter().filter_map(|p| match p {
            PackageOutcome::Granted(report) => Some(report),
            _ => None,
        })
    }
}

/// Resolve the external tools, mapping a miss to the fatal error.
pub fn preflight(overrides: &ToolOverrides) -> Result<ToolPaths, PipelineError> {
    resolve_tools(overrides).map_err(|err| match err {
        AdbError::MissingTools(missing) => PipelineError::MissingTools(missing),
        other => PipelineError::Io(io::Error::other(other)),
    })
}

/// Run against real processes, stdin and stdout.
pub fn run(options: RunOptions) -> Result<RunSummary, PipelineError> {
    let tools = preflight(&options.tools)?;
    let pipeline = Pipeline::new(&tools, SystemRunner, options);

    let stdin = io::stdin();
    let stdout = io::stdout();
    pipeline.run(stdin.lock(), &mut stdout.lock())
}

/// The run itself, over any command runner and terminal streams.
pub struct Pipeline<R> {
    bridge: DeviceBridge<R>,
    aapt: PackagingTool<R>,
    options: RunOptions,
}

impl<R: CommandRunner + Clone> Pipeline<R> {
    pub fn new(tools: &ToolPaths, runner: R, options: RunOptions) -> Self {
        Self {
            bridge: DeviceBridge::new(&tools.adb, runner.clone()),
            aapt: PackagingTool::new(&tools.aapt, runner),
            options,
        }
    }

    pub fn run<B: BufRead, W: Write>(
        &self,
        input: B,
        out: &mut W,
    ) -> Result<RunSummary, PipelineError> {
        let devices = self.bridge.list_devices();
        if devices.is_empty() {
            return Err(PipelineError::NoDevices);
        }

        let device = self.choose_device(&devices, input, out)?;
        let context = DeviceContext::from(&device);
        writeln!(out, "Device selected {}", context.serial())?;
        writeln!(out, "Getting apps")?;
        out.flush()?;

        let listing = self.bridge.list_packages(&context);
        info!(
            packages = listing.packages.len(),
            malformed = listing.malformed.len(),
            "Package listing complete"
        );

        let progress = ProgressReporter::new(listing.packages.len());
        let mut outcomes = Vec::with_capacity(listing.packages.len());

        for (idx, package) in listing.packages.iter().enumerate() {
            let outcome = self.process_package(&context, package);
            match &outcome {
                PackageOutcome::Granted(_) => {
                    writeln!(out, "{} permissions grant", package.name)?;
                }
                PackageOutcome::PullFailed { reason, .. }
                | PackageOutcome::DumpFailed { reason, .. } => {
                    writeln!(out, "{} skipped: {}", package.name, reason)?;
                }
            }
            progress.update(out, idx + 1)?;
            outcomes.push(outcome);
        }
        progress.finish(out)?;

        let summary = RunSummary {
            device,
            packages: outcomes,
            malformed_lines: listing.malformed,
        };
        writeln!(
            out,
            "Done: {} of {} packages granted, {} skipped, {} grants refused, {} unreadable listing lines",
            summary.granted_packages(),
            summary.packages.len(),
            summary.skipped_packages(),
            summary.failed_grants(),
            summary.malformed_lines.len()
        )?;
        out.flush()?;

        Ok(summary)
    }

    fn choose_device<B: BufRead, W: Write>(
        &self,
        devices: &[Device],
        input: B,
        out: &mut W,
    ) -> Result<Device, PipelineError> {
        if let Some(serial) = &self.options.serial {
            if let Some(device) = devices.iter().find(|d| &d.serial == serial) {
                return Ok(device.clone());
            }
            warn!(serial = %serial, "Requested device is not connected, asking instead");
        }

        print_menu(out, devices)?;
        let idx = select_index(devices.len(), input)?.ok_or(PipelineError::NoSelection)?;
        Ok(devices[idx].clone())
    }

    fn process_package(&self, device: &DeviceContext, package: &Package) -> PackageOutcome {
        let local = self.options.work_dir.join(package.apk_file_name());

        if let Err(err) = self.bridge.pull(device, &package.installed_path, &local) {
            debug!(package = %package.name, error = %err, "Pull failed");
            return PackageOutcome::PullFailed {
                package: package.clone(),
                reason: err.to_string(),
            };
        }

        let dumped = self.aapt.dump_permissions(&local);
        remove_local_apk(&local);

        match dumped {
            Ok(permissions) => {
                debug!(package = %package.name, count = permissions.len(), "Granting permissions");
                PackageOutcome::Granted(grant_permissions(
                    &self.bridge,
                    device,
                    &package.name,
                    &permissions,
                ))
            }
            Err(err) => {
                debug!(package = %package.name, error = %err, "Permission dump failed");
                PackageOutcome::DumpFailed {
                    package: package.clone(),
                    reason: err.to_string(),
                }
            }
        }
    }
}

fn remove_local_apk(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Pulled APK was not on disk");
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Could not delete pulled APK");
        }
    }
}
