//! Preflight resolution of the external executables.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AdbError, Result};

/// Device-bridge client.
pub const ADB: &str = "adb";

/// Android asset packaging tool.
pub const AAPT: &str = "aapt";

/// Explicit tool locations that take precedence over the search path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOverrides {
    pub adb: Option<PathBuf>,
    pub aapt: Option<PathBuf>,
}

/// Resolved absolute locations of the required tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub adb: PathBuf,
    pub aapt: PathBuf,
}

/// Resolve `adb` and `aapt` on `PATH`, honouring overrides.
///
/// Fails with [`AdbError::MissingTools`] naming every tool that could not be
/// found, not just the first.
pub fn resolve_tools(overrides: &ToolOverrides) -> Result<ToolPaths> {
    resolve_with(overrides, |name| which::which(name).ok())
}

/// Same as [`resolve_tools`] but searching `search_path` instead of `PATH`.
pub fn resolve_tools_in(
    overrides: &ToolOverrides,
    search_path: &OsStr,
    cwd: &Path,
) -> Result<ToolPaths> {
    resolve_with(overrides, |name| {
        which::which_in(name, Some(search_path), cwd).ok()
    })
}

fn resolve_with<F>(overrides: &ToolOverrides, find: F) -> Result<ToolPaths>
where
    F: Fn(&OsStr) -> Option<PathBuf>,
{
    let lookup = |name: &str, explicit: Option<&PathBuf>| {
        let found = match explicit {
            Some(path) => find(path.as_os_str()),
            None => find(OsStr::new(name)),
        };
        debug!(tool = name, path = ?found, "Resolved tool");
        found
    };

    let adb = lookup(ADB, overrides.adb.as_ref());
    let aapt = lookup(AAPT, overrides.aapt.as_ref());

    match (adb, aapt) {
        (Some(adb), Some(aapt)) => Ok(ToolPaths { adb, aapt }),
        (adb, aapt) => {
            let mut missing = Vec::new();
            if adb.is_none() {
                missing.push(ADB.to_string());
            }
            if aapt.is_none() {
                missing.push(AAPT.to_string());
            }
            Err(AdbError::MissingTools(missing))
        }
    }
}
