//! Packaging tool (`aapt`) operations.

use std::path::{Path, PathBuf};

use crate::bridge::run_checked;
use crate::error::Result;
use crate::permissions::parse_permissions;
use crate::runner::{CommandRunner, Invocation};

/// Typed front-end over the `aapt` executable.
#[derive(Debug, Clone)]
pub struct PackagingTool<R> {
    aapt: PathBuf,
    runner: R,
}

impl<R: CommandRunner> PackagingTool<R> {
    pub fn new(aapt: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            aapt: aapt.into(),
            runner,
        }
    }

    /// `aapt d permissions <apk>`.
    ///
    /// `Err` when aapt reports anything on stderr; `Ok` with an empty list
    /// when the manifest simply declares no permissions.
    pub fn dump_permissions(&self, apk: &Path) -> Result<Vec<String>> {
        let apk = apk.to_string_lossy();
        let invocation = Invocation::new(&self.aapt, ["d", "permissions", &*apk]);
        let output = run_checked(&self.runner, &invocation)?;
        Ok(parse_permissions(&output.stdout))
    }
}
