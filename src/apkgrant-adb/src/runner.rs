//! Command execution seam.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use apkgrant_common::{SeparatedOutput, run_with_separated_output};
use tracing::{debug, trace};

/// A single external command: program plus arguments, never a shell string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// File name of the program, e.g. `adb` for `/opt/sdk/platform-tools/adb`.
    pub fn program_name(&self) -> String {
        program_name(&self.program)
    }

    /// Whether `pattern` occurs as a contiguous run inside the arguments.
    pub fn has_args(&self, pattern: &[&str]) -> bool {
        if pattern.is_empty() {
            return true;
        }
        self.args
            .windows(pattern.len())
            .any(|window| window.iter().zip(pattern).all(|(a, p)| a == p))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program_name())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

pub(crate) fn program_name(program: &Path) -> String {
    program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Runs invocations to completion and returns their separated output.
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<SeparatedOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> io::Result<SeparatedOutput> {
        (**self).run(invocation)
    }
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<SeparatedOutput> {
        debug!(command = %invocation, "Running external command");

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        let output = run_with_separated_output(command)?;

        trace!(
            command = %invocation,
            exit_code = ?output.exit_code,
            output = %output.combined_with_labels(),
            "External command finished"
        );
        Ok(output)
    }
}
