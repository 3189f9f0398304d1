//! Scripted [`CommandRunner`] for tests.
//!
//! Responses are matched by argument runs, first registered rule wins:
//!
//! ```rust,ignore
//! let runner = ScriptedRunner::new()
//!     .on(&["devices", "-l"], SeparatedOutput::with_stdout("List of devices attached\nA\tdevice\n"))
//!     .on(&["pm", "grant"], SeparatedOutput::default());
//! ```
//!
//! Unmatched invocations answer with stderr output, so they read as failures.

use std::io;
use std::sync::Mutex;

use apkgrant_common::SeparatedOutput;

use crate::runner::{CommandRunner, Invocation};

type Responder = Box<dyn Fn(&Invocation) -> io::Result<SeparatedOutput> + Send + Sync>;

struct Rule {
    pattern: Vec<String>,
    respond: Responder,
}

#[derive(Default)]
pub struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Mutex<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer invocations containing `pattern` with a fixed output.
    pub fn on(self, pattern: &[&str], output: SeparatedOutput) -> Self {
        self.on_with(pattern, move |_| Ok(output.clone()))
    }

    /// Answer invocations containing `pattern` by calling `respond`.
    pub fn on_with<F>(mut self, pattern: &[&str], respond: F) -> Self
    where
        F: Fn(&Invocation) -> io::Result<SeparatedOutput> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            pattern: pattern.iter().map(|s| s.to_string()).collect(),
            respond: Box::new(respond),
        });
        self
    }

    /// Every invocation seen so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Invocations whose arguments contain `pattern`.
    pub fn invocations_matching(&self, pattern: &[&str]) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|invocation| invocation.has_args(pattern))
            .collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<SeparatedOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(invocation.clone());

        let rule = self.rules.iter().find(|rule| {
            let pattern: Vec<&str> = rule.pattern.iter().map(String::as_str).collect();
            invocation.has_args(&pattern)
        });

        match rule {
            Some(rule) => (rule.respond)(invocation),
            None => Ok(SeparatedOutput::with_stderr(format!(
                "no scripted response for `{invocation}`\n"
            ))),
        }
    }
}
