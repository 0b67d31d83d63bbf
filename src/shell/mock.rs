//! Scripted command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning processes.
//! Responses are matched against the full command line (`program args...`)
//! by prefix, longest prefix first, and every invocation is recorded for
//! later assertion.
//!
//! # Example
//!
//! ```
//! use basecamp::shell::{CommandOptions, CommandRunner, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("winget list", "Git.Git 2.47.0", true);
//!
//! let result = runner.capture("winget", &["list", "--id", "Git.Git"], &CommandOptions::default());
//! assert!(result.output.contains("Git.Git"));
//! assert!(runner.was_invoked("winget list --id Git.Git"));
//! ```

use std::cell::RefCell;
use std::ffi::OsString;
use std::time::Duration;

use super::command::{CommandOptions, CommandResult, CommandRunner};

/// How a recorded command was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Captured,
    Passthrough,
}

/// A recorded invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Full command line, space separated.
    pub command_line: String,
    /// Mode the command was run in.
    pub mode: RunMode,
    /// `PATH` handed to the child, if any.
    pub path: Option<OsString>,
}

type Hook = Box<dyn Fn()>;

/// Mock runner with scripted responses.
///
/// Commands with no scripted response fail with empty output.
#[derive(Default)]
pub struct MockRunner {
    responses: RefCell<Vec<(String, String, bool)>>,
    hooks: RefCell<Vec<(String, Hook)>>,
    invocations: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner where every command fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a response for commands starting with `prefix`.
    ///
    /// A later call with the same prefix replaces the earlier response.
    pub fn respond(&self, prefix: &str, output: &str, success: bool) {
        let mut responses = self.responses.borrow_mut();
        responses.retain(|(p, _, _)| p != prefix);
        responses.push((prefix.to_string(), output.to_string(), success));
    }

    /// Run `hook` whenever a command starting with `prefix` is invoked.
    ///
    /// Lets a test simulate side effects of an install, such as a new
    /// executable appearing on disk.
    pub fn on_invoke(&self, prefix: &str, hook: impl Fn() + 'static) {
        self.hooks
            .borrow_mut()
            .push((prefix.to_string(), Box::new(hook)));
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Recorded command lines, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|i| i.command_line.clone())
            .collect()
    }

    /// Check whether a command starting with `prefix` was run.
    pub fn was_invoked(&self, prefix: &str) -> bool {
        self.invocations
            .borrow()
            .iter()
            .any(|i| i.command_line.starts_with(prefix))
    }

    /// Count the commands starting with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.invocations
            .borrow()
            .iter()
            .filter(|i| i.command_line.starts_with(prefix))
            .count()
    }

    fn run(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
        mode: RunMode,
    ) -> CommandResult {
        let command_line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");

        self.invocations.borrow_mut().push(Invocation {
            command_line: command_line.clone(),
            mode,
            path: options.env.get("PATH").cloned(),
        });

        for (prefix, hook) in self.hooks.borrow().iter() {
            if command_line.starts_with(prefix.as_str()) {
                hook();
            }
        }

        let responses = self.responses.borrow();
        let matched = responses
            .iter()
            .filter(|(prefix, _, _)| command_line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _, _)| prefix.len());

        match matched {
            Some((_, output, true)) => {
                let output = if mode == RunMode::Passthrough {
                    String::new()
                } else {
                    output.clone()
                };
                CommandResult::success(output, Duration::ZERO)
            }
            Some((_, output, false)) => CommandResult::failure(Some(1), output.clone(), Duration::ZERO),
            None => CommandResult::failure(None, String::new(), Duration::ZERO),
        }
    }
}

impl CommandRunner for MockRunner {
    fn capture(&self, program: &str, args: &[&str], options: &CommandOptions) -> CommandResult {
        self.run(program, args, options, RunMode::Captured)
    }

    fn passthrough(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
    ) -> CommandResult {
        self.run(program, args, options, RunMode::Passthrough)
    }
}
