//! External program execution.
//!
//! Programs are invoked directly (no intermediate shell) in one of two modes:
//!
//! - **captured**: stdout and stderr are collected into one string so the
//!   caller can inspect package listings or version banners
//! - **passthrough**: the child inherits the terminal, so long installs show
//!   live progress and can ask their own questions
//!
//! Neither mode returns an error. A spawn failure or a non-zero exit status
//! is reported as `success == false` and the caller decides whether it
//! matters.

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::environment::resolve_tool_path;

/// Result of running an external program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or never spawned).
    pub exit_code: Option<i32>,

    /// Combined, trimmed stdout + stderr. Empty in passthrough mode.
    pub output: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the program ran and exited with status 0.
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(output: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            output,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, output: String, duration: Duration) -> Self {
        Self {
            exit_code,
            output,
            duration,
            success: false,
        }
    }

    /// First line of the output, trimmed.
    pub fn first_line(&self) -> &str {
        self.output.lines().next().unwrap_or("").trim()
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with the inherited environment).
    pub env: HashMap<String, OsString>,
}

impl CommandOptions {
    /// Options that hand the child an explicit `PATH`.
    pub fn with_path(path: OsString) -> Self {
        let mut options = Self::default();
        options.env.insert("PATH".to_string(), path);
        options
    }
}

/// The line shown for a command in verbose output.
pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = format!("$ {}", program);
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Runs external programs.
///
/// Implemented by [`SystemRunner`] for real processes and by
/// [`MockRunner`](super::MockRunner) in tests.
pub trait CommandRunner {
    /// Run a program and capture its combined output.
    fn capture(&self, program: &str, args: &[&str], options: &CommandOptions) -> CommandResult;

    /// Run a program attached to the controlling terminal.
    fn passthrough(&self, program: &str, args: &[&str], options: &CommandOptions)
        -> CommandResult;
}

/// Where a passthrough child writes its standard output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PassthroughStdout {
    /// The terminal, shared with our own stdout.
    #[default]
    Inherit,
    /// Our stderr, leaving stdout to the run report.
    Stderr,
}

impl PassthroughStdout {
    fn stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Stderr => Stdio::from(std::io::stderr()),
        }
    }
}

/// Runner that spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    passthrough_stdout: PassthroughStdout,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route passthrough children's stdout to `target`.
    pub fn with_passthrough_stdout(mut self, target: PassthroughStdout) -> Self {
        self.passthrough_stdout = target;
        self
    }

    fn build(program: &str, args: &[&str], options: &CommandOptions) -> Command {
        let inherited = std::env::var_os("PATH");
        let search_path = options
            .env
            .get("PATH")
            .map(OsString::as_os_str)
            .or(inherited.as_deref());

        let mut cmd = Command::new(program_path(program, search_path));
        cmd.args(args);

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        for (key, value) in &options.env {
            cmd.env(key, value);
        }

        cmd
    }
}

/// What to hand `Command::new` for `program`.
///
/// Windows only appends `.exe` when searching, so shims such as `scoop.cmd`
/// are resolved against `search_path` with `PATHEXT` first. Elsewhere the
/// name is passed through unchanged.
fn program_path(program: &str, search_path: Option<&OsStr>) -> OsString {
    if !cfg!(windows) {
        return OsString::from(program);
    }

    let entries: Vec<PathBuf> = search_path
        .map(|path| std::env::split_paths(path).collect())
        .unwrap_or_default();
    resolve_tool_path(program, &entries)
        .map(PathBuf::into_os_string)
        .unwrap_or_else(|| OsString::from(program))
}

impl CommandRunner for SystemRunner {
    fn capture(&self, program: &str, args: &[&str], options: &CommandOptions) -> CommandResult {
        let start = Instant::now();
        tracing::debug!("capture: {} {}", program, args.join(" "));

        let mut cmd = Self::build(program, args, options);
        cmd.stdin(Stdio::null());

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("failed to spawn {}: {}", program, e);
                return CommandResult::failure(None, e.to_string(), start.elapsed());
            }
        };

        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.trim().is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&stderr);
        }
        let combined = combined.trim().to_string();

        let duration = start.elapsed();
        if output.status.success() {
            CommandResult::success(combined, duration)
        } else {
            CommandResult::failure(output.status.code(), combined, duration)
        }
    }

    fn passthrough(
        &self,
        program: &str,
        args: &[&str],
        options: &CommandOptions,
    ) -> CommandResult {
        let start = Instant::now();
        tracing::debug!("passthrough: {} {}", program, args.join(" "));

        let mut cmd = Self::build(program, args, options);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(self.passthrough_stdout.stdio());
        cmd.stderr(Stdio::inherit());

        match cmd.status() {
            Ok(status) if status.success() => CommandResult::success(String::new(), start.elapsed()),
            Ok(status) => CommandResult::failure(status.code(), String::new(), start.elapsed()),
            Err(e) => {
                tracing::debug!("failed to spawn {}: {}", program, e);
                CommandResult::failure(None, e.to_string(), start.elapsed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn capture_successful_command() {
        let result = SystemRunner::new().capture("echo", &["hello"], &CommandOptions::default());

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.output, "hello");
    }

    #[cfg(unix)]
    #[test]
    fn capture_failing_command() {
        let result = SystemRunner::new().capture("sh", &["-c", "exit 3"], &CommandOptions::default());

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn capture_combines_stdout_and_stderr() {
        let result = SystemRunner::new().capture(
            "sh",
            &["-c", "echo out; echo err >&2"],
            &CommandOptions::default(),
        );

        assert!(result.success);
        assert!(result.output.contains("out"));
        assert!(result.output.contains("err"));
    }

    #[cfg(unix)]
    #[test]
    fn capture_with_env() {
        let mut options = CommandOptions::default();
        options
            .env
            .insert("MY_VAR".to_string(), OsString::from("my_value"));

        let result = SystemRunner::new().capture("sh", &["-c", "echo $MY_VAR"], &options);

        assert!(result.success);
        assert!(result.output.contains("my_value"));
    }

    #[cfg(unix)]
    #[test]
    fn capture_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let result = SystemRunner::new().capture("pwd", &[], &options);

        assert!(result.success);
    }

    #[test]
    fn spawn_error_is_a_failure_not_a_panic() {
        let result = SystemRunner::new().capture(
            "basecamp-definitely-not-a-real-program",
            &["--version"],
            &CommandOptions::default(),
        );

        assert!(!result.success);
        assert_eq!(result.exit_code, None);
    }

    #[test]
    fn passthrough_spawn_error_is_a_failure() {
        let result = SystemRunner::new().passthrough(
            "basecamp-definitely-not-a-real-program",
            &[],
            &CommandOptions::default(),
        );

        assert!(!result.success);
    }

    #[cfg(unix)]
    #[test]
    fn passthrough_reports_exit_status() {
        let ok = SystemRunner::new().passthrough("true", &[], &CommandOptions::default());
        let bad = SystemRunner::new().passthrough("false", &[], &CommandOptions::default());

        assert!(ok.success);
        assert!(ok.output.is_empty());
        assert!(!bad.success);
    }

    #[test]
    fn first_line_takes_only_the_first_line() {
        let result = CommandResult::success(
            "nvim v0.10.2\nBuild type: Release".to_string(),
            Duration::ZERO,
        );
        assert_eq!(result.first_line(), "nvim v0.10.2");
    }

    #[cfg(unix)]
    #[test]
    fn program_names_are_untouched_off_windows() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = std::env::join_paths([temp.path()]).unwrap();
        assert_eq!(program_path("scoop", Some(path.as_os_str())), OsString::from("scoop"));
    }

    #[cfg(windows)]
    #[test]
    fn batch_shim_resolves_through_pathext() {
        let temp = tempfile::TempDir::new().unwrap();
        let shim = temp.path().join("scoop.cmd");
        std::fs::write(&shim, "@echo Current Scoop version: 0.5.2\r\n").unwrap();
        let path = std::env::join_paths([temp.path()]).unwrap();

        assert_eq!(program_path("scoop", Some(path.as_os_str())), shim.into_os_string());
    }

    #[cfg(windows)]
    #[test]
    fn batch_shim_runs_by_bare_name() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("scoop.cmd"),
            "@echo Current Scoop version: 0.5.2\r\n",
        )
        .unwrap();
        let path = std::env::join_paths([temp.path()]).unwrap();

        let result = SystemRunner::new().capture(
            "scoop",
            &["--version"],
            &CommandOptions::with_path(path),
        );

        assert!(result.success, "{}", result.output);
        assert!(result.output.contains("0.5.2"));
    }

    #[test]
    fn unresolvable_program_keeps_its_name() {
        assert_eq!(
            program_path("basecamp-definitely-not-a-real-program", None),
            OsString::from("basecamp-definitely-not-a-real-program")
        );
    }

    #[test]
    fn command_line_joins_program_and_args() {
        assert_eq!(
            command_line("winget", &["install", "--id", "Git.Git"]),
            "$ winget install --id Git.Git"
        );
        assert_eq!(command_line("scoop", &[]), "$ scoop");
    }

    #[test]
    fn runner_defaults_to_inherited_stdout() {
        let runner = SystemRunner::new();
        assert_eq!(runner.passthrough_stdout, PassthroughStdout::Inherit);
        let runner = runner.with_passthrough_stdout(PassthroughStdout::Stderr);
        assert_eq!(runner.passthrough_stdout, PassthroughStdout::Stderr);
    }

    #[test]
    fn with_path_sets_path_variable() {
        let options = CommandOptions::with_path(OsString::from("/opt/bin"));
        assert_eq!(options.env.get("PATH"), Some(&OsString::from("/opt/bin")));
    }
}
