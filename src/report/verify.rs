//! Post-run tool verification.
//!
//! Every tool is probed fresh against the (refreshed) snapshot. Nothing here
//! can fail the run.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::environment::EnvironmentSnapshot;
use crate::shell::CommandRunner;
use crate::ui::table::{RowStyle, Table};
use crate::ui::CampTheme;

/// First run of digits and dots.
static VERSION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[0-9][0-9.]*").ok());

/// Shown in place of a version for tools that do not resolve.
pub const NOT_FOUND: &str = "NOT FOUND";

/// A tool to verify and how to ask it for its version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolCheck {
    /// Name shown in the table.
    pub name: &'static str,
    /// Executable to probe.
    pub command: &'static str,
    pub version_args: &'static [&'static str],
}

impl ToolCheck {
    pub const fn new(
        name: &'static str,
        command: &'static str,
        version_args: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            command,
            version_args,
        }
    }
}

/// The tools the default plan provisions.
pub const DEFAULT_TOOLS: &[ToolCheck] = &[
    ToolCheck::new("git", "git", &["--version"]),
    ToolCheck::new("scoop", "scoop", &["--version"]),
    ToolCheck::new("zig", "zig", &["version"]),
    ToolCheck::new("rg", "rg", &["--version"]),
    ToolCheck::new("fd", "fd", &["--version"]),
    ToolCheck::new("volta", "volta", &["--version"]),
    ToolCheck::new("node", "node", &["--version"]),
    ToolCheck::new("nu", "nu", &["--version"]),
    ToolCheck::new("starship", "starship", &["--version"]),
    ToolCheck::new("wezterm", "wezterm", &["--version"]),
    ToolCheck::new("nvim", "nvim", &["--version"]),
];

/// Verification result for one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub resolvable: bool,
    pub version: Option<String>,
}

impl ToolStatus {
    /// Text for the version column.
    pub fn display_version(&self) -> &str {
        match (&self.version, self.resolvable) {
            (Some(v), true) if !v.is_empty() => v.as_str(),
            (_, true) => "unknown",
            (_, false) => NOT_FOUND,
        }
    }
}

/// Pull the first version-looking token out of `text`.
///
/// `"1.2.3 (abcdef)"` gives `"1.2.3"`. Trailing dots are dropped. Text
/// without any digit comes back unchanged.
pub fn extract_version(text: &str) -> String {
    let found = VERSION_RE
        .as_ref()
        .and_then(|re| re.find(text))
        .map(|m| m.as_str().trim_end_matches('.'));

    match found {
        Some(version) => version.to_string(),
        None => text.to_string(),
    }
}

/// Probe one tool.
pub fn check_tool(
    check: &ToolCheck,
    snapshot: &EnvironmentSnapshot,
    runner: &dyn CommandRunner,
) -> ToolStatus {
    if !snapshot.exists(check.command) {
        return ToolStatus {
            name: check.name.to_string(),
            resolvable: false,
            version: None,
        };
    }

    let result = runner.capture(
        check.command,
        check.version_args,
        &snapshot.command_options(),
    );
    let first_line = result.first_line();
    let version = (!first_line.is_empty()).then(|| extract_version(first_line));

    ToolStatus {
        name: check.name.to_string(),
        resolvable: true,
        version,
    }
}

/// Probe every tool in order.
pub fn verify_tools(
    checks: &[ToolCheck],
    snapshot: &EnvironmentSnapshot,
    runner: &dyn CommandRunner,
) -> Vec<ToolStatus> {
    checks
        .iter()
        .map(|check| check_tool(check, snapshot, runner))
        .collect()
}

/// Render the tool/version table.
pub fn render_tools(statuses: &[ToolStatus], theme: &CampTheme) -> String {
    let mut table = Table::new(&["Tool", "Version"]);
    for status in statuses {
        let style = if status.resolvable {
            RowStyle::Good
        } else {
            RowStyle::Bad
        };
        table.add_row(&[status.name.as_str(), status.display_version()], style);
    }
    table.render(theme)
}
