//! Search-path snapshot and tool existence probe.
//!
//! A provisioning run resolves tools against an [`EnvironmentSnapshot`]
//! instead of the live process environment. Installers write new entries
//! into the persisted user/machine path, which the running process never
//! sees on its own, so the snapshot is re-derived explicitly with
//! [`EnvironmentSnapshot::refresh`] after anything that may have installed a
//! tool.
//!
//! # Example
//!
//! ```no_run
//! use basecamp::environment::{EnvironmentSnapshot, PersistedPath};
//! use basecamp::shell::SystemRunner;
//!
//! let mut snapshot = EnvironmentSnapshot::capture();
//! if !snapshot.exists("scoop") {
//!     // ... install scoop ...
//!     snapshot.refresh(&PersistedPath, &SystemRunner::new());
//! }
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::shell::{path_list_separator, CommandOptions, CommandRunner};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names to try for `tool` in each search-path directory.
///
/// On Windows every `PATHEXT` extension is tried unless the name already
/// carries one.
fn candidate_names(tool: &str) -> Vec<String> {
    if !cfg!(windows) || Path::new(tool).extension().is_some() {
        return vec![tool.to_string()];
    }

    let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
    pathext
        .split(';')
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!("{}{}", tool, ext.to_lowercase()))
        .collect()
}

/// Resolve a tool's binary path by iterating over search-path entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// `which`/`where`, whose behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Split a `PATH`-style list into entries, dropping empties and duplicates.
pub fn parse_path_list(text: &str, separator: char) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = Vec::new();
    for part in text.split(separator) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let path = PathBuf::from(part);
        if !entries.contains(&path) {
            entries.push(path);
        }
    }
    entries
}

/// Where a refreshed search path comes from.
pub trait PathSource {
    /// Load the current persisted search path, or `None` if it cannot be read.
    fn load(&self, runner: &dyn CommandRunner) -> Option<Vec<PathBuf>>;
}

/// Reads the search path the way a freshly opened terminal would see it.
///
/// On Windows this is the machine path followed by the user path from the
/// registry (queried through PowerShell). Elsewhere it is the `PATH` a login
/// shell ends up with, falling back to the process `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersistedPath;

impl PathSource for PersistedPath {
    fn load(&self, runner: &dyn CommandRunner) -> Option<Vec<PathBuf>> {
        if cfg!(windows) {
            let result = runner.capture(
                "powershell",
                &[
                    "-NoProfile",
                    "-Command",
                    "[Environment]::GetEnvironmentVariable('Path','Machine') + ';' + [Environment]::GetEnvironmentVariable('Path','User')",
                ],
                &CommandOptions::default(),
            );
            if !result.success {
                tracing::warn!("could not read persisted PATH: {}", result.output);
                return None;
            }
            let entries = parse_path_list(&result.output, ';');
            return (!entries.is_empty()).then_some(entries);
        }

        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
        let result = runner.capture(
            &shell,
            &["-lc", "printf '%s' \"$PATH\""],
            &CommandOptions::default(),
        );
        let text = if result.success && !result.output.is_empty() {
            result.output
        } else {
            std::env::var("PATH").ok()?
        };
        let entries = parse_path_list(&text, ':');
        (!entries.is_empty()).then_some(entries)
    }
}

/// A fixed search path, for tests and for pinning a run to known entries.
#[derive(Debug, Clone, Default)]
pub struct FixedPath(pub Vec<PathBuf>);

impl PathSource for FixedPath {
    fn load(&self, _runner: &dyn CommandRunner) -> Option<Vec<PathBuf>> {
        Some(self.0.clone())
    }
}

/// The search path a provisioning run resolves tools against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    entries: Vec<PathBuf>,
}

impl EnvironmentSnapshot {
    /// Snapshot the process `PATH`.
    pub fn capture() -> Self {
        let entries = std::env::var_os("PATH")
            .map(|path| std::env::split_paths(&path).collect())
            .unwrap_or_default();
        Self { entries }
    }

    /// Snapshot with explicit entries.
    pub fn from_entries(entries: Vec<PathBuf>) -> Self {
        Self { entries }
    }

    /// The search-path entries, in lookup order.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Whether `name` resolves to an executable on this search path.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Resolve `name` to the executable that would run.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        resolve_tool_path(name, &self.entries)
    }

    /// The entries joined into a `PATH` value.
    pub fn joined(&self) -> OsString {
        std::env::join_paths(&self.entries).unwrap_or_else(|_| {
            let sep = path_list_separator().to_string();
            let parts: Vec<String> = self
                .entries
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();
            OsString::from(parts.join(&sep))
        })
    }

    /// Command options that hand children this search path.
    pub fn command_options(&self) -> CommandOptions {
        CommandOptions::with_path(self.joined())
    }

    /// Re-derive the search path from `source`.
    ///
    /// Keeps the current entries when the source cannot be read. Returns
    /// whether the entries changed.
    pub fn refresh(&mut self, source: &dyn PathSource, runner: &dyn CommandRunner) -> bool {
        match source.load(runner) {
            Some(entries) if !entries.is_empty() => {
                let changed = entries != self.entries;
                tracing::debug!(
                    "refreshed search path ({} entries, changed: {})",
                    entries.len(),
                    changed
                );
                self.entries = entries;
                changed
            }
            _ => {
                tracing::debug!("search path refresh unavailable, keeping snapshot");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use std::fs;
    use tempfile::TempDir;

    /// Create a fake binary at a path (creates parent dirs as needed).
    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn binary_name(tool: &str) -> String {
        if cfg!(windows) {
            format!("{}.exe", tool)
        } else {
            tool.to_string()
        }
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        create_fake_binary(&dir_a.join(binary_name("rg")));
        create_fake_binary(&dir_b.join(binary_name("rg")));

        let result = resolve_tool_path("rg", &[dir_a.clone(), dir_b.clone()]);
        assert_eq!(result, Some(dir_a.join(binary_name("rg"))));
    }

    #[test]
    fn resolve_tool_path_returns_none_when_not_found() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        assert!(resolve_tool_path("rg", &[dir]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        fs::create_dir_all(&dir_a).unwrap();
        fs::write(dir_a.join("fd"), "not executable").unwrap();
        fs::set_permissions(dir_a.join("fd"), fs::Permissions::from_mode(0o644)).unwrap();
        create_fake_binary(&dir_b.join("fd"));

        let result = resolve_tool_path("fd", &[dir_a, dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("fd")));
    }

    #[test]
    fn resolve_tool_path_ignores_directories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(binary_name("nvim"))).unwrap();

        assert!(resolve_tool_path("nvim", &[temp.path().to_path_buf()]).is_none());
    }

    #[test]
    fn parse_path_list_drops_empties_and_duplicates() {
        let entries = parse_path_list("C:\\a;;C:\\b; C:\\a ;", ';');
        assert_eq!(
            entries,
            vec![PathBuf::from("C:\\a"), PathBuf::from("C:\\b")]
        );
    }

    #[test]
    fn snapshot_exists_uses_its_own_entries() {
        let temp = TempDir::new().unwrap();
        create_fake_binary(&temp.path().join(binary_name("scoop")));

        let empty = EnvironmentSnapshot::from_entries(vec![]);
        let populated = EnvironmentSnapshot::from_entries(vec![temp.path().to_path_buf()]);

        assert!(!empty.exists("scoop"));
        assert!(populated.exists("scoop"));
    }

    #[test]
    fn refresh_replaces_entries_from_source() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("bin");
        create_fake_binary(&bin.join(binary_name("volta")));

        let mut snapshot = EnvironmentSnapshot::from_entries(vec![]);
        assert!(!snapshot.exists("volta"));

        let changed = snapshot.refresh(&FixedPath(vec![bin.clone()]), &MockRunner::new());

        assert!(changed);
        assert_eq!(snapshot.entries(), &[bin]);
        assert!(snapshot.exists("volta"));
    }

    #[test]
    fn refresh_keeps_entries_when_source_is_empty() {
        let original = vec![PathBuf::from("/usr/bin")];
        let mut snapshot = EnvironmentSnapshot::from_entries(original.clone());

        let changed = snapshot.refresh(&FixedPath(vec![]), &MockRunner::new());

        assert!(!changed);
        assert_eq!(snapshot.entries(), original.as_slice());
    }

    #[test]
    fn refresh_with_same_entries_reports_unchanged() {
        let entries = vec![PathBuf::from("/usr/bin")];
        let mut snapshot = EnvironmentSnapshot::from_entries(entries.clone());

        assert!(!snapshot.refresh(&FixedPath(entries), &MockRunner::new()));
    }

    #[cfg(unix)]
    #[test]
    fn persisted_path_reads_login_shell_path() {
        let runner = MockRunner::new();
        let shell = std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string());
        runner.respond(&format!("{} -lc", shell), "/opt/tools/bin:/usr/bin", true);

        let entries = PersistedPath.load(&runner).unwrap();
        assert_eq!(
            entries,
            vec![PathBuf::from("/opt/tools/bin"), PathBuf::from("/usr/bin")]
        );
    }

    #[test]
    fn joined_round_trips_through_split_paths() {
        let snapshot = EnvironmentSnapshot::from_entries(vec![
            PathBuf::from("first"),
            PathBuf::from("second"),
        ]);
        let joined = snapshot.joined();
        let split: Vec<PathBuf> = std::env::split_paths(&joined).collect();
        assert_eq!(split, snapshot.entries());
    }

    #[test]
    fn command_options_carry_the_snapshot_path() {
        let snapshot = EnvironmentSnapshot::from_entries(vec![PathBuf::from("only")]);
        let options = snapshot.command_options();
        assert_eq!(options.env.get("PATH"), Some(&snapshot.joined()));
    }
}
