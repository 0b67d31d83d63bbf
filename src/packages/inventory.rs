//! Installed-package checks.
//!
//! Whether a package is installed is decided by reading the frontend's
//! listing and looking for the identifier in it. The lookup is behind
//! [`PackageInventory`] so the matching rule can change without touching the
//! installer.
//!
//! [`MatchStrategy::Substring`] is what the curated default plan relies on:
//! its identifiers are chosen so none is a substring of another listing line.
//! A plan with arbitrary packages should use [`MatchStrategy::Token`].

use serde::Serialize;

use super::spec::Backend;
use crate::shell::{CommandOptions, CommandRunner};

/// How an identifier is matched against listing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// The identifier appears anywhere in the listing.
    #[default]
    Substring,
    /// The identifier is one whole whitespace-delimited token.
    Token,
}

impl MatchStrategy {
    /// Check whether `listing` mentions `id`.
    pub fn matches(&self, listing: &str, id: &str) -> bool {
        if id.is_empty() {
            return false;
        }
        match self {
            MatchStrategy::Substring => listing.contains(id),
            MatchStrategy::Token => listing.split_whitespace().any(|token| token == id),
        }
    }
}

/// Read-only view of what a package manager has installed.
pub trait PackageInventory {
    /// Raw listing text, narrowed to `filter` where supported.
    fn list_installed(&self, filter: Option<&str>) -> String;

    /// Whether `id` is installed.
    fn is_installed(&self, id: &str) -> bool;
}

/// Inventory backed by the frontend's `list` command.
pub struct ListingInventory<'a> {
    runner: &'a dyn CommandRunner,
    options: &'a CommandOptions,
    backend: Backend,
    strategy: MatchStrategy,
}

impl<'a> ListingInventory<'a> {
    /// Create an inventory for `backend`.
    pub fn new(
        runner: &'a dyn CommandRunner,
        options: &'a CommandOptions,
        backend: Backend,
        strategy: MatchStrategy,
    ) -> Self {
        Self {
            runner,
            options,
            backend,
            strategy,
        }
    }

    /// Whether a bucket is already registered with the frontend.
    pub fn has_bucket(&self, bucket: &str) -> bool {
        let result = self
            .runner
            .capture(self.backend.program(), &["bucket", "list"], self.options);
        self.strategy.matches(&result.output, bucket)
    }
}

impl PackageInventory for ListingInventory<'_> {
    fn list_installed(&self, filter: Option<&str>) -> String {
        let args = self.backend.list_args(filter);
        // The exit status is ignored: winget exits non-zero when nothing matches.
        self.runner
            .capture(self.backend.program(), &args, self.options)
            .output
    }

    fn is_installed(&self, id: &str) -> bool {
        let listing = self.list_installed(Some(id));
        let installed = self.strategy.matches(&listing, id);
        tracing::debug!(
            "{} listing for {}: installed={}",
            self.backend,
            id,
            installed
        );
        installed
    }
}
