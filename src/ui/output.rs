//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also show debug-level detail such as command lines.
    Verbose,
    /// Show progress and status.
    #[default]
    Normal,
    /// Show spinners and errors only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl OutputMode {
    /// Pick the mode from the verbosity flags.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Whether command lines and other detail are shown.
    pub fn shows_detail(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Whether progress spinners are shown.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal | Self::Quiet)
    }

    /// Whether status lines (success, skipped, step titles) are shown.
    pub fn shows_status(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
