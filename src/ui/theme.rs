//! Visual theme and styling.

use console::Style;

/// Colors and glyphs used on the console.
#[derive(Debug, Clone)]
pub struct CampTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Running elements (magenta).
    pub info: Style,
    /// Secondary text.
    pub dim: Style,
    /// Important text (bold).
    pub highlight: Style,
    /// Step titles (bold).
    pub step_title: Style,
    /// Headers (magenta bold).
    pub header: Style,
    /// Table column headings.
    pub column: Style,
}

impl Default for CampTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl CampTheme {
    /// Colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            step_title: Style::new().bold(),
            header: Style::new().bold().magenta(),
            column: Style::new().bold().underlined(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            step_title: Style::new(),
            header: Style::new(),
            column: Style::new(),
        }
    }

    /// Pick the colored or plain theme.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a step title.
    pub fn format_step(&self, title: &str) -> String {
        format!("{}", self.step_title.apply_to(format!("◆ {}", title)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("⛺"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
