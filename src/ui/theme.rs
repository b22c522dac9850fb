//! Visual theme and styling.

use console::Style;

/// The editor's visual theme.
#[derive(Debug, Clone)]
pub struct EvfieldTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for field labels in key-value displays (bold).
    pub key: Style,
}

impl Default for EvfieldTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl EvfieldTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            key: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
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

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }

    /// Format a `label: value` line.
    pub fn format_field(&self, label: &str, value: &str) -> String {
        format!("{} {}", self.key.apply_to(format!("{}:", label)), value)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = EvfieldTheme::plain().format_success("Changes saved");
        assert_eq!(msg, "✓ Changes saved");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = EvfieldTheme::plain().format_warning("Draft restored");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Draft restored"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = EvfieldTheme::plain().format_error("Busy");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Busy"));
    }

    #[test]
    fn theme_formats_header() {
        let msg = EvfieldTheme::plain().format_header("New event field");
        assert_eq!(msg, "◆ New event field");
    }

    #[test]
    fn theme_formats_field() {
        let msg = EvfieldTheme::plain().format_field("FieldName", "Port");
        assert_eq!(msg, "FieldName: Port");
    }

    #[test]
    fn colored_theme_creates_without_panic() {
        let theme = EvfieldTheme::for_colors(true);
        let _ = theme.format_success("test");
    }
}
