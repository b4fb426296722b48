//! Output styles using the owo-colors stylesheet pattern.

use csm_common::CodespaceState;
use owo_colors::Style;

/// Centralized stylesheet for CLI output colors.
///
/// Every field is the plain default style until `colorize` is called, so a
/// no-color context renders unstyled text.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Secondary text such as captured script output.
    pub dim: Style,
    pub bold: Style,
    /// Section titles.
    pub header: Style,
    /// Fragment and codespace identifiers.
    pub ident: Style,
}

impl Styles {
    /// Apply colors to the stylesheet.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().cyan();
        self.ident = Style::new().magenta();
    }

    /// Style for a codespace state cell.
    #[must_use]
    pub fn state(&self, state: CodespaceState) -> Style {
        match state {
            CodespaceState::Available => self.success,
            CodespaceState::Shutdown | CodespaceState::Unknown => self.dim,
            CodespaceState::Starting
            | CodespaceState::ShuttingDown
            | CodespaceState::Rebuilding
            | CodespaceState::Provisioning => self.warning,
        }
    }
}
