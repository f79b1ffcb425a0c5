//! Stylesheet applied to everything the install and remove tools print.

use owo_colors::Style;

/// Styles for progress lines and summaries.
///
/// The default is unstyled; [`Styles::colored`] builds the colored
/// variant, so color support is decided once at startup and never
/// re-checked per line.
#[derive(Default, Clone)]
pub struct Styles {
    /// Completed steps (green)
    pub success: Style,
    /// Problems the workflow survived (yellow)
    pub warning: Style,
    /// Fatal errors (red)
    pub error: Style,
    /// Steps underway (blue)
    pub info: Style,
    /// Secondary detail such as paths
    pub dim: Style,
    /// Section headers
    pub header: Style,
}

impl Styles {
    /// Stylesheet with every entry colored.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
        }
    }
}
