//! Display configuration.

/// Layout parameters for detailed ride output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Maximum line width for wrapped notes, indentation included.
    pub line_width: usize,

    /// Indentation of the per-field lines.
    pub indent: usize,

    /// Indentation of nested lines (bus status, notes).
    pub sub_indent: usize,

    /// Whether status messages are wrapped in ANSI colour codes.
    pub color: bool,
}

impl DisplayConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(line_width: usize, indent: usize, sub_indent: usize, color: bool) -> Self {
        Self {
            line_width,
            indent,
            sub_indent,
            color,
        }
    }

    /// Returns the configuration with colour turned off.
    pub fn without_color(self) -> Self {
        Self {
            color: false,
            ..self
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            line_width: 72,
            indent: 3,
            sub_indent: 6,
            color: true,
        }
    }
}
