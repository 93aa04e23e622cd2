//! Terminal colour codes.

/// ANSI escape sequences used for user-facing output.
///
/// Passed to whatever renders text so that colour can be switched off
/// without touching the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub header: &'static str,
    pub blue: &'static str,
    pub cyan: &'static str,
    pub green: &'static str,
    pub warning: &'static str,
    pub fail: &'static str,
    pub bold: &'static str,
    pub underline: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub const fn ansi() -> Self {
        Self {
            header: "\x1b[95m",
            blue: "\x1b[94m",
            cyan: "\x1b[96m",
            green: "\x1b[92m",
            warning: "\x1b[93m",
            fail: "\x1b[91m",
            bold: "\x1b[1m",
            underline: "\x1b[4m",
            dim: "\x1b[2m",
            reset: "\x1b[0m",
        }
    }

    pub const fn plain() -> Self {
        Self {
            header: "",
            blue: "",
            cyan: "",
            green: "",
            warning: "",
            fail: "",
            bold: "",
            underline: "",
            dim: "",
            reset: "",
        }
    }

    pub const fn new(color: bool) -> Self {
        if color { Self::ansi() } else { Self::plain() }
    }

    /// Wrap `text` in `code` and a reset.
    pub fn paint(&self, code: &str, text: impl std::fmt::Display) -> String {
        format!("{code}{text}{}", self.reset)
    }
}
