use std::fmt;

/// Notice surfaced when the user reaches for the unfinished reports tool.
pub const UNSUPPORTED_TOOL_NOTICE: &str = "Sorry, we don't have this feature right now! :(";

/// Closed set of prompt transforms selectable from the tools menu.
///
/// `Reports` is a recognized mode with no implemented effect besides blocking
/// the send path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    None,
    Presentation,
    Image,
    Reports,
}

impl ToolMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolMode::None => "none",
            ToolMode::Presentation => "presentation",
            ToolMode::Image => "image",
            ToolMode::Reports => "reports",
        }
    }

    /// Uppercase label used in the processing indicator. Plain chat reads
    /// better as `CHAT` than as `NONE`.
    pub fn label(self) -> &'static str {
        match self {
            ToolMode::None => "CHAT",
            ToolMode::Presentation => "PRESENTATION",
            ToolMode::Image => "IMAGE",
            ToolMode::Reports => "REPORTS",
        }
    }

    /// Parse a user-supplied mode name. Unrecognized names yield `None` and
    /// leave the selection untouched.
    pub fn parse(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(name.trim()))
    }

    pub fn all() -> &'static [ToolMode] {
        &[
            ToolMode::None,
            ToolMode::Presentation,
            ToolMode::Image,
            ToolMode::Reports,
        ]
    }
}

impl fmt::Display for ToolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single-owner cell holding the active tool mode.
///
/// Both readers (the prompt composer and the input-hint renderer) borrow this
/// cell; the setter is the only write path.
#[derive(Debug, Default)]
pub struct ToolSelection {
    active: ToolMode,
}

impl ToolSelection {
    pub fn new(initial: ToolMode) -> Self {
        Self { active: initial }
    }

    pub fn active(&self) -> ToolMode {
        self.active
    }

    /// Switch modes, returning a notice to surface when the chosen mode is
    /// known to be unsupported. The mode is still set in that case, so a
    /// later send is blocked rather than silently rerouted; it does not reset
    /// to `none` on its own.
    pub fn select(&mut self, mode: ToolMode) -> Option<&'static str> {
        self.active = mode;
        (mode == ToolMode::Reports).then_some(UNSUPPORTED_TOOL_NOTICE)
    }
}
