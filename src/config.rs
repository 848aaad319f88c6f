use serde::Deserialize;

/// Terminal geometry, palette and banner.  Missing fields in a config file
/// fall back to [`TerminalConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Columns on screen.
    pub width: usize,

    /// Rows on screen; the last visible row holds the input line.
    pub height: usize,

    /// Longest input line, in characters.
    pub max_input: usize,

    /// Scrollback entries kept before the oldest is evicted.
    pub scrollback: usize,

    /// Tab stops every `tab_width` columns.
    pub tab_width: usize,

    /// Lines pre‑seeded into scrollback when the terminal is created.
    pub banner: Vec<String>,

    pub text_color: u8,
    pub input_color: u8,
    pub cursor_color: u8,

    /// Prefix of a printed result.
    pub result_marker: String,

    /// Prefix of a printed error.
    pub error_marker: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            width: 56,
            height: 20,
            max_input: 55,
            scrollback: 256,
            tab_width: 4,
            banner: Vec::new(),
            text_color: 13,
            input_color: 13,
            cursor_color: 8,
            result_marker: "#═ ".to_string(),
            error_marker: "#! ".to_string(),
        }
    }
}

impl TerminalConfig {
    /// Parse a JSON config document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
