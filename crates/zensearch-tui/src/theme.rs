//! Colour theme for the zensearch TUI.
//!
//! Themes are TOML files embedded in the binary via [`include_str!`], so the
//! client works without any files on disk. [`Theme::by_name`] resolves the
//! `[ui] theme` config value; `t` cycles through [`Theme::NAMES`] at runtime.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;
use zensearch_core::search::highlight::HighlightKind;
use zensearch_core::search::suggest::SuggestionKind;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types mirroring the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    dim: bool,
    #[serde(default)]
    italic: bool,
    #[serde(default)]
    underlined: bool,
}

impl RawStyle {
    fn into_style(self) -> Style {
        let mut style = Style::default();
        if let Some(c) = self.fg.as_deref().and_then(parse_color) {
            style = style.fg(c);
        }
        if let Some(c) = self.bg.as_deref().and_then(parse_color) {
            style = style.bg(c);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.dim {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.underlined {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawResults {
    title: RawStyle,
    score: RawStyle,
    meta: RawStyle,
    keywords: RawStyle,
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawPair {
    direct: RawStyle,
    semantic: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    text: RawStyle,
    current_page: RawStyle,
    flag_on: RawStyle,
    flag_off: RawStyle,
    error: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawSuggestions {
    history: RawStyle,
    semantic: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    name: String,
    borders: RawBorders,
    results: RawResults,
    badges: RawPair,
    highlight: RawPair,
    status: RawStatus,
    suggestions: RawSuggestions,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme with every style pre-resolved.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    pub border_focused: Style,
    pub border_unfocused: Style,

    pub result_title: Style,
    pub result_score: Style,
    pub result_meta: Style,
    pub result_keywords: Style,
    /// Patched over the selected result.
    pub result_selected: Style,

    pub badge_direct: Style,
    pub badge_semantic: Style,

    pub highlight_direct: Style,
    pub highlight_semantic: Style,

    pub status_text: Style,
    pub status_current_page: Style,
    pub flag_on: Style,
    pub flag_off: Style,
    pub error: Style,

    pub suggestion_history: Style,
    pub suggestion_semantic: Style,
}

impl Theme {
    /// Names accepted by [`Theme::by_name`], in cycling order.
    pub const NAMES: [&'static str; 2] = ["default", "gruvbox_dark"];

    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a configured theme name. Unknown names fall back to the
    /// default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "gruvbox" | "gruvbox_dark" => Self::load_gruvbox_dark(),
            "default" => Self::load_default(),
            other => {
                tracing::warn!(theme = other, "unknown theme, using default");
                Self::load_default()
            }
        }
    }

    /// The theme after this one in [`Theme::NAMES`].
    pub fn next(&self) -> Self {
        let idx = Self::NAMES.iter().position(|n| *n == self.name).unwrap_or(0);
        Self::by_name(Self::NAMES[(idx + 1) % Self::NAMES.len()])
    }

    /// Parse a theme from a TOML string. Unknown keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            name: raw.name,
            border_focused: raw.borders.focused.into_style(),
            border_unfocused: raw.borders.unfocused.into_style(),
            result_title: raw.results.title.into_style(),
            result_score: raw.results.score.into_style(),
            result_meta: raw.results.meta.into_style(),
            result_keywords: raw.results.keywords.into_style(),
            result_selected: raw.results.selected.into_style(),
            badge_direct: raw.badges.direct.into_style(),
            badge_semantic: raw.badges.semantic.into_style(),
            highlight_direct: raw.highlight.direct.into_style(),
            highlight_semantic: raw.highlight.semantic.into_style(),
            status_text: raw.status.text.into_style(),
            status_current_page: raw.status.current_page.into_style(),
            flag_on: raw.status.flag_on.into_style(),
            flag_off: raw.status.flag_off.into_style(),
            error: raw.status.error.into_style(),
            suggestion_history: raw.suggestions.history.into_style(),
            suggestion_semantic: raw.suggestions.semantic.into_style(),
        })
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border_unfocused
        }
    }

    pub fn highlight(&self, kind: HighlightKind) -> Style {
        match kind {
            HighlightKind::Direct => self.highlight_direct,
            HighlightKind::Semantic => self.highlight_semantic,
        }
    }

    pub fn suggestion(&self, kind: SuggestionKind) -> Style {
        match kind {
            SuggestionKind::History => self.suggestion_history,
            SuggestionKind::Semantic => self.suggestion_semantic,
        }
    }

    pub fn flag(&self, on: bool) -> Style {
        if on {
            self.flag_on
        } else {
            self.flag_off
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a colour name into a ratatui [`Color`].
///
/// Accepts named terminal colours (case-insensitive), `#rrggbb` and
/// `indexed:N`.
fn parse_color(s: &str) -> Option<Color> {
    match s.to_ascii_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "dark_gray" | "darkgray" | "dark_grey" | "darkgrey" => Some(Color::DarkGray),
        "light_red" => Some(Color::LightRed),
        "light_green" => Some(Color::LightGreen),
        "light_yellow" => Some(Color::LightYellow),
        "light_blue" => Some(Color::LightBlue),
        "light_magenta" => Some(Color::LightMagenta),
        "light_cyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        s if s.starts_with('#') && s.len() == 7 => {
            let r = u8::from_str_radix(&s[1..3], 16).ok()?;
            let g = u8::from_str_radix(&s[3..5], 16).ok()?;
            let b = u8::from_str_radix(&s[5..7], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        s if s.starts_with("indexed:") => s["indexed:".len()..].parse().ok().map(Color::Indexed),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
