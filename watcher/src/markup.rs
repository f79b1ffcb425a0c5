//! Inline `%{key=value,...}` directive parsing for watched log lines.

use owo_colors::{AnsiColors, DynColors};

/// Line colors recognized by the `color` directive.
///
/// The palette is closed; resolution is a total match, never open dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorTag {
    #[default]
    Black,
    Blue,
    Brown,
    Cyan,
    DarkGray,
    Gray,
    Green,
    LightGray,
    Magenta,
    Orange,
    Purple,
    Red,
    #[allow(dead_code)] // palette name kept; resolution remaps white to LightGray
    White,
    Yellow,
}

impl ColorTag {
    /// Resolve a case-folded color name, defaulting to black.
    ///
    /// `white` deliberately resolves to `LightGray` so text stays readable
    /// on the dark login-window backdrop.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name {
            "black" => Self::Black,
            "blue" => Self::Blue,
            "brown" => Self::Brown,
            "cyan" => Self::Cyan,
            "darkgray" => Self::DarkGray,
            "gray" => Self::Gray,
            "green" => Self::Green,
            "lightgray" | "white" => Self::LightGray,
            "magenta" => Self::Magenta,
            "orange" => Self::Orange,
            "purple" => Self::Purple,
            "red" => Self::Red,
            "yellow" => Self::Yellow,
            other => {
                tracing::debug!(color = other, "unknown color name, defaulting to black");
                Self::Black
            }
        }
    }

    /// Terminal color for this tag.
    #[must_use]
    pub fn ansi(self) -> DynColors {
        match self {
            Self::Black => DynColors::Ansi(AnsiColors::Black),
            Self::Blue => DynColors::Ansi(AnsiColors::Blue),
            Self::Brown => DynColors::Rgb(153, 102, 51),
            Self::Cyan => DynColors::Ansi(AnsiColors::Cyan),
            Self::DarkGray => DynColors::Rgb(85, 85, 85),
            Self::Gray => DynColors::Rgb(128, 128, 128),
            Self::Green => DynColors::Ansi(AnsiColors::Green),
            Self::LightGray => DynColors::Rgb(170, 170, 170),
            Self::Magenta => DynColors::Ansi(AnsiColors::Magenta),
            Self::Orange => DynColors::Rgb(255, 128, 0),
            Self::Purple => DynColors::Rgb(128, 0, 128),
            Self::Red => DynColors::Ansi(AnsiColors::Red),
            Self::White => DynColors::Ansi(AnsiColors::White),
            Self::Yellow => DynColors::Ansi(AnsiColors::Yellow),
        }
    }
}

/// Strip the first `%{...}` directive block from `line` and resolve its
/// `color` key.
///
/// Whitespace around tokens is ignored and keys/values are case-folded.
/// Unrecognized keys are logged and skipped. A block with no closing brace
/// is not a directive; the line renders literally with the default color.
/// Any further `%{...}` in the remainder stays literal.
#[must_use]
pub fn parse(line: &str) -> (String, ColorTag) {
    let Some(start) = line.find("%{") else {
        return (line.to_string(), ColorTag::default());
    };
    let Some(close) = line[start..].find('}') else {
        return (line.to_string(), ColorTag::default());
    };
    let close = start + close;

    let mut color = ColorTag::default();
    for directive in line[start + 2..close].split(',') {
        let Some((key, value)) = directive.split_once('=') else {
            tracing::debug!(directive = directive.trim(), "markup directive without '='");
            continue;
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_ascii_lowercase();
        match key.as_str() {
            "color" => color = ColorTag::resolve(&value),
            other => tracing::debug!(key = other, "unrecognized markup key"),
        }
    }

    let mut text = String::with_capacity(line.len());
    text.push_str(&line[..start]);
    text.push_str(&line[close + 1..]);
    (text, color)
}
