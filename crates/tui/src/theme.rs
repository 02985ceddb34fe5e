//! Color schemes for the picker form.

use ratatui::style::{Color, Modifier, Style};

/// Styles for every element of the form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Titles, borders and the footer bar.
    pub header: Style,
    /// The highlighted menu row.
    pub row_highlight: Style,
    /// Prompt label and the focused field.
    pub prompt: Style,
    /// Placeholders, hints and muted status text.
    pub empty: Style,
    /// Query matches inside menu rows.
    pub highlight: Style,
    /// Validity messages and load failures.
    pub error: Style,
}

impl Theme {
    #[must_use]
    pub fn empty_style(&self) -> Style {
        self.empty
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        self.error
    }

    /// Border style for a field, brighter when it has focus.
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.prompt
        } else {
            Style::new().fg(self.header.fg.unwrap_or(Color::Reset))
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        default_theme()
    }
}

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(15, 23, 42)),
    row_highlight: Style::new()
        .bg(Color::Rgb(30, 41, 59))
        .fg(Color::Rgb(250, 204, 21)),
    prompt: Style::new().fg(Color::LightCyan),
    empty: Style::new().fg(Color::DarkGray),
    highlight: Style::new()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    error: Style::new().fg(Color::LightRed),
};

pub const LIGHT: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(226, 232, 240)),
    row_highlight: Style::new()
        .bg(Color::Rgb(200, 200, 200))
        .fg(Color::Rgb(120, 120, 0)),
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
    empty: Style::new().fg(Color::Rgb(100, 100, 100)),
    highlight: Style::new()
        .fg(Color::Rgb(120, 120, 0))
        .add_modifier(Modifier::BOLD),
    error: Style::new().fg(Color::Rgb(180, 30, 30)),
};

const BUILTINS: &[(&str, Theme)] = &[("slate", SLATE), ("light", LIGHT)];

#[must_use]
pub fn default_theme() -> Theme {
    SLATE
}

/// Look up a built-in theme, ignoring case.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    BUILTINS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name.trim()))
        .map(|(_, theme)| *theme)
}

#[must_use]
pub fn names() -> Vec<&'static str> {
    BUILTINS.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(by_name("Light"), Some(LIGHT));
        assert_eq!(by_name(" slate "), Some(SLATE));
        assert!(by_name("solarized").is_none());
    }

    #[test]
    fn names_list_the_default_first() {
        assert_eq!(names(), ["slate", "light"]);
        assert_eq!(default_theme(), SLATE);
    }
}
