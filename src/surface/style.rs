use crossterm::style;
use serde::{Deserialize, Serialize};

use crate::types::{Color, NamedColor, Severity, Style};

/// Every style the terminal surface draws with.
///
/// Built once (defaults, or the `styles` section of the config file) and
/// handed to the surface at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleRegistry {
    pub title: Style,
    pub heading: Style,
    pub text: Style,
    pub topic: Style,
    pub selected_topic: Style,
    pub hint: Style,
    pub input: Style,
    pub status_success: Style,
    pub status_fail: Style,
    pub status_idle: Style,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        StyleRegistry {
            title: Style::fg(NamedColor::Yellow).bold(),
            heading: Style::fg(NamedColor::Cyan).bold(),
            text: Style::default(),
            topic: Style::default(),
            selected_topic: Style {
                fg: Some(Color::Named(NamedColor::Black)),
                bg: Some(Color::Named(NamedColor::Cyan)),
                bold: true,
                dim: false,
            },
            hint: Style::fg(NamedColor::White).bold(),
            input: Style::fg(NamedColor::White),
            status_success: Style::fg(NamedColor::Green).bold(),
            status_fail: Style::fg(NamedColor::Red).bold(),
            status_idle: Style::default().dim(),
        }
    }
}

impl StyleRegistry {
    pub fn status(&self, severity: Severity) -> &Style {
        match severity {
            Severity::Success => &self.status_success,
            Severity::Fail => &self.status_fail,
            Severity::Idle => &self.status_idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_style_follows_severity() {
        let styles = StyleRegistry::default();
        assert_eq!(styles.status(Severity::Success), &styles.status_success);
        assert_eq!(styles.status(Severity::Fail), &styles.status_fail);
        assert_eq!(styles.status(Severity::Idle), &styles.status_idle);
    }

    #[test]
    fn content_style_carries_colors_and_attributes() {
        let cs = to_content_style(&StyleRegistry::default().selected_topic);
        assert_eq!(cs.foreground_color, Some(style::Color::Black));
        assert_eq!(cs.background_color, Some(style::Color::Cyan));
        assert!(cs.attributes.has(style::Attribute::Bold));
        assert!(!cs.attributes.has(style::Attribute::Dim));
    }

    #[test]
    fn partial_registry_keeps_defaults() {
        let styles: StyleRegistry =
            serde_json::from_str(r#"{"status_fail": {"fg": {"r": 255, "g": 0, "b": 0}}}"#)
                .unwrap();
        assert_eq!(
            styles.status_fail.fg,
            Some(Color::Rgb { r: 255, g: 0, b: 0 })
        );
        assert_eq!(styles.title, StyleRegistry::default().title);
    }
}
