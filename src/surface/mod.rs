//! Presentation surface: the four game screens drawn in the terminal.
//!
//! The surface holds only what it needs to draw: which screen is visible,
//! the text in the input line, the status message and so on. It never makes
//! game decisions; key presses are translated into `UiEvent`s for the
//! controller (see `input`), and the controller drives it back through the
//! `Surface` trait.

mod input;
mod menubar;
mod style;

use std::io::Write;

use anyhow::Result;
use crossterm::{cursor, queue, style as ct, terminal};

use crate::config::KeyBindings;
use crate::types::{Progress, Severity, Topic};

pub use input::Action;
pub use style::{StyleRegistry, to_content_style};

/// Render commands the game controller issues.
pub trait Surface {
    fn show_menu(&mut self, topics: &[Topic]);
    fn show_game(&mut self, topic: Topic, word_length: usize, progress: Progress);
    /// Show one blank per character of `word`; nothing else about it leaks.
    fn set_word_hint(&mut self, word: &str);
    fn show_congrats(&mut self, topic: Topic);
    fn set_input(&mut self, value: &str);
    fn set_status(&mut self, message: &str, severity: Severity);
}

/// Exactly one screen is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Topic,
    Game,
    Congrats,
}

/// Smallest terminal the screens fit in (columns, rows).
pub const MIN_SIZE: (u16, u16) = (40, 12);

const MENU_PROMPT: &str = "Choose a topic to start.";

pub fn mask(word: &str) -> String {
    word.chars().map(|_| " _ ").collect()
}

/// One centred line of screen content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub style: crate::types::Style,
}

impl Line {
    fn new(text: impl Into<String>, style: &crate::types::Style) -> Self {
        Line {
            text: text.into(),
            style: style.clone(),
        }
    }

    fn blank() -> Self {
        Line {
            text: String::new(),
            style: crate::types::Style::default(),
        }
    }
}

pub struct TerminalSurface {
    screen: Screen,
    topics: Vec<Topic>,
    cursor: usize,
    topic: Option<Topic>,
    word_length: usize,
    progress: Option<Progress>,
    hint: String,
    input: String,
    status: String,
    severity: Severity,
    styles: StyleRegistry,
    bindings: KeyBindings,
}

impl TerminalSurface {
    pub fn new(styles: StyleRegistry, bindings: KeyBindings) -> Self {
        Self {
            screen: Screen::Home,
            topics: Vec::new(),
            cursor: 0,
            topic: None,
            word_length: 0,
            progress: None,
            hint: String::new(),
            input: String::new(),
            status: String::new(),
            severity: Severity::Idle,
            styles,
            bindings,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> (&str, Severity) {
        (&self.status, self.severity)
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Index of the highlighted topic on the topic screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    /// Content lines of the visible screen, top to bottom.
    pub fn lines(&self) -> Vec<Line> {
        let s = &self.styles;
        match self.screen {
            Screen::Home => vec![
                Line::new("S P E L L I N G   M A S T E R", &s.title),
                Line::blank(),
                Line::new("Listen to the word, then spell it.", &s.text),
                Line::blank(),
                Line::new(format!("Press {} to play", self.bindings.submit), &s.heading),
            ],
            Screen::Topic => {
                let mut lines = vec![Line::new("CHOOSE TOPIC", &s.heading), Line::blank()];
                for (i, topic) in self.topics.iter().enumerate() {
                    let style = if i == self.cursor {
                        &s.selected_topic
                    } else {
                        &s.topic
                    };
                    lines.push(Line::new(format!("  {}. {:<8}  ", i + 1, topic.label()), style));
                }
                lines.push(Line::blank());
                lines.push(Line::new(self.status.clone(), s.status(self.severity)));
                lines
            }
            Screen::Game => {
                let topic = self.topic.map(Topic::label).unwrap_or_default();
                let progress = self
                    .progress
                    .map(|p| format!("Word {p}  ({} letters)", self.word_length))
                    .unwrap_or_default();
                vec![
                    Line::new(format!("Topic: {topic}"), &s.heading),
                    Line::new(progress, &s.text),
                    Line::blank(),
                    Line::new(self.hint.clone(), &s.hint),
                    Line::blank(),
                    Line::new(format!("> {}_", self.input), &s.input),
                    Line::blank(),
                    Line::new(self.status.clone(), s.status(self.severity)),
                ]
            }
            Screen::Congrats => {
                let topic = self.topic.map(Topic::label).unwrap_or_default();
                vec![
                    Line::new("CONGRATULATIONS!", &s.title),
                    Line::blank(),
                    Line::new(format!("You finished the {topic} stage!"), &s.text),
                    Line::blank(),
                    Line::new(
                        format!(
                            "{} play again    {} home",
                            self.bindings.submit, self.bindings.home
                        ),
                        &s.heading,
                    ),
                ]
            }
        }
    }

    /// Draw the whole surface: menu bar on the first row, screen content
    /// centred below it.
    pub fn render<W: Write>(&self, out: &mut W, width: u16, height: u16) -> Result<()> {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;

        let items = menubar::screen_items(self.screen, &self.bindings, self.topics.len());
        menubar::render_menubar(out, &items)?;

        let lines = self.lines();
        let body_top = 1u16;
        let body_height = height.saturating_sub(body_top);
        let top = body_top + body_height.saturating_sub(lines.len() as u16) / 2;

        for (i, line) in lines.iter().enumerate() {
            let y = top + i as u16;
            if y >= height {
                break;
            }
            if line.text.is_empty() {
                continue;
            }
            let len = line.text.chars().count() as u16;
            let x = width.saturating_sub(len) / 2;
            let cs = to_content_style(&line.style);
            queue!(
                out,
                cursor::MoveTo(x, y),
                ct::PrintStyledContent(ct::StyledContent::new(cs, line.text.as_str())),
            )?;
        }

        out.flush()?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn show_menu(&mut self, topics: &[Topic]) {
        self.topics = topics.to_vec();
        self.cursor = 0;
        self.topic = None;
        self.progress = None;
        self.hint.clear();
        self.screen = Screen::Home;
        self.set_status(MENU_PROMPT, Severity::Idle);
    }

    fn show_game(&mut self, topic: Topic, word_length: usize, progress: Progress) {
        self.screen = Screen::Game;
        self.topic = Some(topic);
        self.word_length = word_length;
        self.progress = Some(progress);
        self.set_input("");
        self.set_status("Listen and type the word.", Severity::Idle);
    }

    fn set_word_hint(&mut self, word: &str) {
        self.hint = mask(word);
    }

    fn show_congrats(&mut self, topic: Topic) {
        self.topic = Some(topic);
        self.progress = None;
        self.hint.clear();
        self.screen = Screen::Congrats;
    }

    fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
    }

    fn set_status(&mut self, message: &str, severity: Severity) {
        self.status = message.to_string();
        self.severity = severity;
    }
}
