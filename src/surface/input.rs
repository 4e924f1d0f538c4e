use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::UiEvent;
use crate::types::Severity;

use super::{MENU_PROMPT, Screen, Surface, TerminalSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Continue,
    Redraw,
    Dispatch(UiEvent),
    Quit,
}

impl TerminalSurface {
    /// Translate one terminal event. Changes that only concern the surface
    /// (topic cursor, text in the input line) are applied here; anything the
    /// game must know about comes back as `Action::Dispatch`.
    pub fn handle_event(&mut self, event: Event) -> Action {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Resize(_, _) => Action::Redraw,
            _ => Action::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Action {
        // Global shortcuts: work from any screen
        if self.bindings.quit.matches(&key) {
            return Action::Quit;
        }
        if self.bindings.mute.matches(&key) {
            return Action::Dispatch(UiEvent::MuteToggled);
        }

        match self.screen {
            Screen::Home => self.handle_home(key),
            Screen::Topic => self.handle_topic(key),
            Screen::Game => self.handle_game(key),
            Screen::Congrats => self.handle_congrats(key),
        }
    }

    fn handle_home(&mut self, key: KeyEvent) -> Action {
        if self.bindings.submit.matches(&key) {
            self.screen = Screen::Topic;
            self.cursor = 0;
            self.set_status(MENU_PROMPT, Severity::Idle);
            return Action::Redraw;
        }
        if self.bindings.home.matches(&key) || is_plain_char(&key, 'q') {
            return Action::Quit;
        }
        Action::Continue
    }

    fn handle_topic(&mut self, key: KeyEvent) -> Action {
        let count = self.topics.len();
        if count == 0 {
            return if self.bindings.home.matches(&key) {
                Action::Dispatch(UiEvent::HomeRequested)
            } else {
                Action::Continue
            };
        }

        if self.bindings.move_up.matches(&key) {
            self.cursor = if self.cursor == 0 { count - 1 } else { self.cursor - 1 };
            return Action::Redraw;
        }
        if self.bindings.move_down.matches(&key) {
            self.cursor = (self.cursor + 1) % count;
            return Action::Redraw;
        }
        if self.bindings.submit.matches(&key) {
            return Action::Dispatch(UiEvent::TopicChosen(self.topics[self.cursor]));
        }
        if self.bindings.home.matches(&key) {
            return Action::Dispatch(UiEvent::HomeRequested);
        }
        if let Some(n) = plain_char(&key).and_then(|c| c.to_digit(10)) {
            let n = n as usize;
            if (1..=count).contains(&n) {
                self.cursor = n - 1;
                return Action::Dispatch(UiEvent::TopicChosen(self.topics[self.cursor]));
            }
        }
        Action::Continue
    }

    fn handle_game(&mut self, key: KeyEvent) -> Action {
        if self.bindings.submit.matches(&key) {
            return Action::Dispatch(UiEvent::GuessSubmitted(self.input.clone()));
        }
        if self.bindings.home.matches(&key) {
            return Action::Dispatch(UiEvent::HomeRequested);
        }
        if self.bindings.replay.matches(&key) {
            return Action::Dispatch(UiEvent::ReplayRequested);
        }
        if self.bindings.clear.matches(&key) {
            self.input.clear();
            return Action::Dispatch(UiEvent::InputChanged(String::new()));
        }

        match key.code {
            KeyCode::Backspace => {
                if self.input.pop().is_some() {
                    Action::Dispatch(UiEvent::InputChanged(self.input.clone()))
                } else {
                    Action::Continue
                }
            }
            KeyCode::Char(c) if plain_char(&key).is_some() => {
                self.input.push(c);
                Action::Dispatch(UiEvent::InputChanged(self.input.clone()))
            }
            _ => Action::Continue,
        }
    }

    fn handle_congrats(&mut self, key: KeyEvent) -> Action {
        // "Play again" and "home" both lead back to the menu.
        if self.bindings.submit.matches(&key) || self.bindings.home.matches(&key) {
            return Action::Dispatch(UiEvent::HomeRequested);
        }
        Action::Continue
    }
}

/// The typed character, unless Ctrl or Alt is held.
fn plain_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

fn is_plain_char(key: &KeyEvent, expected: char) -> bool {
    plain_char(key) == Some(expected)
}
