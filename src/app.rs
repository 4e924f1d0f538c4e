//! App: the interactive terminal session.
//!
//! Owns the game controller wired to the terminal surface and the audio
//! player, and drives it from terminal events until the player quits.

use std::io::{self, IsTerminal};

use anyhow::{Result, bail};
use crossterm::{cursor, event, execute, terminal};
use tracing::info;

use crate::audio::{Audio, AudioPlayer};
use crate::config::GameConfig;
use crate::game::{GameController, QueueOrder};
use crate::surface::{Action, MIN_SIZE, TerminalSurface};
use crate::words::WordTopics;

pub struct App {
    controller: GameController<TerminalSurface, AudioPlayer>,
}

impl App {
    pub fn new(config: GameConfig, topics: WordTopics, audio: AudioPlayer) -> Self {
        let surface = TerminalSurface::new(config.styles, config.key_bindings);
        let controller = GameController::new(
            topics,
            surface,
            audio,
            config.volumes,
            QueueOrder::from_shuffle_flag(config.shuffle),
        );
        Self { controller }
    }

    pub fn controller(&self) -> &GameController<TerminalSurface, AudioPlayer> {
        &self.controller
    }

    /// Run the game in the terminal.
    ///
    /// Refuses to start without an interactive terminal of at least
    /// `MIN_SIZE`. The terminal is restored on exit, even on error.
    pub fn run(&mut self) -> Result<()> {
        if !io::stdout().is_terminal() || !io::stdin().is_terminal() {
            bail!("An interactive terminal is required to play");
        }
        let (term_w, term_h) = terminal::size()?;
        let (need_w, need_h) = MIN_SIZE;
        if term_w < need_w || term_h < need_h {
            bail!("Terminal too small: need {need_w}x{need_h}, have {term_w}x{term_h}");
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.main_loop(&mut stdout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        let audio = self.controller.audio_mut();
        audio.stop();
        audio.stop_background();

        result
    }

    /// Begin a session: menu state, first screen.
    pub fn start(&mut self) {
        info!("game started");
        self.controller.start();
    }

    /// Feed one terminal event through surface and controller. Events meant
    /// for the game are dispatched here, so the result is never
    /// `Action::Dispatch`.
    pub fn step(&mut self, event: event::Event) -> Action {
        match self.controller.surface_mut().handle_event(event) {
            Action::Dispatch(ui_event) => {
                self.controller.dispatch(ui_event);
                Action::Redraw
            }
            other => other,
        }
    }

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.start();
        self.redraw(stdout)?;

        loop {
            match self.step(event::read()?) {
                Action::Quit => {
                    info!("quit requested");
                    break;
                }
                Action::Redraw => self.redraw(stdout)?,
                _ => {}
            }
        }

        Ok(())
    }

    fn redraw(&self, stdout: &mut io::Stdout) -> Result<()> {
        let (width, height) = terminal::size()?;
        self.controller.surface().render(stdout, width, height)
    }
}
