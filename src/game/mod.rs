//! Game flow controller: the state machine behind the screens.
//!
//! The controller owns `GameState` and is the only thing that changes it.
//! It reacts to `UiEvent`s from the surface and answers with render commands
//! (`Surface`) and playback commands (`Audio`). Every operation is
//! synchronous; audio is fire-and-forget.

mod queue;
mod state;

use tracing::{debug, info};

use crate::audio::Audio;
use crate::config::BackgroundVolumes;
use crate::surface::Surface;
use crate::types::{BackgroundMode, Severity, Topic};
use crate::words::WordTopics;

pub use queue::{QueueOrder, build_queue};
pub use state::{GameState, Mode};

/// Input events emitted by the presentation surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TopicChosen(Topic),
    GuessSubmitted(String),
    InputChanged(String),
    ReplayRequested,
    HomeRequested,
    MuteToggled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Empty,
    Correct,
    Incorrect,
}

/// Exact comparison of the trimmed, lowercased guess with the lowercased
/// target. No partial credit.
pub fn evaluate_guess(input: &str, target: &str) -> GuessOutcome {
    let guess = input.trim().to_lowercase();
    if guess.is_empty() {
        GuessOutcome::Empty
    } else if guess == target.to_lowercase() {
        GuessOutcome::Correct
    } else {
        GuessOutcome::Incorrect
    }
}

pub struct GameController<S, A> {
    topics: WordTopics,
    surface: S,
    audio: A,
    volumes: BackgroundVolumes,
    order: QueueOrder,
    state: GameState,
}

impl<S: Surface, A: Audio> GameController<S, A> {
    pub fn new(
        topics: WordTopics,
        surface: S,
        audio: A,
        volumes: BackgroundVolumes,
        order: QueueOrder,
    ) -> Self {
        Self {
            topics,
            surface,
            audio,
            volumes,
            order,
            state: GameState::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Single entry point for surface events.
    pub fn dispatch(&mut self, event: UiEvent) {
        debug!(?event, "dispatch");
        match event {
            UiEvent::TopicChosen(topic) => self.select_topic(topic),
            UiEvent::GuessSubmitted(value) => {
                self.submit_guess(&value);
            }
            UiEvent::InputChanged(_) => self.on_input_changed(),
            UiEvent::ReplayRequested => self.replay(),
            UiEvent::HomeRequested => self.go_home(),
            UiEvent::MuteToggled => self.toggle_mute(),
        }
    }

    /// Back to the initial menu state.
    pub fn start(&mut self) {
        self.state.reset();
        self.set_background_mode(BackgroundMode::Menu);
        self.surface.show_menu(&Topic::ALL);
    }

    pub fn select_topic(&mut self, topic: Topic) {
        let queue = build_queue(self.topics.words(topic), self.order, &mut rand::thread_rng());
        if self.state.begin(topic, queue).is_none() {
            info!(%topic, "topic has no words");
            self.surface
                .set_status("No words found for this topic.", Severity::Fail);
            return;
        }
        info!(%topic, words = self.state.words_queue().len(), "topic selected");
        self.show_game_view();
        self.set_background_mode(BackgroundMode::Game);
        self.play_current_word();
    }

    /// Evaluate a guess against the current word. Returns `None` when no word
    /// is in play.
    pub fn submit_guess(&mut self, raw: &str) -> Option<GuessOutcome> {
        let outcome = evaluate_guess(raw, self.state.current_word()?);
        debug!(?outcome, index = self.state.word_index(), "guess");
        match outcome {
            GuessOutcome::Empty => {
                self.surface.set_status("Type the word first.", Severity::Fail);
            }
            GuessOutcome::Correct => {
                self.audio.play_success();
                self.surface
                    .set_status("Correct! Loading next word...", Severity::Success);
                self.advance();
            }
            GuessOutcome::Incorrect => {
                self.audio.play_fail();
                self.surface.set_status("Incorrect. Try again.", Severity::Fail);
            }
        }
        Some(outcome)
    }

    fn advance(&mut self) {
        if self.state.advance().is_some() {
            self.show_game_view();
            self.play_current_word();
            return;
        }

        // Queue exhausted.
        let Some(topic) = self.state.topic() else {
            return;
        };
        info!(%topic, "topic complete");
        self.surface.show_congrats(topic);
        self.set_background_mode(BackgroundMode::Congrats);
    }

    pub fn replay(&mut self) {
        if self.state.current_word().is_none() {
            return;
        }
        self.surface.set_status("Replaying audio...", Severity::Idle);
        self.play_current_word();
        self.surface
            .set_status("Audio playing. Type what you hear.", Severity::Idle);
    }

    pub fn go_home(&mut self) {
        self.audio.stop();
        self.set_background_mode(BackgroundMode::Menu);
        self.start();
    }

    pub fn on_input_changed(&mut self) {
        self.surface.set_status("Keep typing.", Severity::Idle);
    }

    pub fn toggle_mute(&mut self) {
        let message = if self.audio.toggle_mute() {
            "Sound muted."
        } else {
            "Sound on."
        };
        self.surface.set_status(message, Severity::Idle);
    }

    fn show_game_view(&mut self) {
        let (Some(topic), Some(word), Some(progress)) = (
            self.state.topic(),
            self.state.current_word(),
            self.state.progress(),
        ) else {
            return;
        };
        self.surface.show_game(topic, word.chars().count(), progress);
        self.surface.set_word_hint(word);
    }

    fn play_current_word(&mut self) {
        if let Some(word) = self.state.current_word() {
            self.audio.play_word(word);
        }
    }

    fn set_background_mode(&mut self, mode: BackgroundMode) {
        self.audio.start_background();
        self.audio.set_background_volume(self.volumes.volume(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Progress;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        ShowMenu(Vec<Topic>),
        ShowGame(Topic, usize, Progress),
        Hint(String),
        Congrats(Topic),
        Input(String),
        Status(String, Severity),
        PlayWord(String),
        Success,
        Fail,
        StartBackground,
        BackgroundVolume(f32),
        StopBackground,
        Stop,
        Mute(bool),
    }

    #[derive(Default)]
    struct FakeSurface {
        calls: Vec<Call>,
    }

    #[derive(Default)]
    struct FakeAudio {
        calls: Vec<Call>,
        muted: bool,
    }

    impl Surface for FakeSurface {
        fn show_menu(&mut self, topics: &[Topic]) {
            self.calls.push(Call::ShowMenu(topics.to_vec()));
        }
        fn show_game(&mut self, topic: Topic, word_length: usize, progress: Progress) {
            self.calls.push(Call::ShowGame(topic, word_length, progress));
        }
        fn set_word_hint(&mut self, word: &str) {
            self.calls.push(Call::Hint(word.into()));
        }
        fn show_congrats(&mut self, topic: Topic) {
            self.calls.push(Call::Congrats(topic));
        }
        fn set_input(&mut self, value: &str) {
            self.calls.push(Call::Input(value.into()));
        }
        fn set_status(&mut self, message: &str, severity: Severity) {
            self.calls.push(Call::Status(message.into(), severity));
        }
    }

    impl Audio for FakeAudio {
        fn play_word(&mut self, word: &str) {
            self.calls.push(Call::PlayWord(word.into()));
        }
        fn play_success(&mut self) {
            self.calls.push(Call::Success);
        }
        fn play_fail(&mut self) {
            self.calls.push(Call::Fail);
        }
        fn start_background(&mut self) {
            self.calls.push(Call::StartBackground);
        }
        fn set_background_volume(&mut self, level: f32) {
            self.calls.push(Call::BackgroundVolume(level));
        }
        fn stop_background(&mut self) {
            self.calls.push(Call::StopBackground);
        }
        fn stop(&mut self) {
            self.calls.push(Call::Stop);
        }
        fn toggle_mute(&mut self) -> bool {
            self.muted = !self.muted;
            self.calls.push(Call::Mute(self.muted));
            self.muted
        }
    }

    type Controller = GameController<FakeSurface, FakeAudio>;

    fn controller(fruits: &[&str]) -> Controller {
        let topics = WordTopics {
            fruits: fruits.iter().map(|w| w.to_string()).collect(),
            career: Vec::new(),
            random: vec!["Ice Cream".into()],
        };
        let mut controller = GameController::new(
            topics,
            FakeSurface::default(),
            FakeAudio::default(),
            BackgroundVolumes::default(),
            QueueOrder::Preserve,
        );
        controller.start();
        controller.surface_mut().calls.clear();
        controller.audio_mut().calls.clear();
        controller
    }

    fn surface_calls(c: &mut Controller) -> Vec<Call> {
        std::mem::take(&mut c.surface_mut().calls)
    }

    fn audio_calls(c: &mut Controller) -> Vec<Call> {
        std::mem::take(&mut c.audio_mut().calls)
    }

    #[test]
    fn start_shows_menu_with_menu_background() {
        let mut c = GameController::new(
            WordTopics::default(),
            FakeSurface::default(),
            FakeAudio::default(),
            BackgroundVolumes::default(),
            QueueOrder::Preserve,
        );
        c.start();
        assert_eq!(surface_calls(&mut c), vec![Call::ShowMenu(Topic::ALL.to_vec())]);
        assert_eq!(
            audio_calls(&mut c),
            vec![Call::StartBackground, Call::BackgroundVolume(0.32)]
        );
        assert_eq!(c.state().mode(), Mode::Menu);
    }

    #[test]
    fn selecting_a_topic_copies_its_list_in_order() {
        let mut c = controller(&["apple", "banana", "cherry"]);
        c.select_topic(Topic::Fruits);

        let state = c.state();
        assert_eq!(state.words_queue(), ["apple", "banana", "cherry"]);
        assert_eq!(state.word_index(), 0);
        assert_eq!(state.current_word(), Some("apple"));
        assert_eq!(state.mode(), Mode::Playing);

        assert_eq!(
            surface_calls(&mut c),
            vec![
                Call::ShowGame(Topic::Fruits, 5, Progress { current: 1, total: 3 }),
                Call::Hint("apple".into()),
            ]
        );
        assert_eq!(
            audio_calls(&mut c),
            vec![
                Call::StartBackground,
                Call::BackgroundVolume(0.08),
                Call::PlayWord("apple".into()),
            ]
        );
    }

    #[test]
    fn empty_topic_reports_and_stays_in_menu() {
        let mut c = controller(&["apple"]);
        c.dispatch(UiEvent::TopicChosen(Topic::Career));

        assert_eq!(c.state().current_word(), None);
        assert_eq!(c.state().mode(), Mode::Menu);
        assert_eq!(
            surface_calls(&mut c),
            vec![Call::Status(
                "No words found for this topic.".into(),
                Severity::Fail
            )]
        );
        assert!(audio_calls(&mut c).is_empty());
    }

    #[test]
    fn two_word_scenario_runs_to_congratulations() {
        let mut c = controller(&["apple", "banana"]);
        c.dispatch(UiEvent::TopicChosen(Topic::Fruits));
        assert_eq!(c.state().words_queue(), ["apple", "banana"]);

        assert_eq!(c.submit_guess("Apple"), Some(GuessOutcome::Correct));
        assert_eq!(c.state().word_index(), 1);
        assert_eq!(c.state().current_word(), Some("banana"));

        assert_eq!(c.submit_guess("pear"), Some(GuessOutcome::Incorrect));
        assert_eq!(c.state().word_index(), 1);
        assert_eq!(c.state().current_word(), Some("banana"));

        surface_calls(&mut c);
        audio_calls(&mut c);
        assert_eq!(c.submit_guess("banana"), Some(GuessOutcome::Correct));
        assert_eq!(c.state().word_index(), 2);
        assert_eq!(c.state().current_word(), None);
        assert_eq!(c.state().mode(), Mode::Complete);

        assert_eq!(
            surface_calls(&mut c),
            vec![
                Call::Status("Correct! Loading next word...".into(), Severity::Success),
                Call::Congrats(Topic::Fruits),
            ]
        );
        assert_eq!(
            audio_calls(&mut c),
            vec![
                Call::Success,
                Call::StartBackground,
                Call::BackgroundVolume(0.26),
            ]
        );
    }

    #[test]
    fn correct_guess_moves_to_next_word_view() {
        let mut c = controller(&["apple", "banana"]);
        c.select_topic(Topic::Fruits);
        surface_calls(&mut c);
        audio_calls(&mut c);

        c.dispatch(UiEvent::GuessSubmitted("  APPLE ".into()));
        assert_eq!(
            surface_calls(&mut c),
            vec![
                Call::Status("Correct! Loading next word...".into(), Severity::Success),
                Call::ShowGame(Topic::Fruits, 6, Progress { current: 2, total: 2 }),
                Call::Hint("banana".into()),
            ]
        );
        assert_eq!(
            audio_calls(&mut c),
            vec![Call::Success, Call::PlayWord("banana".into())]
        );
    }

    #[test]
    fn wrong_guesses_never_change_state() {
        let mut c = controller(&["apple", "banana"]);
        c.select_topic(Topic::Fruits);
        let before = c.state().clone();
        audio_calls(&mut c);

        for guess in ["aple", "apples", "banana", "a p p l e"] {
            assert_eq!(c.submit_guess(guess), Some(GuessOutcome::Incorrect));
            assert_eq!(*c.state(), before);
        }
        assert_eq!(audio_calls(&mut c), vec![Call::Fail; 4]);
    }

    #[test]
    fn empty_guess_is_rejected_without_sound() {
        let mut c = controller(&["apple"]);
        c.select_topic(Topic::Fruits);
        surface_calls(&mut c);
        audio_calls(&mut c);

        assert_eq!(c.submit_guess("   "), Some(GuessOutcome::Empty));
        assert_eq!(
            surface_calls(&mut c),
            vec![Call::Status("Type the word first.".into(), Severity::Fail)]
        );
        assert!(audio_calls(&mut c).is_empty());
        assert_eq!(c.state().word_index(), 0);
    }

    #[test]
    fn guess_without_word_in_play_is_ignored() {
        let mut c = controller(&["apple"]);
        assert_eq!(c.submit_guess("apple"), None);
        assert!(surface_calls(&mut c).is_empty());
    }

    #[test]
    fn replay_reports_and_replays_current_word() {
        let mut c = controller(&["apple"]);
        c.select_topic(Topic::Fruits);
        surface_calls(&mut c);
        audio_calls(&mut c);

        c.dispatch(UiEvent::ReplayRequested);
        assert_eq!(
            surface_calls(&mut c),
            vec![
                Call::Status("Replaying audio...".into(), Severity::Idle),
                Call::Status("Audio playing. Type what you hear.".into(), Severity::Idle),
            ]
        );
        assert_eq!(audio_calls(&mut c), vec![Call::PlayWord("apple".into())]);
        assert_eq!(c.state().word_index(), 0);
    }

    #[test]
    fn replay_without_word_does_nothing() {
        let mut c = controller(&["apple"]);
        c.replay();
        assert!(surface_calls(&mut c).is_empty());
        assert!(audio_calls(&mut c).is_empty());
    }

    #[test]
    fn input_change_resets_status_only() {
        let mut c = controller(&["apple"]);
        c.select_topic(Topic::Fruits);
        let before = c.state().clone();
        surface_calls(&mut c);

        c.dispatch(UiEvent::InputChanged("ap".into()));
        assert_eq!(
            surface_calls(&mut c),
            vec![Call::Status("Keep typing.".into(), Severity::Idle)]
        );
        assert_eq!(*c.state(), before);
    }

    #[test]
    fn going_home_resets_from_any_mode() {
        let mut c = controller(&["apple", "banana"]);

        // Mid-topic.
        c.select_topic(Topic::Fruits);
        c.submit_guess("apple");
        c.dispatch(UiEvent::HomeRequested);
        assert_eq!(*c.state(), GameState::default());

        // After completion.
        c.select_topic(Topic::Random);
        c.submit_guess("ice cream");
        assert_eq!(c.state().mode(), Mode::Complete);
        audio_calls(&mut c);
        surface_calls(&mut c);
        c.go_home();
        assert_eq!(c.state().mode(), Mode::Menu);
        assert_eq!(c.state().word_index(), 0);
        assert_eq!(c.state().topic(), None);

        assert_eq!(
            audio_calls(&mut c),
            vec![
                Call::Stop,
                Call::StartBackground,
                Call::BackgroundVolume(0.32),
                Call::StartBackground,
                Call::BackgroundVolume(0.32),
            ]
        );
        assert_eq!(surface_calls(&mut c), vec![Call::ShowMenu(Topic::ALL.to_vec())]);
    }

    #[test]
    fn mute_toggle_reports_state() {
        let mut c = controller(&["apple"]);
        c.dispatch(UiEvent::MuteToggled);
        c.dispatch(UiEvent::MuteToggled);
        assert_eq!(
            surface_calls(&mut c),
            vec![
                Call::Status("Sound muted.".into(), Severity::Idle),
                Call::Status("Sound on.".into(), Severity::Idle),
            ]
        );
    }

    #[test]
    fn shuffled_queue_keeps_every_word() {
        let words = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let mut c = controller(&words);
        c.order = QueueOrder::Shuffle;
        c.select_topic(Topic::Fruits);

        let mut queue = c.state().words_queue().to_vec();
        assert_eq!(c.state().current_word(), Some(queue[0].as_str()));
        queue.sort();
        assert_eq!(queue, words);
    }

    #[test]
    fn evaluate_guess_ignores_case_and_outer_whitespace_only() {
        assert_eq!(evaluate_guess("Ice Cream", "ice cream"), GuessOutcome::Correct);
        assert_eq!(evaluate_guess(" ice cream\t", "Ice Cream"), GuessOutcome::Correct);
        assert_eq!(evaluate_guess("ice  cream", "ice cream"), GuessOutcome::Incorrect);
        assert_eq!(evaluate_guess("icecream", "ice cream"), GuessOutcome::Incorrect);
        assert_eq!(evaluate_guess("", "ice cream"), GuessOutcome::Empty);
    }
}
