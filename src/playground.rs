//! Interactive playground host.
//!
//! The [`Screen`] is the host display: an output panel plus two overlays.
//! Every effect is bound to one of its regions through a target function
//! and driven by a [`Scheduler<Screen>`]. The binary feeds `execute` with
//! submitted lines and `advance` with measured elapsed time; tests do the
//! same with fixed numbers.

use anyhow::Result;
use log::{debug, info, warn};

use crate::core::{
    ascii_box, Countdown, EffectHandle, Finished, Glitch, RandomSource, Report, Scheduler,
    Scroll, SimpleRng, Surface, TextBuffer, TimedMutator, Typing,
};
use crate::runtime::{play_sound, Config, EffectJournal, JournalRecord};
use crate::term::ScreenSnapshot;
use crate::types::Command;

pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to the Cybermaint Toolkit Playground!",
    "Type 'help' for a list of available commands.",
];
pub const TYPING_TEXT: &str = "Welcome to the Cybermaint Toolkit!";
pub const TYPING_DONE: &str = "\nTyping animation complete.";
pub const GLITCH_NOTICE: &str = "Applying glitch effect...";
pub const SOUND_NOTICE: &str =
    "Playing sound... (Make sure you have a sound file and proper audio setup)";
pub const COUNTDOWN_NOTICE: &str = "Starting countdown...";
pub const COUNTDOWN_DONE: &str = "Countdown finished!";
pub const BOX_TEXT: &str = "Welcome to Cybermaint\nEnjoy your stay, operator.";
pub const SCROLL_LINES: [&str; 6] = [
    "Initializing cyberdeck...",
    "Connecting to the grid...",
    "Bypassing ICE...",
    "Accessing restricted data...",
    "Download complete.",
    "Covering tracks...",
];
pub const HELP_TEXT: &str =
    "Available commands: type, glitch, sound, countdown, box, scroll, help, clear, exit";
pub const UNKNOWN_HINT: &str = "Type 'help' for a list of commands.";

/// Host display: the output panel and the two overlays.
#[derive(Debug, Default)]
pub struct Screen {
    pub output: TextBuffer,
    pub feed: TextBuffer,
    pub countdown: TextBuffer,
    pub feed_visible: bool,
    pub countdown_visible: bool,
    overlays_changed: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target: the main output panel.
    pub fn output(screen: &mut Screen) -> &mut dyn Surface {
        &mut screen.output
    }

    /// Target: the centered scroll overlay.
    pub fn feed(screen: &mut Screen) -> &mut dyn Surface {
        &mut screen.feed
    }

    /// Target: the countdown overlay.
    pub fn countdown(screen: &mut Screen) -> &mut dyn Surface {
        &mut screen.countdown
    }

    pub fn show_feed(&mut self) {
        self.feed.clear();
        self.feed_visible = true;
        self.overlays_changed = true;
    }

    pub fn show_countdown(&mut self) {
        self.countdown.clear();
        self.countdown_visible = true;
        self.overlays_changed = true;
    }

    pub fn hide_overlays(&mut self) {
        self.feed_visible = false;
        self.countdown_visible = false;
        self.overlays_changed = true;
    }

    /// True if any region asked for a redraw since the last call.
    pub fn take_redraw(&mut self) -> bool {
        // No short-circuit: every region's flag must be drained.
        let output = self.output.take_redraw();
        let feed = self.feed.take_redraw();
        let countdown = self.countdown.take_redraw();
        let overlays = std::mem::take(&mut self.overlays_changed);
        output | feed | countdown | overlays
    }

    pub fn snapshot<'a>(&'a self, input: &'a str, cursor: usize) -> ScreenSnapshot<'a> {
        ScreenSnapshot {
            output: self.output.content(),
            feed: self.feed_visible.then(|| self.feed.content()),
            countdown: self.countdown_visible.then(|| self.countdown.content()),
            input,
            cursor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

pub struct Playground {
    screen: Screen,
    scheduler: Scheduler<Screen>,
    config: Config,
    rng: SimpleRng,
    journal: Option<EffectJournal>,
    countdown: Option<EffectHandle>,
    scroll: Option<EffectHandle>,
}

impl Playground {
    /// Build a playground and print the welcome lines.
    pub fn new(config: Config) -> Self {
        let mut screen = Screen::new();
        for line in WELCOME_LINES {
            screen.output.append_line(line);
        }
        Self {
            screen,
            scheduler: Scheduler::new(),
            rng: SimpleRng::new(config.seed),
            config,
            journal: None,
            countdown: None,
            scroll: None,
        }
    }

    /// Like [`Playground::new`], also opening the journal the config names.
    pub fn from_config(config: Config) -> Result<Self> {
        let journal = match &config.journal_path {
            Some(path) => Some(EffectJournal::open(path)?),
            None => None,
        };
        let mut playground = Self::new(config);
        playground.journal = journal;
        Ok(playground)
    }

    pub fn with_journal(mut self, journal: EffectJournal) -> Self {
        self.journal = Some(journal);
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of running effects.
    pub fn active_effects(&self) -> usize {
        self.scheduler.active()
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.scheduler.next_due_ms()
    }

    /// Run one submitted command line.
    pub fn execute(&mut self, line: &str) -> Outcome {
        let command = Command::from_str(line);
        debug!("command {:?}", command);

        match command {
            Command::Type => {
                let typing = Typing::new(TYPING_TEXT)
                    .with_interval_ms(self.config.typing_interval_ms);
                let mutator = TimedMutator::new(typing, Screen::output)
                    .on_complete(|screen: &mut Screen| screen.output.append_line(TYPING_DONE));
                self.spawn(mutator);
            }
            Command::Glitch => {
                // Restoration writes back the panel as it was here, so lines
                // appended while the glitch runs (help, box, completion
                // messages) are lost when it ends.
                self.screen.output.append_line(GLITCH_NOTICE);
                let glitch = Glitch::new(SimpleRng::new(self.rng.next_u32()))
                    .with_duration_ms(self.config.glitch_duration_ms);
                self.spawn(TimedMutator::new(glitch, Screen::output));
            }
            Command::Sound => {
                self.screen.output.append_line(SOUND_NOTICE);
                play_sound(&self.config.sound_player, &self.config.sound_file);
            }
            Command::Countdown => self.start_countdown(),
            Command::Box => self.screen.output.append_line(&ascii_box(BOX_TEXT)),
            Command::Scroll => {
                let previous = self.scroll.take();
                self.cancel_slot(previous);
                self.screen.show_feed();
                let scroll = Scroll::new(SCROLL_LINES)
                    .with_interval_ms(self.config.scroll_interval_ms);
                let handle = self.spawn(TimedMutator::new(scroll, Screen::feed));
                self.scroll = Some(handle);
            }
            Command::Help => self.screen.output.append_line(HELP_TEXT),
            Command::Clear => {
                // Cancel first so a running glitch restores before the wipe.
                let finished = self.scheduler.cancel_all(&mut self.screen);
                self.journal_finished(&finished);
                self.countdown = None;
                self.scroll = None;
                self.screen.output.clear();
                self.screen.hide_overlays();
            }
            Command::Exit => return Outcome::Exit,
            Command::Unknown(text) => {
                self.screen
                    .output
                    .append_line(&format!("Unknown command: {text}"));
                self.screen.output.append_line(UNKNOWN_HINT);
            }
        }

        Outcome::Continue
    }

    /// Advance every running effect by `elapsed_ms`.
    pub fn advance(&mut self, elapsed_ms: u64) -> Report {
        let report = self.scheduler.advance(elapsed_ms, &mut self.screen);
        self.journal_finished(&report.finished);
        for f in &report.finished {
            if self.countdown.as_ref().is_some_and(|h| h.id() == f.id) {
                self.countdown = None;
            }
            if self.scroll.as_ref().is_some_and(|h| h.id() == f.id) {
                self.scroll = None;
            }
        }
        report
    }

    /// Cancel everything (used on quit).
    pub fn shutdown(&mut self) {
        let finished = self.scheduler.cancel_all(&mut self.screen);
        self.journal_finished(&finished);
        self.countdown = None;
        self.scroll = None;
    }

    fn start_countdown(&mut self) {
        self.screen.output.append_line(COUNTDOWN_NOTICE);
        let previous = self.countdown.take();
        self.cancel_slot(previous);

        let countdown = match Countdown::new(self.config.countdown_secs) {
            Ok(countdown) => countdown,
            Err(err) => {
                warn!("countdown rejected: {err}");
                self.screen.output.append_line(&err.to_string());
                return;
            }
        };
        self.screen.show_countdown();
        let mutator = TimedMutator::new(countdown, Screen::countdown)
            .on_complete(|screen: &mut Screen| screen.output.append_line(COUNTDOWN_DONE));
        self.countdown = Some(self.spawn(mutator));
    }

    fn spawn(&mut self, mutator: TimedMutator<Screen>) -> EffectHandle {
        let kind = mutator.kind();
        let handle = self.scheduler.spawn(&mut self.screen, mutator);
        info!("started {} effect {}", kind.as_str(), handle.id());
        self.journal(JournalRecord::started(handle.id(), kind));
        handle
    }

    fn cancel_slot(&mut self, slot: Option<EffectHandle>) {
        let Some(handle) = slot else {
            return;
        };
        if let Some(finished) = self.scheduler.cancel(handle.id(), &mut self.screen) {
            self.journal_finished(std::slice::from_ref(&finished));
        }
    }

    fn journal_finished(&mut self, finished: &[Finished]) {
        for f in finished {
            info!("{} effect {} {}", f.kind.as_str(), f.id, f.reason.as_str());
            self.journal(JournalRecord::finished(f));
        }
    }

    fn journal(&mut self, record: JournalRecord) {
        let Some(journal) = self.journal.as_mut() else {
            return;
        };
        if let Err(err) = journal.record(&record) {
            warn!("effect journal write failed, disabling: {err:#}");
            self.journal = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playground() -> Playground {
        let config = Config {
            seed: 7,
            sound_player: "cybermaint-no-such-player".to_string(),
            ..Config::default()
        };
        Playground::new(config)
    }

    #[test]
    fn starts_with_welcome_lines() {
        let pg = playground();
        assert_eq!(
            pg.screen().output.content(),
            "Welcome to the Cybermaint Toolkit Playground!\nType 'help' for a list of available commands."
        );
    }

    #[test]
    fn take_redraw_drains_every_region() {
        let mut screen = Screen::new();
        screen.output.append_line("a");
        screen.show_feed();
        assert!(screen.take_redraw());
        assert!(!screen.take_redraw());
    }

    #[test]
    fn snapshot_hides_invisible_overlays() {
        let mut screen = Screen::new();
        screen.show_countdown();
        let snap = screen.snapshot("", 0);
        assert_eq!(snap.countdown, Some(""));
        assert_eq!(snap.feed, None);
    }

    #[test]
    fn second_scroll_replaces_the_first() {
        let mut pg = playground();
        pg.execute("scroll");
        pg.advance(250);
        let first = pg.scroll.as_ref().map(EffectHandle::id);
        pg.execute("scroll");
        assert_eq!(pg.active_effects(), 1);
        assert_ne!(pg.scroll.as_ref().map(EffectHandle::id), first);
        assert!(pg.screen().feed.is_empty());
    }
}
