use crate::celebration::CelebrationAnimation;
use crate::challenge::{Difficulty, SentenceTable};
use crate::config::Config;
use crate::scoring::Rating;
use crate::session::{Notice, SessionState, SubmitOutcome};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// The interactive game: one session plus what the screen needs to show it.
#[derive(Debug)]
pub struct App {
    pub session: SessionState,
    pub difficulty: Difficulty,
    pub show_tracker: bool,
    pub notice: Option<Notice>,
    pub celebration: CelebrationAnimation,
    table: SentenceTable,
    rng: StdRng,
    viewport: (u16, u16),
}

impl App {
    pub fn new(table: SentenceTable, config: &Config) -> Self {
        Self::with_rng(table, config, StdRng::from_entropy())
    }

    pub fn with_rng(table: SentenceTable, config: &Config, rng: StdRng) -> Self {
        Self {
            session: SessionState::new(),
            difficulty: config.difficulty,
            show_tracker: config.show_tracker,
            notice: None,
            celebration: CelebrationAnimation::new(),
            table,
            rng,
            viewport: (80, 24),
        }
    }

    pub fn table(&self) -> &SentenceTable {
        &self.table
    }

    /// Preferences worth keeping for the next run.
    pub fn settings(&self) -> Config {
        Config {
            difficulty: self.difficulty,
            show_tracker: self.show_tracker,
        }
    }

    pub fn set_viewport(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Control {
        self.poll_timer(now);

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Char('n') if ctrl => self.new_sentence(),
            KeyCode::Char('t') if ctrl => self.show_tracker = !self.show_tracker,
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => self.session.insert_char(c),
            KeyCode::Backspace => self.session.backspace(),
            KeyCode::Up => self.difficulty = self.difficulty.previous(),
            KeyCode::Down => self.difficulty = self.difficulty.next(),
            KeyCode::Tab => self.start(now),
            KeyCode::Enter => self.submit(now, false),
            _ => {}
        }

        Control::Continue
    }

    pub fn handle_paste(&mut self, text: &str, now: Instant) {
        self.poll_timer(now);
        self.session.insert_str(text);
    }

    /// Advance animations and submit on the player's behalf when time runs out.
    pub fn on_tick(&mut self, now: Instant) {
        self.celebration.update();
        self.poll_timer(now);
    }

    fn poll_timer(&mut self, now: Instant) {
        if self.session.attempt().timer().is_expired(now) && !self.session.attempt().is_submitted()
        {
            self.submit(now, true);
        }
    }

    fn new_sentence(&mut self) {
        self.session
            .new_sentence(&self.table, self.difficulty, &mut self.rng);
        self.notice = None;
        self.celebration.stop();
    }

    fn start(&mut self, now: Instant) {
        self.notice = self.session.start(now).err();
        self.celebration.stop();
    }

    fn submit(&mut self, now: Instant, automatic: bool) {
        let outcome = if automatic {
            match self.session.auto_submit(now) {
                Some(outcome) => outcome,
                None => return,
            }
        } else {
            self.session.submit(now)
        };

        match outcome {
            SubmitOutcome::Finalized(report) => {
                self.notice = automatic.then_some(Notice::TimeUp);
                if report.rating() == Rating::LightningFast {
                    let (width, height) = self.viewport;
                    self.celebration.start(width, height);
                }
            }
            SubmitOutcome::Rejected(notice) => self.notice = Some(notice),
        }
    }
}
