use crate::challenge::{Challenge, Difficulty, SentenceTable};
use crate::scoring::{self, Elapsed, ScoreReport};
use crate::stats::AggregateStats;
use crate::timer::Timer;
use rand::Rng;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    NotStarted,
    Started,
    Finalized,
}

/// One timed transcription of the current challenge.
#[derive(Debug, Clone, Default)]
pub struct Attempt {
    timer: Timer,
    typed: String,
    submitted: bool,
}

impl Attempt {
    pub fn state(&self) -> AttemptState {
        if self.submitted {
            AttemptState::Finalized
        } else if self.timer.has_started() {
            AttemptState::Started
        } else {
            AttemptState::NotStarted
        }
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Soft, user-facing feedback for out-of-order actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoSentence,
    StartFirst,
    TooSoon,
    AlreadySubmitted,
    TimeUp,
}

impl Notice {
    pub fn severity(&self) -> Severity {
        match self {
            Notice::AlreadySubmitted => Severity::Info,
            Notice::NoSentence | Notice::StartFirst | Notice::TooSoon | Notice::TimeUp => {
                Severity::Warning
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notice::NoSentence => "Pick a new sentence first.",
            Notice::StartFirst => "Please start typing first.",
            Notice::TooSoon => "Too soon to submit, keep typing.",
            Notice::AlreadySubmitted => "Already submitted. Pick a new sentence to try again.",
            Notice::TimeUp => "Time's up! Submitting automatically...",
        };
        f.write_str(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitOutcome {
    Finalized(ScoreReport),
    Rejected(Notice),
}

/// Everything one interactive session knows: the challenge, the attempt at
/// it and the totals so far. Lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    challenge: Option<Challenge>,
    attempt: Attempt,
    stats: AggregateStats,
    last_report: Option<ScoreReport>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn challenge(&self) -> Option<&Challenge> {
        self.challenge.as_ref()
    }

    pub fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    pub fn state(&self) -> AttemptState {
        self.attempt.state()
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    /// Score of the attempt most recently finalized for the current challenge.
    pub fn last_report(&self) -> Option<&ScoreReport> {
        self.last_report.as_ref()
    }

    /// Replace the challenge and abandon whatever attempt was in progress.
    pub fn set_challenge(&mut self, challenge: Challenge) -> &Challenge {
        log::info!(
            "new {} sentence: {:?}",
            challenge.difficulty,
            challenge.sentence.as_str()
        );
        self.attempt = Attempt::default();
        self.last_report = None;
        self.challenge.insert(challenge)
    }

    pub fn new_sentence<R: Rng + ?Sized>(
        &mut self,
        table: &SentenceTable,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> &Challenge {
        let challenge = table.select_sentence(difficulty, rng);
        self.set_challenge(challenge)
    }

    /// Start (or restart) the clock on the current challenge.
    pub fn start(&mut self, now: Instant) -> Result<(), Notice> {
        if self.challenge.is_none() {
            log::warn!("start requested without a sentence");
            return Err(Notice::NoSentence);
        }

        self.attempt.timer.start(now);
        self.attempt.typed.clear();
        self.attempt.submitted = false;
        self.last_report = None;
        log::info!("attempt started");
        Ok(())
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.attempt.submitted {
            self.attempt.typed.push(c);
        }
    }

    pub fn insert_str(&mut self, text: &str) {
        if !self.attempt.submitted {
            self.attempt.typed.push_str(text);
        }
    }

    pub fn backspace(&mut self) {
        if !self.attempt.submitted {
            self.attempt.typed.pop();
        }
    }

    /// Finalize the running attempt, folding its score into the totals.
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        match self.attempt.state() {
            AttemptState::NotStarted => {
                log::warn!("submit rejected: attempt not started");
                return SubmitOutcome::Rejected(Notice::StartFirst);
            }
            AttemptState::Finalized => {
                log::info!("submit ignored: attempt already finalized");
                return SubmitOutcome::Rejected(Notice::AlreadySubmitted);
            }
            AttemptState::Started => {}
        }

        let Some(challenge) = self.challenge.as_ref() else {
            return SubmitOutcome::Rejected(Notice::NoSentence);
        };

        let Some(elapsed) = self
            .attempt
            .timer
            .elapsed(now)
            .and_then(Elapsed::from_duration)
        else {
            log::warn!("submit rejected: no measurable time has elapsed");
            return SubmitOutcome::Rejected(Notice::TooSoon);
        };

        let report = scoring::score(&challenge.sentence, &self.attempt.typed, elapsed);
        self.attempt.submitted = true;
        self.stats.record(report.wpm);
        self.last_report = Some(report);

        log::info!(
            "attempt finalized: {:.2} wpm, {:.2}% accuracy, {} words in {:.2}s",
            report.wpm,
            report.accuracy,
            report.typed_word_count,
            report.elapsed_secs
        );
        SubmitOutcome::Finalized(report)
    }

    /// Submit on the attempt's behalf once its timer has run out.
    ///
    /// Returns `None` when there is nothing to do, so repeated polling after
    /// expiry never scores the attempt twice.
    pub fn auto_submit(&mut self, now: Instant) -> Option<SubmitOutcome> {
        if self.attempt.state() != AttemptState::Started || !self.attempt.timer.is_expired(now) {
            return None;
        }

        log::info!("timer expired, submitting automatically");
        Some(self.submit(now))
    }
}
