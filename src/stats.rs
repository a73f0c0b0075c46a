use crate::util::round2;

/// Running totals across every finalized attempt in this session.
///
/// Only ever grows; there is no way to remove a recorded game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateStats {
    games_played: u32,
    total_wpm: f64,
    best_wpm: f64,
    history: Vec<f64>,
}

impl AggregateStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished game into the totals.
    pub fn record(&mut self, wpm: f64) {
        self.games_played += 1;
        self.total_wpm += wpm;
        if wpm > self.best_wpm {
            self.best_wpm = wpm;
        }
        self.history.push(wpm);

        log::debug!(
            "recorded game {} at {:.2} wpm (best {:.2})",
            self.games_played,
            wpm,
            self.best_wpm
        );
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn total_wpm(&self) -> f64 {
        self.total_wpm
    }

    pub fn best_wpm(&self) -> f64 {
        self.best_wpm
    }

    /// Average WPM rounded to hundredths; 0 before the first game.
    pub fn average_wpm(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        round2(self.total_wpm / f64::from(self.games_played))
    }

    /// WPM of every recorded game, oldest first.
    pub fn history(&self) -> &[f64] {
        &self.history
    }
}
