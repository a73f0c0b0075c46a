use crate::challenge::Sentence;
use crate::util::round2;
use std::time::Duration;

/// Seconds an attempt took, rounded to hundredths and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Elapsed(f64);

impl Elapsed {
    /// `None` when the rounded value is zero, which would make WPM undefined.
    pub fn from_secs(secs: f64) -> Option<Self> {
        let rounded = round2(secs);
        (rounded.is_finite() && rounded > 0.0).then_some(Self(rounded))
    }

    pub fn from_duration(duration: Duration) -> Option<Self> {
        Self::from_secs(duration.as_secs_f64())
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreReport {
    pub wpm: f64,
    pub accuracy: f64,
    pub typed_word_count: usize,
    pub elapsed_secs: f64,
}

impl ScoreReport {
    pub fn rating(&self) -> Rating {
        Rating::from_wpm(self.wpm)
    }

    /// Fill ratio of the results gauge, saturating at 100 wpm.
    pub fn progress(&self) -> f64 {
        (self.wpm / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Rating {
    #[strum(to_string = "lightning fast")]
    LightningFast,
    #[strum(to_string = "great job")]
    GreatJob,
    #[strum(to_string = "keep practicing")]
    KeepPracticing,
    #[strum(to_string = "slow start")]
    SlowStart,
}

impl Rating {
    pub fn from_wpm(wpm: f64) -> Self {
        if wpm > 80.0 {
            Rating::LightningFast
        } else if wpm > 50.0 {
            Rating::GreatJob
        } else if wpm > 30.0 {
            Rating::KeepPracticing
        } else {
            Rating::SlowStart
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::LightningFast => "You're lightning fast!",
            Rating::GreatJob => "Great job!",
            Rating::KeepPracticing => "Keep practicing!",
            Rating::SlowStart => "Slow start! Try again!",
        }
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn wpm(typed_word_count: usize, elapsed: Elapsed) -> f64 {
    round2(typed_word_count as f64 / elapsed.as_secs() * 60.0)
}

/// Percentage of the original's characters matched position by position.
///
/// Typed characters past the end of the original are ignored, and a short
/// transcription is penalised for the tail it never reached.
pub fn accuracy(original: &Sentence, typed: &str) -> f64 {
    let correct_chars = typed
        .trim()
        .chars()
        .zip(original.as_str().chars())
        .filter(|(typed, expected)| typed == expected)
        .count();

    round2(correct_chars as f64 / original.char_count() as f64 * 100.0)
}

pub fn score(original: &Sentence, typed: &str, elapsed: Elapsed) -> ScoreReport {
    let typed_word_count = word_count(typed);

    ScoreReport {
        wpm: wpm(typed_word_count, elapsed),
        accuracy: accuracy(original, typed),
        typed_word_count,
        elapsed_secs: elapsed.as_secs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(text: &str) -> Sentence {
        Sentence::new(text).unwrap()
    }

    fn secs(value: f64) -> Elapsed {
        Elapsed::from_secs(value).unwrap()
    }

    #[test]
    fn test_score_exact_transcription() {
        let report = score(&sentence("Python is fun."), "Python is fun.", secs(3.0));

        assert_eq!(report.typed_word_count, 3);
        assert_eq!(report.wpm, 60.0);
        assert_eq!(report.accuracy, 100.0);
        assert_eq!(report.elapsed_secs, 3.0);
    }

    #[test]
    fn test_score_partial_transcription() {
        let report = score(&sentence("Python is fun."), "Python is", secs(2.0));

        assert_eq!(report.typed_word_count, 2);
        assert_eq!(report.wpm, 60.0);
        // 9 matching positions out of 14 characters in the original
        assert_eq!(report.accuracy, 64.29);
    }

    #[test]
    fn test_accuracy_ignores_extra_characters() {
        let original = sentence("abc");
        assert_eq!(accuracy(&original, "abcdef"), 100.0);
        assert_eq!(accuracy(&original, "abx"), 66.67);
    }

    #[test]
    fn test_accuracy_trims_typed_text() {
        let original = sentence("You can do this.");
        assert_eq!(accuracy(&original, "  You can do this.\n"), 100.0);
    }

    #[test]
    fn test_accuracy_is_positional() {
        // a dropped character shifts every later position out of alignment
        let original = sentence("abcd");
        assert_eq!(accuracy(&original, "acd"), 25.0);
    }

    #[test]
    fn test_accuracy_compares_characters_not_bytes() {
        let original = sentence("café au lait");
        assert_eq!(accuracy(&original, "café au lait"), 100.0);
        assert_eq!(accuracy(&original, "cafe au lait"), 91.67);
    }

    #[test]
    fn test_empty_typed_text() {
        let report = score(&sentence("You can do this."), "", secs(4.2));

        assert_eq!(report.typed_word_count, 0);
        assert_eq!(report.wpm, 0.0);
        assert_eq!(report.accuracy, 0.0);
    }

    #[test]
    fn test_word_count_splits_on_any_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count(" one\ttwo\n three  "), 3);
    }

    #[test]
    fn test_wpm_rounds_to_hundredths() {
        assert_eq!(wpm(7, secs(9.0)), 46.67);
    }

    #[test]
    fn test_wpm_rounds_halves_to_even() {
        // three words in 32 seconds is exactly 5.625 wpm
        assert_eq!(wpm(3, secs(32.0)), 5.62);
    }

    #[test]
    fn test_elapsed_rejects_zero() {
        assert_eq!(Elapsed::from_secs(0.0), None);
        assert_eq!(Elapsed::from_secs(0.004), None);
        assert_eq!(Elapsed::from_secs(-1.0), None);
        assert_eq!(Elapsed::from_secs(f64::NAN), None);
        assert_eq!(Elapsed::from_secs(0.006).map(|e| e.as_secs()), Some(0.01));
    }

    #[test]
    fn test_elapsed_from_duration_rounds() {
        let elapsed = Elapsed::from_duration(Duration::from_millis(12_346)).unwrap();
        assert_eq!(elapsed.as_secs(), 12.35);
    }

    #[test]
    fn test_rating_thresholds() {
        assert_eq!(Rating::from_wpm(80.01), Rating::LightningFast);
        assert_eq!(Rating::from_wpm(80.0), Rating::GreatJob);
        assert_eq!(Rating::from_wpm(50.01), Rating::GreatJob);
        assert_eq!(Rating::from_wpm(50.0), Rating::KeepPracticing);
        assert_eq!(Rating::from_wpm(30.01), Rating::KeepPracticing);
        assert_eq!(Rating::from_wpm(30.0), Rating::SlowStart);
        assert_eq!(Rating::from_wpm(0.0), Rating::SlowStart);
    }

    #[test]
    fn test_rating_display() {
        assert_eq!(Rating::LightningFast.to_string(), "lightning fast");
        assert_eq!(Rating::SlowStart.to_string(), "slow start");
        assert_eq!(Rating::GreatJob.message(), "Great job!");
    }

    #[test]
    fn test_progress_saturates() {
        let mut report = score(&sentence("a b"), "a b", secs(60.0));
        assert_eq!(report.progress(), 0.02);

        report.wpm = 240.0;
        assert_eq!(report.progress(), 1.0);
    }
}
