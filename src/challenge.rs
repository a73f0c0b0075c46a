use include_dir::{include_dir, Dir};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

static SENTENCE_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/sentences");

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    #[error("sentence must contain at least one non-whitespace character")]
    BlankSentence,
    #[error("no sentence table is bundled for {0} difficulty")]
    MissingTable(Difficulty),
    #[error("sentence table `{file}` is malformed: {message}")]
    Malformed { file: String, message: String },
    #[error("sentence table `{file}` declares {declared} difficulty, expected {expected}")]
    DifficultyMismatch {
        file: String,
        declared: Difficulty,
        expected: Difficulty,
    },
    #[error("sentence table for {0} difficulty is empty")]
    EmptyTable(Difficulty),
}

/// A challenge sentence. Always trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sentence(String);

impl Sentence {
    pub fn new(text: impl Into<String>) -> Result<Self, ChallengeError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ChallengeError::BlankSentence);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what accuracy is measured against.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl TryFrom<String> for Sentence {
    type Error = ChallengeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Sentence::new(value)
    }
}

impl From<Sentence> for String {
    fn from(sentence: Sentence) -> Self {
        sentence.0
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The sentence the player is asked to type, and the level it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub sentence: Sentence,
    pub difficulty: Difficulty,
}

#[derive(Deserialize)]
struct SentenceFile {
    difficulty: Difficulty,
    sentences: Vec<Sentence>,
}

/// Fixed sentence tables, one per difficulty. Every table is non-empty.
#[derive(Debug, Clone)]
pub struct SentenceTable {
    easy: Vec<Sentence>,
    medium: Vec<Sentence>,
    hard: Vec<Sentence>,
}

impl SentenceTable {
    /// Load the tables bundled into the binary.
    pub fn load() -> Result<Self, ChallengeError> {
        Ok(Self {
            easy: read_table(Difficulty::Easy)?,
            medium: read_table(Difficulty::Medium)?,
            hard: read_table(Difficulty::Hard)?,
        })
    }

    pub fn sentences(&self, difficulty: Difficulty) -> &[Sentence] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Pick a sentence for `difficulty` uniformly at random. Repeats are allowed.
    pub fn select_sentence<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Challenge {
        let table = self.sentences(difficulty);
        let sentence = table[rng.gen_range(0..table.len())].clone();

        Challenge {
            sentence,
            difficulty,
        }
    }
}

fn read_table(difficulty: Difficulty) -> Result<Vec<Sentence>, ChallengeError> {
    let file_name = format!("{difficulty}.json");
    let file = SENTENCE_DIR
        .get_file(&file_name)
        .ok_or(ChallengeError::MissingTable(difficulty))?;

    let contents = file
        .contents_utf8()
        .ok_or_else(|| ChallengeError::Malformed {
            file: file_name.clone(),
            message: "not valid utf-8".to_string(),
        })?;

    parse_table(difficulty, &file_name, contents)
}

fn parse_table(
    difficulty: Difficulty,
    file_name: &str,
    contents: &str,
) -> Result<Vec<Sentence>, ChallengeError> {
    let parsed: SentenceFile =
        serde_json::from_str(contents).map_err(|e| ChallengeError::Malformed {
            file: file_name.to_string(),
            message: e.to_string(),
        })?;

    if parsed.difficulty != difficulty {
        return Err(ChallengeError::DifficultyMismatch {
            file: file_name.to_string(),
            declared: parsed.difficulty,
            expected: difficulty,
        });
    }

    if parsed.sentences.is_empty() {
        return Err(ChallengeError::EmptyTable(difficulty));
    }

    Ok(parsed.sentences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_load_bundled_tables() {
        let table = SentenceTable::load().unwrap();

        for difficulty in Difficulty::ALL {
            let sentences = table.sentences(difficulty);
            assert_eq!(sentences.len(), 3);

            let unique: HashSet<&str> = sentences.iter().map(|s| s.as_str()).collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_bundled_easy_table_contents() {
        let table = SentenceTable::load().unwrap();
        let easy: Vec<&str> = table
            .sentences(Difficulty::Easy)
            .iter()
            .map(|s| s.as_str())
            .collect();

        assert_eq!(
            easy,
            vec![
                "Practice typing every day.",
                "Python is fun.",
                "You can do this."
            ]
        );
    }

    #[test]
    fn test_select_sentence_comes_from_table() {
        let table = SentenceTable::load().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for difficulty in Difficulty::ALL {
            for _ in 0..20 {
                let challenge = table.select_sentence(difficulty, &mut rng);
                assert_eq!(challenge.difficulty, difficulty);
                assert!(table.sentences(difficulty).contains(&challenge.sentence));
            }
        }
    }

    #[test]
    fn test_select_sentence_reaches_every_entry() {
        let table = SentenceTable::load().unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let seen: HashSet<String> = (0..200)
            .map(|_| table.select_sentence(Difficulty::Medium, &mut rng))
            .map(|c| c.sentence.to_string())
            .collect();

        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_sentence_rejects_blank() {
        assert_eq!(Sentence::new(""), Err(ChallengeError::BlankSentence));
        assert_eq!(Sentence::new("  \t\n"), Err(ChallengeError::BlankSentence));
    }

    #[test]
    fn test_sentence_is_trimmed() {
        let sentence = Sentence::new("  Python is fun. ").unwrap();
        assert_eq!(sentence.as_str(), "Python is fun.");
        assert_eq!(sentence.char_count(), 14);
    }

    #[test]
    fn test_parse_table_rejects_blank_sentence() {
        let json = r#"{ "difficulty": "easy", "sentences": ["ok", "   "] }"#;
        let err = parse_table(Difficulty::Easy, "easy.json", json).unwrap_err();

        match err {
            ChallengeError::Malformed { file, message } => {
                assert_eq!(file, "easy.json");
                assert!(message.contains("non-whitespace"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_table_rejects_empty_table() {
        let json = r#"{ "difficulty": "hard", "sentences": [] }"#;
        assert_eq!(
            parse_table(Difficulty::Hard, "hard.json", json),
            Err(ChallengeError::EmptyTable(Difficulty::Hard))
        );
    }

    #[test]
    fn test_parse_table_rejects_difficulty_mismatch() {
        let json = r#"{ "difficulty": "medium", "sentences": ["a b c"] }"#;
        assert_eq!(
            parse_table(Difficulty::Easy, "easy.json", json),
            Err(ChallengeError::DifficultyMismatch {
                file: "easy.json".to_string(),
                declared: Difficulty::Medium,
                expected: Difficulty::Easy,
            })
        );
    }

    #[test]
    fn test_difficulty_cycles() {
        assert_eq!(Difficulty::Easy.next(), Difficulty::Medium);
        assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
        assert_eq!(Difficulty::Easy.previous(), Difficulty::Hard);
        for d in Difficulty::ALL {
            assert_eq!(d.next().previous(), d);
        }
    }

    #[test]
    fn test_difficulty_display_and_serde() {
        assert_eq!(Difficulty::Medium.to_string(), "medium");
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        let parsed: Difficulty = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(parsed, Difficulty::Easy);
    }
}
