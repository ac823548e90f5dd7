use crate::models::{Question, QuestionError};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BUILTIN_DECK_NAME: &str = "Лабораторија";

/// A named, non-empty, ordered set of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    name: String,
    questions: Vec<Question>,
}

impl Deck {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Result<Self, DeckError> {
        if questions.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self {
            name: name.into(),
            questions,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Reorders once, at load time. Sessions never reshuffle on restart.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.questions.shuffle(rng);
    }
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck has no questions")]
    Empty,

    #[error("failed to read deck {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse deck {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("question {} is invalid: {source}", .index + 1)]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

#[derive(Debug, Deserialize)]
struct DeckFile {
    #[serde(default)]
    name: Option<String>,
    questions: Vec<QuestionRecord>,
}

#[derive(Debug, Deserialize)]
struct QuestionRecord {
    prompt: String,
    choices: Vec<String>,
    correct: usize,
    #[serde(default)]
    icon: Option<String>,
}

pub fn parse_deck(content: &str, path: &Path) -> Result<Deck, DeckError> {
    let file: DeckFile = serde_json::from_str(content).map_err(|source| DeckError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let fallback_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "Untitled".to_string());
    build_deck(file, &fallback_name)
}

pub fn load_deck(path: &Path) -> Result<Deck, DeckError> {
    let content = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_deck(&content, path)
}

fn build_deck(file: DeckFile, fallback_name: &str) -> Result<Deck, DeckError> {
    let questions = file
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            Question::new(record.prompt, record.choices, record.correct, record.icon)
                .map_err(|source| DeckError::InvalidQuestion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let name = file
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    Deck::new(name, questions)
}

const BUILTIN_QUESTIONS: [(&str, [&str; 4], usize, &str); 4] = [
    (
        "Где се најчешће изводе експерименти?",
        ["У природи", "У лабораторијама", "У учионици", "У парку"],
        1,
        "🧪",
    ),
    (
        "Шта научници користе да би проучавали природу?",
        [
            "Само посматрање",
            "Само експерименте",
            "Различите методе и поступке",
            "Само цртање",
        ],
        2,
        "🔬",
    ),
    (
        "Да ли су све лабораторије исто опремљене?",
        [
            "Да, све су исте",
            "Не, различито су опремљене",
            "Зависи од дана",
            "Нема разлике",
        ],
        1,
        "⚗️",
    ),
    (
        "Шта може да се нађе у лабораторијама?",
        [
            "Само хемикалије",
            "Само животиње",
            "Само биљке",
            "Апарати, хемикалије и жива бића",
        ],
        3,
        "🧫",
    ),
];

/// The deck that ships with the game and is always listed first in the menu.
pub fn builtin_deck() -> Result<Deck, DeckError> {
    let questions = BUILTIN_QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, (prompt, choices, correct, icon))| {
            Question::new(
                *prompt,
                choices.iter().map(|c| c.to_string()).collect(),
                *correct,
                Some(icon.to_string()),
            )
            .map_err(|source| DeckError::InvalidQuestion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Deck::new(BUILTIN_DECK_NAME, questions)
}

pub fn get_deck_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file()
                && let Some(ext) = path.extension()
                && ext == "json"
            {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_builtin_deck_correct_indices() {
        let deck = builtin_deck().unwrap();
        assert_eq!(deck.name(), BUILTIN_DECK_NAME);
        let correct: Vec<usize> = deck.questions().iter().map(|q| q.correct_index()).collect();
        assert_eq!(correct, vec![1, 2, 1, 3]);
        assert!(deck.questions().iter().all(|q| q.icon().is_some()));
    }

    #[test]
    fn test_deck_rejects_empty_question_list() {
        assert!(matches!(Deck::new("empty", vec![]), Err(DeckError::Empty)));
    }

    #[test]
    fn test_load_deck_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "math.json",
            r#"{
                "name": "Arithmetic",
                "questions": [
                    { "prompt": "2+2?", "choices": ["3", "4", "5"], "correct": 1 },
                    { "prompt": "3*3?", "choices": ["9", "6"], "correct": 0, "icon": "✖" }
                ]
            }"#,
        );

        let deck = load_deck(&path).unwrap();
        assert_eq!(deck.name(), "Arithmetic");
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.questions()[0].icon(), None);
        assert_eq!(deck.questions()[1].icon(), Some("✖"));
    }

    #[test]
    fn test_load_deck_name_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "capitals.json",
            r#"{ "questions": [ { "prompt": "Capital of France?", "choices": ["Paris", "Rome"], "correct": 0 } ] }"#,
        );

        let deck = load_deck(&path).unwrap();
        assert_eq!(deck.name(), "capitals");
    }

    #[test]
    fn test_load_deck_reports_invalid_question_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "broken.json",
            r#"{ "questions": [
                { "prompt": "ok?", "choices": ["a", "b"], "correct": 0 },
                { "prompt": "bad?", "choices": ["a", "b"], "correct": 5 }
            ] }"#,
        );

        let err = load_deck(&path).unwrap_err();
        match err {
            DeckError::InvalidQuestion { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(
                    source,
                    QuestionError::CorrectIndexOutOfRange { correct: 5, len: 2 }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_deck_with_no_questions_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "none.json", r#"{ "questions": [] }"#);
        assert!(matches!(load_deck(&path), Err(DeckError::Empty)));
    }

    #[test]
    fn test_load_deck_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "bad.json", "{ not json");
        let err = load_deck(&path).unwrap_err();
        assert!(matches!(err, DeckError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_load_deck_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_deck(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
    }

    #[test]
    fn test_get_deck_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "b.json", "{}");
        write_file(dir.path(), "a.json", "{}");
        write_file(dir.path(), "notes.txt", "");

        let files = get_deck_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_get_deck_files_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(get_deck_files(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_bundled_sample_deck_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("quizzes/solar_system.json");
        let deck = load_deck(&path).unwrap();
        assert_eq!(deck.name(), "Solar System");
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn test_shuffle_keeps_question_set() {
        let mut deck = builtin_deck().unwrap();
        let mut before: Vec<String> = deck.questions().iter().map(|q| q.prompt().to_string()).collect();
        deck.shuffle(&mut StdRng::seed_from_u64(7));
        let mut after: Vec<String> = deck.questions().iter().map(|q| q.prompt().to_string()).collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
