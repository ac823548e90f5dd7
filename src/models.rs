use thiserror::Error;

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    icon: Option<String>,
}

impl Question {
    pub fn new(
        prompt: impl Into<String>,
        choices: Vec<String>,
        correct_index: usize,
        icon: Option<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if choices.len() < 2 {
            return Err(QuestionError::TooFewChoices(choices.len()));
        }
        if correct_index >= choices.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                correct: correct_index,
                len: choices.len(),
            });
        }

        Ok(Self {
            prompt,
            choices,
            correct_index,
            icon,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Any index is accepted; out-of-range selections are simply wrong.
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_index
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question needs at least 2 choices, got {0}")]
    TooFewChoices(usize),

    #[error("correct index {correct} is out of range for {len} choices")]
    CorrectIndexOutOfRange { correct: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Answering,
    Celebrating,
    Finished,
}

/// How a player hands an answer to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interaction {
    /// Click or pick one option; wrong answers still move on after the delay.
    #[default]
    ChoiceSelection,
    /// Drag an option onto the target; wrong drops are ignored and the player retries.
    DragDropSelection,
}

impl Interaction {
    pub fn advances_on_incorrect(self) -> bool {
        matches!(self, Interaction::ChoiceSelection)
    }

    pub fn toggled(self) -> Self {
        match self {
            Interaction::ChoiceSelection => Interaction::DragDropSelection,
            Interaction::DragDropSelection => Interaction::ChoiceSelection,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Interaction::ChoiceSelection => "Multiple choice",
            Interaction::DragDropSelection => "Drag and drop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
    QuizQuitConfirm,
    Results,
}
