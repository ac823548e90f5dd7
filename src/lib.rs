pub mod app;
pub mod config;
pub mod deck;
pub mod game;
pub mod input;
pub mod logger;
pub mod models;
pub mod session;
pub mod timer;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use app::{App, DeckSource};
pub use config::{AppConfig, ConfigError};
pub use deck::{Deck, DeckError, builtin_deck, get_deck_files, load_deck};
pub use game::{DragState, QuizRun};
pub use input::{handle_quiz_input, handle_quiz_mouse};
pub use models::{AppState, Interaction, Phase, Question, QuestionError};
pub use session::{Advance, AdvanceTicket, QuizSession, SessionSnapshot, Submission};
pub use timer::{AdvanceScheduler, DEFAULT_ADVANCE_DELAY, ScheduledAdvance};
pub use ui::{draw_menu, draw_quit_confirmation, draw_quiz, draw_results};
