use crate::config::AppConfig;
use crate::deck::{BUILTIN_DECK_NAME, Deck, DeckError, builtin_deck, get_deck_files, load_deck};
use crate::game::QuizRun;
use crate::input::{handle_quiz_input, handle_quiz_mouse};
use crate::logger;
use crate::models::{AppState, Interaction};
use crate::session::{Advance, AdvanceTicket, QuizSession};
use crate::timer::AdvanceScheduler;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::Rect;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckSource {
    Builtin,
    File(PathBuf),
}

impl DeckSource {
    pub fn display_name(&self) -> String {
        match self {
            DeckSource::Builtin => format!("{} (built-in)", BUILTIN_DECK_NAME),
            DeckSource::File(path) => path
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    fn load(&self) -> Result<Deck, DeckError> {
        match self {
            DeckSource::Builtin => builtin_deck(),
            DeckSource::File(path) => load_deck(path),
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub decks: Vec<DeckSource>,
    pub selected_deck: usize,
    pub interaction: Interaction,
    pub status: Option<String>,
    pub run: Option<QuizRun>,
    pub should_quit: bool,
    /// Frame area from the last draw; mouse hit-testing lays out against it.
    pub last_area: Rect,
    config: AppConfig,
    scheduler: AdvanceScheduler,
}

impl App {
    pub fn new(config: AppConfig, scheduler: AdvanceScheduler) -> Self {
        let mut app = Self {
            state: AppState::Menu,
            decks: Vec::new(),
            selected_deck: 0,
            interaction: Interaction::default(),
            status: None,
            run: None,
            should_quit: false,
            last_area: Rect::default(),
            config,
            scheduler,
        };
        app.refresh_decks();
        app
    }

    pub fn refresh_decks(&mut self) {
        self.decks = std::iter::once(DeckSource::Builtin)
            .chain(
                get_deck_files(&self.config.deck_dir)
                    .into_iter()
                    .map(DeckSource::File),
            )
            .collect();
        self.selected_deck = self.selected_deck.min(self.decks.len().saturating_sub(1));
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) if self.state == AppState::Quiz => {
                if let Some(run) = self.run.as_mut() {
                    handle_quiz_mouse(run, mouse, self.last_area);
                }
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.state {
            AppState::Menu => self.handle_menu_key(key),
            AppState::Quiz => {
                if let Some(run) = self.run.as_mut() {
                    handle_quiz_input(run, key, &mut self.state);
                }
            }
            AppState::QuizQuitConfirm => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.back_to_menu(),
                KeyCode::Char('r') => {
                    if let Some(run) = self.run.as_mut() {
                        run.restart();
                        self.state = AppState::Quiz;
                    }
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.state = if self.run.as_ref().is_some_and(|r| r.session().is_finished()) {
                        AppState::Results
                    } else {
                        AppState::Quiz
                    };
                }
                _ => {}
            },
            AppState::Results => match key.code {
                KeyCode::Char('r') | KeyCode::Enter => {
                    if let Some(run) = self.run.as_mut() {
                        run.restart();
                        self.state = AppState::Quiz;
                    }
                }
                KeyCode::Char('m') => self.back_to_menu(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected_deck > 0 {
                    self.selected_deck -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_deck < self.decks.len().saturating_sub(1) {
                    self.selected_deck += 1;
                }
            }
            KeyCode::Tab => self.interaction = self.interaction.toggled(),
            KeyCode::Enter => self.start_selected(),
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    pub fn start_selected(&mut self) {
        let Some(source) = self.decks.get(self.selected_deck).cloned() else {
            return;
        };

        match source.load() {
            Ok(mut deck) => {
                if self.config.shuffle {
                    deck.shuffle(&mut rand::thread_rng());
                }
                logger::log(&format!(
                    "Starting deck {} ({} questions, {})",
                    deck.name(),
                    deck.len(),
                    self.interaction.label()
                ));
                let session = QuizSession::new(deck, self.interaction);
                self.run = Some(QuizRun::new(session, self.scheduler.clone()));
                self.status = None;
                self.state = AppState::Quiz;
            }
            Err(e) => {
                logger::log(&format!("Failed to load {}: {}", source.display_name(), e));
                self.status = Some(e.to_string());
            }
        }
    }

    fn back_to_menu(&mut self) {
        if let Some(run) = self.run.take() {
            run.end();
        }
        self.refresh_decks();
        self.state = AppState::Menu;
    }

    /// Feeds a fired timer into the current run.
    pub fn on_advance(&mut self, ticket: AdvanceTicket) {
        let Some(run) = self.run.as_mut() else {
            logger::log("Advance fired with no active run");
            return;
        };
        if run.on_advance(ticket) == Advance::Finished && self.state == AppState::Quiz {
            self.state = AppState::Results;
        }
    }
}
