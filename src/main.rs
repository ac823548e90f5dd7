use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossbeam_channel::Receiver;
use quiz_game::{
    draw_menu, draw_quit_confirmation, draw_quiz, draw_results, logger, AdvanceScheduler,
    AdvanceTicket, App, AppConfig, AppState,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> io::Result<()> {
    let config = AppConfig::from_env().map_err(io::Error::other)?;
    if let Some(path) = &config.log_file {
        logger::init(path);
    }
    logger::log(&format!("Starting with {:?}", config));

    let runtime = tokio::runtime::Runtime::new()?;
    let (scheduler, advances) =
        AdvanceScheduler::channel(runtime.handle().clone(), config.advance_delay);
    let mut app = App::new(config, scheduler);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &advances);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        logger::log(&format!("Exiting with error: {}", e));
    }
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    advances: &Receiver<AdvanceTicket>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            app.last_area = f.area();
            match app.state {
                AppState::Menu => draw_menu(
                    f,
                    &app.decks,
                    app.selected_deck,
                    app.interaction,
                    app.status.as_deref(),
                ),
                AppState::Quiz => {
                    if let Some(run) = &app.run {
                        draw_quiz(f, run);
                    }
                }
                AppState::QuizQuitConfirm => {
                    if let Some(run) = &app.run {
                        if run.session().is_finished() {
                            draw_results(f, run.session());
                        } else {
                            draw_quiz(f, run);
                        }
                        draw_quit_confirmation(f, run.session());
                    }
                }
                AppState::Results => {
                    if let Some(run) = &app.run {
                        draw_results(f, run.session());
                    }
                }
            }
        })?;

        if event::poll(POLL_INTERVAL)? {
            app.handle_event(event::read()?);
        }

        for ticket in advances.try_iter() {
            app.on_advance(ticket);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
