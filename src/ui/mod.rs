pub mod layout;
mod menu;
mod quiz;
mod results;

pub use layout::{calculate_quiz_chunks, calculate_results_chunks};
pub use menu::draw_menu;
pub use quiz::{draw_quit_confirmation, draw_quiz, quit_progress};
pub use results::{draw_results, results_message};

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

fn key_hint(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}
