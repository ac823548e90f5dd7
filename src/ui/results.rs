use super::key_hint;
use super::layout::calculate_results_chunks;
use crate::session::QuizSession;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn results_message(score: usize, total: usize) -> String {
    format!("You scored {} of {} points!", score, total)
}

pub fn draw_results(f: &mut Frame, session: &QuizSession) {
    let layout = calculate_results_chunks(f.area());

    let title = Paragraph::new(format!("Quiz finished! 🎉 - {}", session.deck().name()))
        .style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, layout.header_area);

    let mut body = Text::default();
    body.push_line(Line::from(""));
    body.push_line(Line::from(Span::styled(
        results_message(session.score(), session.questions().len()),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if session.is_perfect() {
        body.push_line(Line::from(""));
        body.push_line(Line::from(Span::styled(
            "⭐ Perfect score! ⭐",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }
    let content = Paragraph::new(body)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(content, layout.content_area);

    let help_text = Line::from(vec![
        key_hint("r/Enter"),
        Span::from(" Play Again  "),
        key_hint("m"),
        Span::from(" Main Menu  "),
        key_hint("q/Esc"),
        Span::from(" Quit"),
    ]);
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.footer_area);
}
