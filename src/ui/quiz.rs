use super::key_hint;
use super::layout::{calculate_quiz_chunks, centered_rect};
use crate::game::QuizRun;
use crate::models::{Interaction, Phase};
use crate::session::QuizSession;
use crate::utils::{option_label, truncate_string};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_quiz(f: &mut Frame, run: &QuizRun) {
    let session = run.session();
    let Some(question) = session.current_question() else {
        return;
    };
    let interaction = run.interaction();
    let layout = calculate_quiz_chunks(f.area(), question.choices().len(), interaction);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout.header_area);

    let progress = Paragraph::new(format!(
        "Question {}/{}",
        session.current_index() + 1,
        session.questions().len()
    ))
    .style(
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )
    .block(Block::default().borders(Borders::ALL).title(session.deck().name()));
    f.render_widget(progress, header_chunks[0]);

    let score_text = if session.has_pending_point() {
        format!("Score: {} (+1)", session.score())
    } else {
        format!("Score: {}", session.score())
    };
    let score = Paragraph::new(score_text)
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(score, header_chunks[1]);

    let prompt = match question.icon() {
        Some(icon) => format!("{}  {}", icon, question.prompt()),
        None => question.prompt().to_string(),
    };
    let question_widget = Paragraph::new(prompt)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Question"));
    f.render_widget(question_widget, layout.question_area);

    let dragged = run.drag().map(|d| d.index);
    for (i, (choice, area)) in question
        .choices()
        .iter()
        .zip(layout.option_areas.iter())
        .enumerate()
    {
        let border_style = option_border_style(run, i, question.correct_index());
        let text_style = if dragged == Some(i) {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let width = area.width.saturating_sub(2) as usize;
        let option = Paragraph::new(truncate_string(&option_label(i, choice), width))
            .style(text_style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style),
            );
        f.render_widget(option, *area);
    }

    if let Some(drop_area) = layout.drop_area {
        draw_drop_target(f, run, drop_area);
    }

    if let Some(drag) = run.drag()
        && !drag.from_keyboard
        && let Some(choice) = question.choices().get(drag.index)
    {
        let label = truncate_string(choice, 30);
        let width = (unicode_width::UnicodeWidthStr::width(label.as_str()) as u16 + 2)
            .min(f.area().width);
        let x = drag.column.min(f.area().width.saturating_sub(width));
        let y = drag.row.min(f.area().height.saturating_sub(1));
        let ghost = Rect::new(x, y, width, 1);
        f.render_widget(Clear, ghost);
        f.render_widget(
            Paragraph::new(format!(" {} ", label)).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow),
            ),
            ghost,
        );
    }

    let help = Paragraph::new(help_line(interaction))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);

    if session.phase() == Phase::Celebrating {
        let area = centered_rect(9, 3, f.area());
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new("⭐")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                ),
            area,
        );
    }
}

fn option_border_style(run: &QuizRun, index: usize, correct_index: usize) -> Style {
    if let Some(selected) = run.session().pending_selection()
        && selected == index
    {
        return if selected == correct_index {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
    }
    if index == run.cursor() && run.session().is_accepting_answers() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_drop_target(f: &mut Frame, run: &QuizRun, area: Rect) {
    let held = run.drag().and_then(|drag| {
        run.session()
            .current_question()
            .and_then(|q| q.choices().get(drag.index))
    });

    let mut lines = vec![Line::from(""), Line::from("Drop your answer here")];
    if let Some(choice) = held {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            truncate_string(choice, area.width.saturating_sub(4) as usize),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let border = if held.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let target = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Answer"),
        );
    f.render_widget(target, area);
}

fn help_line(interaction: Interaction) -> Line<'static> {
    let mut spans = vec![key_hint("↑/↓"), Span::from(" Move  ")];
    match interaction {
        Interaction::ChoiceSelection => spans.extend([
            key_hint("Enter/1-9"),
            Span::from(" Answer  "),
            key_hint("Click"),
            Span::from(" Answer  "),
        ]),
        Interaction::DragDropSelection => spans.extend([
            key_hint("Space"),
            Span::from(" Pick Up  "),
            key_hint("Enter"),
            Span::from(" Drop  "),
            key_hint("Drag"),
            Span::from(" Mouse  "),
        ]),
    }
    spans.extend([
        key_hint("r"),
        Span::from(" Restart  "),
        key_hint("Esc"),
        Span::from(" Menu"),
    ]);
    Line::from(spans)
}

/// Summary of the run being abandoned, e.g. "Question 2/4, 1 point so far".
pub fn quit_progress(session: &QuizSession) -> String {
    let total = session.questions().len();
    let question = (session.current_index() + 1).min(total);
    let points = if session.score() == 1 { "point" } else { "points" };
    format!(
        "Question {}/{}, {} {} so far",
        question,
        total,
        session.score(),
        points
    )
}

/// Popup over the paused quiz. A pending advance still resolves underneath.
pub fn draw_quit_confirmation(f: &mut Frame, session: &QuizSession) {
    let area = centered_rect(56, 9, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Quit to Menu ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(truncate_string(session.deck().name(), rows[0].width as usize))
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(quit_progress(session))
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center),
        rows[1],
    );
    f.render_widget(
        Paragraph::new("Leaving discards this run.")
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center),
        rows[3],
    );

    let hints = Line::from(vec![
        key_hint("y"),
        Span::from(" Menu  "),
        key_hint("n"),
        Span::from(" Keep Playing  "),
        key_hint("r"),
        Span::from(" Restart  "),
        key_hint("Ctrl+C"),
        Span::from(" Exit"),
    ]);
    f.render_widget(Paragraph::new(hints).alignment(Alignment::Center), rows[4]);
}
