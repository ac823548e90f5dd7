use crate::models::Interaction;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const OPTION_HEIGHT: u16 = 3;

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub options_area: Rect,
    /// One box per option, in order. Mouse hit-testing uses the same rects.
    pub option_areas: Vec<Rect>,
    pub drop_area: Option<Rect>,
    pub help_area: Rect,
}

pub struct ResultsLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_quiz_chunks(
    area: Rect,
    option_count: usize,
    interaction: Interaction,
) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(OPTION_HEIGHT),
            Constraint::Length(3),
        ])
        .split(area);

    let (options_area, drop_area) = match interaction {
        Interaction::ChoiceSelection => (chunks[2], None),
        Interaction::DragDropSelection => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(chunks[2]);
            (columns[0], Some(columns[1]))
        }
    };

    let mut constraints = vec![Constraint::Length(OPTION_HEIGHT); option_count];
    constraints.push(Constraint::Min(0));
    let option_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(options_area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        options_area,
        option_areas: option_rows.iter().take(option_count).copied().collect(),
        drop_area,
        help_area: chunks[3],
    }
}

pub fn calculate_results_chunks(area: Rect) -> ResultsLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    ResultsLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

pub fn option_at(layout: &QuizLayout, column: u16, row: u16) -> Option<usize> {
    layout
        .option_areas
        .iter()
        .position(|rect| rect.height > 0 && contains(*rect, column, row))
}

pub fn is_over_drop_target(layout: &QuizLayout, column: u16, row: u16) -> bool {
    layout
        .drop_area
        .is_some_and(|rect| contains(rect, column, row))
}

/// A box of at most `width` x `height` centered in `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
