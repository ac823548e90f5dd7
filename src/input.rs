use crate::game::QuizRun;
use crate::models::{AppState, Interaction};
use crate::ui::layout::{calculate_quiz_chunks, is_over_drop_target, option_at};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub fn handle_quiz_input(run: &mut QuizRun, key: KeyEvent, app_state: &mut AppState) {
    match key.code {
        KeyCode::Esc => {
            run.cancel_drag();
            *app_state = AppState::QuizQuitConfirm;
        }
        KeyCode::Char('r') => run.restart(),
        KeyCode::Up | KeyCode::Char('k') => run.move_cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => run.move_cursor_down(),
        _ => match run.interaction() {
            Interaction::ChoiceSelection => handle_choice_key(run, key),
            Interaction::DragDropSelection => handle_drag_key(run, key),
        },
    }
}

fn handle_choice_key(run: &mut QuizRun, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            run.choose(run.cursor());
        }
        KeyCode::Char(c) => {
            if let Some(index) = digit_index(c) {
                run.set_cursor(index);
                run.choose(index);
            }
        }
        _ => {}
    }
}

fn handle_drag_key(run: &mut QuizRun, key: KeyEvent) {
    match key.code {
        KeyCode::Char(' ') => run.toggle_keyboard_drag(),
        KeyCode::Enter => {
            if let Some(drag) = run.drag() {
                run.drop_on_target(drag.index);
            }
        }
        _ => {}
    }
}

fn digit_index(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d) if d >= 1 => Some(d as usize - 1),
        _ => None,
    }
}

/// `area` is the frame the quiz was last drawn into, so hits match what is on screen.
pub fn handle_quiz_mouse(run: &mut QuizRun, mouse: MouseEvent, area: Rect) {
    let option_count = run
        .session()
        .current_question()
        .map(|q| q.choices().len())
        .unwrap_or(0);
    let layout = calculate_quiz_chunks(area, option_count, run.interaction());
    let (column, row) = (mouse.column, mouse.row);

    match (run.interaction(), mouse.kind) {
        (Interaction::ChoiceSelection, MouseEventKind::Down(MouseButton::Left)) => {
            if let Some(index) = option_at(&layout, column, row) {
                run.set_cursor(index);
                run.choose(index);
            }
        }
        (Interaction::ChoiceSelection, MouseEventKind::Moved) => {
            if let Some(index) = option_at(&layout, column, row) {
                run.set_cursor(index);
            }
        }
        (Interaction::DragDropSelection, MouseEventKind::Down(MouseButton::Left)) => {
            if let Some(index) = option_at(&layout, column, row) {
                run.begin_drag(index, column, row);
            }
        }
        (Interaction::DragDropSelection, MouseEventKind::Drag(MouseButton::Left)) => {
            run.drag_to(column, row);
        }
        (Interaction::DragDropSelection, MouseEventKind::Up(MouseButton::Left)) => {
            let over_target = is_over_drop_target(&layout, column, row);
            run.finish_drag(over_target);
        }
        _ => {}
    }
}
