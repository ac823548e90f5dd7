use crate::logger;
use crate::models::Interaction;
use crate::session::{Advance, AdvanceTicket, QuizSession, Submission};
use crate::timer::{AdvanceScheduler, ScheduledAdvance};

/// An option being carried towards the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub index: usize,
    pub column: u16,
    pub row: u16,
    /// Picked up with the keyboard rather than the mouse.
    pub from_keyboard: bool,
}

/// One play-through on screen: the session, its pending timer, and pointer state.
#[derive(Debug)]
pub struct QuizRun {
    session: QuizSession,
    scheduler: AdvanceScheduler,
    pending: Option<ScheduledAdvance>,
    cursor: usize,
    drag: Option<DragState>,
}

impl QuizRun {
    pub fn new(session: QuizSession, scheduler: AdvanceScheduler) -> Self {
        Self {
            session,
            scheduler,
            pending: None,
            cursor: 0,
            drag: None,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn interaction(&self) -> Interaction {
        self.session.interaction()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.is_some()
    }

    fn option_count(&self) -> usize {
        self.session
            .current_question()
            .map(|q| q.choices().len())
            .unwrap_or(0)
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
        self.follow_cursor_with_drag();
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor < self.option_count().saturating_sub(1) {
            self.cursor += 1;
        }
        self.follow_cursor_with_drag();
    }

    pub fn set_cursor(&mut self, index: usize) {
        if index < self.option_count() {
            self.cursor = index;
        }
    }

    fn follow_cursor_with_drag(&mut self) {
        if let Some(drag) = self.drag.as_mut()
            && drag.from_keyboard
        {
            drag.index = self.cursor;
        }
    }

    /// Click or keyboard pick of an option.
    pub fn choose(&mut self, index: usize) -> Submission {
        self.submit(index)
    }

    /// An option released over the drop target.
    pub fn drop_on_target(&mut self, index: usize) -> Submission {
        self.drag = None;
        self.submit(index)
    }

    fn submit(&mut self, index: usize) -> Submission {
        let question = self.session.current_index() + 1;
        let option = index.saturating_add(1);
        let submission = self.session.submit_answer(index);
        match submission {
            Submission::Scheduled { correct, ticket } => {
                // The session is already waiting on this ticket; arm the timer first.
                self.pending = Some(self.scheduler.schedule(ticket));
                logger::log(&format!(
                    "Question {}: option {} is {}",
                    question,
                    option,
                    if correct { "correct" } else { "incorrect" }
                ));
            }
            Submission::Rejected => {
                logger::log(&format!(
                    "Question {}: dropped option {} rejected, waiting for another try",
                    question, option
                ));
            }
            Submission::Ignored => {
                logger::log(&format!(
                    "Question {}: option {} ignored, session not accepting answers",
                    question, option
                ));
            }
        }
        submission
    }

    pub fn on_advance(&mut self, ticket: AdvanceTicket) -> Advance {
        let advance = self.session.complete_advance(ticket);
        if self.pending.as_ref().is_some_and(|p| p.ticket() == ticket) {
            self.pending = None;
        }
        match advance {
            Advance::Stale => {
                logger::log(&format!(
                    "Ignoring stale advance for question {}",
                    ticket.question() + 1
                ));
            }
            Advance::NextQuestion => {
                self.cursor = 0;
                self.drag = None;
            }
            Advance::Finished => {
                self.drag = None;
                logger::log(&format!(
                    "Quiz finished with {} of {} points",
                    self.session.score(),
                    self.session.questions().len()
                ));
            }
        }
        advance
    }

    pub fn restart(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
        self.session.restart();
        self.cursor = 0;
        self.drag = None;
        logger::log(&format!("Restarted deck {}", self.session.deck().name()));
    }

    /// Leaves the run for good; a timer still in flight is cancelled.
    pub fn end(mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    pub fn begin_drag(&mut self, index: usize, column: u16, row: u16) -> bool {
        if !self.session.is_accepting_answers() || index >= self.option_count() {
            return false;
        }
        self.cursor = index;
        self.drag = Some(DragState {
            index,
            column,
            row,
            from_keyboard: false,
        });
        true
    }

    pub fn drag_to(&mut self, column: u16, row: u16) {
        if let Some(drag) = self.drag.as_mut() {
            drag.column = column;
            drag.row = row;
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Ends a pointer drag; only a release over the target counts as a drop.
    pub fn finish_drag(&mut self, over_target: bool) -> Option<Submission> {
        let drag = self.drag.take()?;
        if over_target {
            Some(self.drop_on_target(drag.index))
        } else {
            None
        }
    }

    /// Keyboard pick-up and put-down of the highlighted option.
    pub fn toggle_keyboard_drag(&mut self) {
        if self.drag.is_some() {
            self.drag = None;
        } else if self.session.is_accepting_answers() && self.cursor < self.option_count() {
            self.drag = Some(DragState {
                index: self.cursor,
                column: 0,
                row: 0,
                from_keyboard: true,
            });
        }
    }
}
