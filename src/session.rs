use crate::deck::Deck;
use crate::models::{Interaction, Phase, Question};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared by every session in the process, so no two runs hand out equal tickets.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(0);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Identifies one scheduled advance. Tickets from before a restart never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdvanceTicket {
    generation: u64,
    question: usize,
}

impl AdvanceTicket {
    pub fn question(&self) -> usize {
        self.question
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Not accepting answers right now; nothing changed.
    Ignored,
    /// Wrong drop in drag-and-drop mode; the player stays on the question.
    Rejected,
    /// The answer was taken; `ticket` must be fed back after the delay.
    Scheduled { correct: bool, ticket: AdvanceTicket },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    NextQuestion,
    Finished,
    Stale,
}

/// Everything the screen shows about a session, comparable for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_index: usize,
    pub score: usize,
    pub phase: Phase,
    pub pending_selection: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    ticket: AdvanceTicket,
    correct: bool,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    deck: Deck,
    interaction: Interaction,
    current_index: usize,
    score: usize,
    phase: Phase,
    pending_selection: Option<usize>,
    pending: Option<PendingAdvance>,
    generation: u64,
}

impl QuizSession {
    pub fn new(deck: Deck, interaction: Interaction) -> Self {
        Self {
            deck,
            interaction,
            current_index: 0,
            score: 0,
            phase: Phase::Answering,
            pending_selection: None,
            pending: None,
            generation: next_generation(),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn questions(&self) -> &[Question] {
        self.deck.questions()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pending_selection(&self) -> Option<usize> {
        self.pending_selection
    }

    /// `None` once the session is finished.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions().get(self.current_index)
    }

    pub fn is_awaiting_advance(&self) -> bool {
        self.pending.is_some()
    }

    /// A point that will be credited when the pending advance resolves.
    pub fn has_pending_point(&self) -> bool {
        self.pending.is_some_and(|p| p.correct)
    }

    pub fn is_accepting_answers(&self) -> bool {
        self.phase == Phase::Answering && self.pending.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_perfect(&self) -> bool {
        self.is_finished() && self.score == self.questions().len()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current_index,
            score: self.score,
            phase: self.phase,
            pending_selection: self.pending_selection,
        }
    }

    pub fn submit_answer(&mut self, selected: usize) -> Submission {
        if !self.is_accepting_answers() {
            return Submission::Ignored;
        }
        let Some(question) = self.current_question() else {
            return Submission::Ignored;
        };

        let correct = question.is_correct(selected);
        if !correct && !self.interaction.advances_on_incorrect() {
            return Submission::Rejected;
        }

        let ticket = AdvanceTicket {
            generation: self.generation,
            question: self.current_index,
        };
        self.pending = Some(PendingAdvance { ticket, correct });
        self.pending_selection = Some(selected);
        if correct {
            self.phase = Phase::Celebrating;
        }

        Submission::Scheduled { correct, ticket }
    }

    /// Applies the deferred transition for `ticket` if it is still the pending one.
    pub fn complete_advance(&mut self, ticket: AdvanceTicket) -> Advance {
        let pending = match self.pending {
            Some(pending) if pending.ticket == ticket => pending,
            _ => return Advance::Stale,
        };

        self.pending = None;
        self.pending_selection = None;
        if pending.correct {
            self.score += 1;
        }

        if self.current_index + 1 < self.questions().len() {
            self.current_index += 1;
            self.phase = Phase::Answering;
            Advance::NextQuestion
        } else {
            self.current_index = self.questions().len();
            self.phase = Phase::Finished;
            Advance::Finished
        }
    }

    /// Back to the first question with the same question order.
    pub fn restart(&mut self) {
        self.generation = next_generation();
        self.current_index = 0;
        self.score = 0;
        self.phase = Phase::Answering;
        self.pending_selection = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_question_deck() -> Deck {
        let correct = [1, 2, 1, 3];
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Question::new(
                    format!("Question {}", i + 1),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    *c,
                    None,
                )
                .unwrap()
            })
            .collect();
        Deck::new("test", questions).unwrap()
    }

    fn session(interaction: Interaction) -> QuizSession {
        QuizSession::new(four_question_deck(), interaction)
    }

    fn ticket_of(submission: Submission) -> AdvanceTicket {
        match submission {
            Submission::Scheduled { ticket, .. } => ticket,
            other => panic!("expected a scheduled advance, got {other:?}"),
        }
    }

    fn assert_invariants(s: &QuizSession) {
        assert!(s.score() <= s.current_index());
        assert!(s.current_index() <= s.questions().len());
    }

    fn play(s: &mut QuizSession, answers: &[usize]) {
        for answer in answers {
            let ticket = ticket_of(s.submit_answer(*answer));
            assert_invariants(s);
            s.complete_advance(ticket);
            assert_invariants(s);
        }
    }

    #[test]
    fn test_new_session_starts_answering() {
        let s = session(Interaction::ChoiceSelection);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Answering);
        assert_eq!(s.pending_selection(), None);
        assert!(s.is_accepting_answers());
    }

    #[test]
    fn test_correct_answer_celebrates_then_advances() {
        let mut s = session(Interaction::ChoiceSelection);
        let submission = s.submit_answer(1);
        assert!(matches!(submission, Submission::Scheduled { correct: true, .. }));
        assert_eq!(s.phase(), Phase::Celebrating);
        assert_eq!(s.pending_selection(), Some(1));
        assert!(s.has_pending_point());
        assert_invariants(&s);

        assert_eq!(s.complete_advance(ticket_of(submission)), Advance::NextQuestion);
        assert_eq!(s.score(), 1);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.phase(), Phase::Answering);
        assert_eq!(s.pending_selection(), None);
    }

    #[test]
    fn test_wrong_choice_advances_without_scoring() {
        let mut s = session(Interaction::ChoiceSelection);
        let submission = s.submit_answer(0);
        assert!(matches!(submission, Submission::Scheduled { correct: false, .. }));
        assert_eq!(s.phase(), Phase::Answering);
        assert!(s.is_awaiting_advance());
        assert!(!s.has_pending_point());

        s.complete_advance(ticket_of(submission));
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_out_of_range_choice_is_just_wrong() {
        let mut s = session(Interaction::ChoiceSelection);
        let submission = s.submit_answer(42);
        assert!(matches!(submission, Submission::Scheduled { correct: false, .. }));
        s.complete_advance(ticket_of(submission));
        assert_eq!(s.score(), 0);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_submit_while_celebrating_is_ignored() {
        let mut s = session(Interaction::ChoiceSelection);
        s.submit_answer(1);
        let before = s.snapshot();

        assert_eq!(s.submit_answer(1), Submission::Ignored);
        assert_eq!(s.submit_answer(0), Submission::Ignored);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_submit_while_wrong_answer_pending_is_ignored() {
        let mut s = session(Interaction::ChoiceSelection);
        let first = ticket_of(s.submit_answer(3));
        let before = s.snapshot();

        assert_eq!(s.submit_answer(1), Submission::Ignored);
        assert_eq!(s.snapshot(), before);

        s.complete_advance(first);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_all_correct_scores_four() {
        let mut s = session(Interaction::ChoiceSelection);
        play(&mut s, &[1, 2, 1, 3]);
        assert_eq!(s.score(), 4);
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.current_index(), 4);
        assert!(s.is_perfect());
        assert!(s.current_question().is_none());
    }

    #[test]
    fn test_all_wrong_finishes_with_zero() {
        let mut s = session(Interaction::ChoiceSelection);
        play(&mut s, &[0, 0, 0, 0]);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.current_index(), 4);
        assert!(!s.is_perfect());
    }

    #[test]
    fn test_submit_after_finish_is_ignored() {
        let mut s = session(Interaction::ChoiceSelection);
        play(&mut s, &[1, 2, 1, 3]);
        assert_eq!(s.submit_answer(1), Submission::Ignored);
        assert_eq!(s.score(), 4);
    }

    #[test]
    fn test_index_advances_by_exactly_one() {
        let mut s = session(Interaction::ChoiceSelection);
        for expected in 1..4 {
            let ticket = ticket_of(s.submit_answer(0));
            s.complete_advance(ticket);
            assert_eq!(s.current_index(), expected);
        }
    }

    #[test]
    fn test_completing_same_ticket_twice_is_stale() {
        let mut s = session(Interaction::ChoiceSelection);
        let ticket = ticket_of(s.submit_answer(1));
        assert_eq!(s.complete_advance(ticket), Advance::NextQuestion);
        assert_eq!(s.complete_advance(ticket), Advance::Stale);
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_restart_resets_from_any_phase() {
        let mut s = session(Interaction::ChoiceSelection);
        s.submit_answer(1);
        assert_eq!(s.phase(), Phase::Celebrating);
        s.restart();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Answering);
        assert!(s.is_accepting_answers());

        play(&mut s, &[1, 2, 1, 3]);
        s.restart();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Answering);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut once = session(Interaction::ChoiceSelection);
        play(&mut once, &[1, 0]);
        let mut twice = once.clone();

        once.restart();
        twice.restart();
        twice.restart();
        assert_eq!(once.snapshot(), twice.snapshot());
    }

    #[test]
    fn test_restart_keeps_question_order() {
        let mut s = session(Interaction::ChoiceSelection);
        let before: Vec<String> = s.questions().iter().map(|q| q.prompt().to_string()).collect();
        play(&mut s, &[1, 2]);
        s.restart();
        let after: Vec<String> = s.questions().iter().map(|q| q.prompt().to_string()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_stale_ticket_after_restart_has_no_effect() {
        let mut s = session(Interaction::ChoiceSelection);
        let stale = ticket_of(s.submit_answer(1));
        s.restart();

        assert_eq!(s.complete_advance(stale), Advance::Stale);
        assert_eq!(s.snapshot(), session(Interaction::ChoiceSelection).snapshot());

        // Same question index as the stale ticket, new generation.
        let fresh = ticket_of(s.submit_answer(1));
        assert_ne!(fresh, stale);
        assert_eq!(s.complete_advance(stale), Advance::Stale);
        assert_eq!(s.phase(), Phase::Celebrating);
        assert_eq!(s.complete_advance(fresh), Advance::NextQuestion);
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_ticket_from_another_session_is_stale() {
        let mut ended = session(Interaction::ChoiceSelection);
        let old = ticket_of(ended.submit_answer(1));

        let mut s = session(Interaction::ChoiceSelection);
        assert_eq!(s.complete_advance(old), Advance::Stale);

        let fresh = ticket_of(s.submit_answer(1));
        assert_ne!(fresh, old);
        assert_eq!(s.complete_advance(old), Advance::Stale);
        assert_eq!(s.phase(), Phase::Celebrating);
        assert_eq!(s.complete_advance(fresh), Advance::NextQuestion);
    }

    #[test]
    fn test_drag_wrong_drop_is_rejected_without_change() {
        let mut s = session(Interaction::DragDropSelection);
        let before = s.snapshot();

        assert_eq!(s.submit_answer(0), Submission::Rejected);
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Answering);
        assert!(s.is_accepting_answers());
    }

    #[test]
    fn test_drag_retry_after_wrong_drop() {
        let mut s = session(Interaction::DragDropSelection);
        assert_eq!(s.submit_answer(0), Submission::Rejected);
        assert_eq!(s.submit_answer(3), Submission::Rejected);

        let submission = s.submit_answer(1);
        assert!(matches!(submission, Submission::Scheduled { correct: true, .. }));
        assert_eq!(s.phase(), Phase::Celebrating);

        assert_eq!(s.complete_advance(ticket_of(submission)), Advance::NextQuestion);
        assert_eq!(s.score(), 1);
        assert_eq!(s.current_index(), 1);
    }

    #[test]
    fn test_drag_full_run_is_always_perfect() {
        let mut s = session(Interaction::DragDropSelection);
        for (wrong, right) in [(0, 1), (0, 2), (3, 1), (0, 3)] {
            assert_eq!(s.submit_answer(wrong), Submission::Rejected);
            let ticket = ticket_of(s.submit_answer(right));
            s.complete_advance(ticket);
            assert_invariants(&s);
        }
        assert!(s.is_perfect());
    }
}
