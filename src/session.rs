use crate::deferred::Deferred;
use crate::models::{AppState, Deck, Flashcard, QuizMode, Score, TagFilter};
use crossterm::event::{KeyCode, KeyEvent};
use rand::Rng;
use rand::seq::SliceRandom;
use std::time::{Duration, Instant};

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(500);

/// Owns the loaded deck and everything the quiz screen shows.
///
/// `position` always indexes into `active_view` when it is non-empty. Every
/// position change clears `revealed`.
#[derive(Debug)]
pub struct QuizSession {
    deck: Deck,
    filter: TagFilter,
    active_view: Vec<Flashcard>,
    position: usize,
    revealed: bool,
    mode: QuizMode,
    score: Score,
    advance_delay: Duration,
    pending_advance: Deferred<()>,
}

/// Read-only view handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSnapshot<'a> {
    pub current_card: Option<&'a Flashcard>,
    pub position: usize,
    pub total_count: usize,
    pub mode: QuizMode,
    pub revealed: bool,
    pub score: Score,
    pub score_percentage: u32,
    pub available_tags: &'a [String],
    pub active_filter: &'a TagFilter,
    pub advance_pending: bool,
}

impl QuizSession {
    pub fn new(deck: Deck) -> Self {
        let active_view = deck.cards().to_vec();
        Self {
            deck,
            filter: TagFilter::All,
            active_view,
            position: 0,
            revealed: false,
            mode: QuizMode::Study,
            score: Score::default(),
            advance_delay: DEFAULT_ADVANCE_DELAY,
            pending_advance: Deferred::default(),
        }
    }

    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.active_view.get(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total_count(&self) -> usize {
        self.active_view.len()
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn active_view(&self) -> &[Flashcard] {
        &self.active_view
    }

    pub fn snapshot(&self) -> QuizSnapshot<'_> {
        QuizSnapshot {
            current_card: self.current_card(),
            position: self.position,
            total_count: self.active_view.len(),
            mode: self.mode,
            revealed: self.revealed,
            score: self.score,
            score_percentage: self.score_percentage(),
            available_tags: self.deck.tags(),
            active_filter: &self.filter,
            advance_pending: self.pending_advance.is_pending(),
        }
    }

    pub fn set_filter(&mut self, filter: TagFilter) {
        self.active_view = self.deck.filtered(&filter);
        log::debug!("Filter set to {:?}: {} cards", filter, self.active_view.len());
        self.filter = filter;
        self.move_to(0);
    }

    /// Leaves position, revealed and score alone.
    pub fn set_mode(&mut self, mode: QuizMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn next(&mut self) {
        self.pending_advance.cancel();
        self.advance();
    }

    pub fn previous(&mut self) {
        if self.position > 0 {
            self.move_to(self.position - 1);
        }
    }

    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::thread_rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.active_view.shuffle(rng);
        self.move_to(0);
    }

    /// Starts scoring over without touching filter, mode or card order.
    pub fn reset(&mut self) {
        self.score = Score::default();
        self.move_to(0);
    }

    pub fn reveal(&mut self) {
        if self.current_card().is_some() {
            self.revealed = true;
        }
    }

    /// Study mode flips the answer; Test mode can only reveal it.
    pub fn toggle_reveal(&mut self) {
        match self.mode {
            QuizMode::Study if self.current_card().is_some() => self.revealed = !self.revealed,
            QuizMode::Study => {}
            QuizMode::Test => self.reveal(),
        }
    }

    /// Grades the current card and schedules the move to the next one.
    /// Ignored outside Test mode or before the answer is revealed.
    pub fn mark_answer(&mut self, is_correct: bool, now: Instant) {
        if self.mode != QuizMode::Test || !self.revealed || self.current_card().is_none() {
            return;
        }

        if is_correct {
            self.score.correct += 1;
        } else {
            self.score.incorrect += 1;
        }
        log::debug!(
            "Card {} marked {}: {}/{}",
            self.position + 1,
            if is_correct { "correct" } else { "incorrect" },
            self.score.correct,
            self.score.total()
        );

        self.pending_advance.schedule(now, self.advance_delay, ());
    }

    pub fn advance_deadline(&self) -> Option<Instant> {
        self.pending_advance.deadline()
    }

    /// Runs the scheduled advance if it is due. Returns whether it ran.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        if self.pending_advance.take_due(now).is_some() {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn score_percentage(&self) -> u32 {
        self.score.percentage()
    }

    fn advance(&mut self) {
        if self.position + 1 < self.active_view.len() {
            self.move_to(self.position + 1);
        }
    }

    fn move_to(&mut self, position: usize) {
        self.pending_advance.cancel();
        self.position = position;
        self.revealed = false;
    }
}

#[derive(Debug, PartialEq)]
pub enum QuizCommand {
    None,
    Quit,
    Export,
}

pub fn handle_quiz_input(
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
    now: Instant,
) -> QuizCommand {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => return QuizCommand::Quit,
        KeyCode::Char('d') => return QuizCommand::Export,
        KeyCode::Char('t') => {
            *app_state = AppState::TagPicker;
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => session.next(),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => session.previous(),
        KeyCode::Char(' ') | KeyCode::Enter => session.toggle_reveal(),
        KeyCode::Char('c') | KeyCode::Char('y') => session.mark_answer(true, now),
        KeyCode::Char('x') | KeyCode::Char('n') => session.mark_answer(false, now),
        KeyCode::Tab => session.toggle_mode(),
        KeyCode::Char('1') => session.set_mode(QuizMode::Study),
        KeyCode::Char('2') => session.set_mode(QuizMode::Test),
        KeyCode::Char('s') => session.shuffle(),
        KeyCode::Char('r') => session.reset(),
        _ => {}
    }
    QuizCommand::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn create_test_session() -> QuizSession {
        let deck = Deck::new(
            vec![
                Flashcard::new("Q1", "A1", "buoys lights"),
                Flashcard::new("Q2", "A2", "buoys"),
                Flashcard::new("Q3", "A3", "charts"),
                Flashcard::new("Q4", "A4", "lights"),
            ],
            String::new(),
        );
        QuizSession::new(deck)
    }

    fn test_mode_session() -> QuizSession {
        let mut session = create_test_session();
        session.set_mode(QuizMode::Test);
        session
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_session_shows_whole_deck() {
        let session = create_test_session();
        assert_eq!(session.total_count(), 4);
        assert_eq!(session.position(), 0);
        assert_eq!(session.current_card().unwrap().front, "Q1");
        assert!(!session.is_revealed());
        assert_eq!(session.mode(), QuizMode::Study);
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut session = create_test_session();
        session.previous();
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_next_at_end_is_noop() {
        let mut session = create_test_session();
        for _ in 0..10 {
            session.next();
        }
        assert_eq!(session.position(), 3);
        session.reveal();
        session.next();
        assert_eq!(session.position(), 3);
        assert!(session.is_revealed());
    }

    #[test]
    fn test_navigation_clears_revealed() {
        let mut session = create_test_session();
        session.reveal();
        session.next();
        assert_eq!(session.position(), 1);
        assert!(!session.is_revealed());

        session.reveal();
        session.previous();
        assert_eq!(session.position(), 0);
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_set_filter_substring_and_reset() {
        let mut session = test_mode_session();
        session.next();
        session.reveal();

        session.set_filter(TagFilter::Tag("light".to_string()));
        assert_eq!(session.total_count(), 2);
        assert_eq!(session.position(), 0);
        assert!(!session.is_revealed());
        assert_eq!(session.current_card().unwrap().front, "Q1");
        assert_eq!(session.mode(), QuizMode::Test);
    }

    #[test]
    fn test_set_filter_with_no_matches() {
        let mut session = create_test_session();
        session.set_filter(TagFilter::Tag("tides".to_string()));
        assert_eq!(session.total_count(), 0);
        assert!(session.current_card().is_none());

        session.next();
        session.previous();
        session.reveal();
        assert_eq!(session.position(), 0);
        assert!(!session.is_revealed());

        session.set_filter(TagFilter::All);
        assert_eq!(session.total_count(), 4);
    }

    #[test]
    fn test_set_mode_preserves_progress() {
        let mut session = test_mode_session();
        session.next();
        session.reveal();
        session.mark_answer(true, Instant::now());

        session.set_mode(QuizMode::Study);
        assert_eq!(session.position(), 1);
        assert!(session.is_revealed());
        assert_eq!(session.score().correct, 1);

        session.toggle_mode();
        assert_eq!(session.mode(), QuizMode::Test);
        assert_eq!(session.score().correct, 1);
    }

    #[test]
    fn test_study_toggle_reveal() {
        let mut session = create_test_session();
        session.toggle_reveal();
        assert!(session.is_revealed());
        session.toggle_reveal();
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_test_mode_reveal_is_idempotent() {
        let mut session = test_mode_session();
        session.reveal();
        session.reveal();
        assert!(session.is_revealed());
        session.toggle_reveal();
        assert!(session.is_revealed());

        session.next();
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_mark_answer_requires_test_mode_and_reveal() {
        let now = Instant::now();
        let mut session = create_test_session();
        session.reveal();
        session.mark_answer(true, now);
        assert_eq!(session.score(), Score::default());

        session.set_mode(QuizMode::Test);
        session.next();
        session.mark_answer(true, now);
        assert_eq!(session.score(), Score::default());
        assert!(session.advance_deadline().is_none());
    }

    #[test]
    fn test_score_percentage() {
        let now = Instant::now();
        let mut session = test_mode_session();
        assert_eq!(session.score_percentage(), 0);

        session.reveal();
        session.mark_answer(true, now);
        session.fire_due(now + DEFAULT_ADVANCE_DELAY);
        session.reveal();
        session.mark_answer(false, now);

        assert_eq!(
            session.score(),
            Score {
                correct: 1,
                incorrect: 1
            }
        );
        assert_eq!(session.score_percentage(), 50);
    }

    #[test]
    fn test_auto_advance_after_delay() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.reveal();
        session.mark_answer(true, now);

        assert_eq!(session.advance_deadline(), Some(now + DEFAULT_ADVANCE_DELAY));
        assert!(session.snapshot().advance_pending);
        assert!(!session.fire_due(now + Duration::from_millis(100)));
        assert_eq!(session.position(), 0);
        assert!(session.is_revealed());

        assert!(session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 1);
        assert!(!session.is_revealed());
        assert!(session.advance_deadline().is_none());
    }

    #[test]
    fn test_auto_advance_uses_configured_delay() {
        let now = Instant::now();
        let delay = Duration::from_millis(50);
        let mut session = create_test_session().with_advance_delay(delay);
        session.set_mode(QuizMode::Test);
        session.reveal();
        session.mark_answer(false, now);
        assert!(session.fire_due(now + delay));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_auto_advance_at_last_card_stays() {
        let now = Instant::now();
        let mut session = test_mode_session();
        for _ in 0..3 {
            session.next();
        }
        session.reveal();
        session.mark_answer(true, now);
        assert!(session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 3);
        assert!(session.is_revealed());
    }

    #[test]
    fn test_filter_change_cancels_auto_advance() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.reveal();
        session.mark_answer(true, now);

        session.set_filter(TagFilter::Tag("buoys".to_string()));
        assert!(session.advance_deadline().is_none());
        assert!(!session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_manual_next_cancels_auto_advance() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.reveal();
        session.mark_answer(true, now);
        session.next();

        assert!(!session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn test_manual_previous_cancels_auto_advance() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.next();
        session.reveal();
        session.mark_answer(true, now);
        session.previous();

        assert!(session.advance_deadline().is_none());
        assert!(!session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_shuffle_cancels_auto_advance() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.reveal();
        session.mark_answer(true, now);
        session.shuffle_with(&mut StdRng::seed_from_u64(3));

        assert!(session.advance_deadline().is_none());
        assert!(!session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_reset_cancels_auto_advance() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.next();
        session.reveal();
        session.mark_answer(false, now);
        session.reset();

        assert!(session.advance_deadline().is_none());
        assert!(!session.fire_due(now + DEFAULT_ADVANCE_DELAY));
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), Score::default());
    }

    #[test]
    fn test_reset_clears_score_keeps_order_and_filter() {
        let now = Instant::now();
        let mut session = test_mode_session();
        session.set_filter(TagFilter::Tag("buoys".to_string()));
        session.reveal();
        session.mark_answer(false, now);
        session.next();
        let order: Vec<Flashcard> = session.active_view().to_vec();

        session.reset();
        assert_eq!(session.score(), Score::default());
        assert_eq!(session.position(), 0);
        assert!(!session.is_revealed());
        assert_eq!(session.active_view(), order.as_slice());
        assert_eq!(session.filter(), &TagFilter::Tag("buoys".to_string()));
        assert_eq!(session.mode(), QuizMode::Test);
    }

    #[test]
    fn test_shuffle_is_permutation_and_resets_position() {
        let mut session = create_test_session();
        session.next();
        session.next();
        session.reveal();

        session.shuffle_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(session.position(), 0);
        assert!(!session.is_revealed());

        let mut fronts: Vec<&str> = session
            .active_view()
            .iter()
            .map(|c| c.front.as_str())
            .collect();
        fronts.sort();
        assert_eq!(fronts, ["Q1", "Q2", "Q3", "Q4"]);
    }

    #[test]
    fn test_snapshot_fields() {
        let mut session = test_mode_session();
        session.set_filter(TagFilter::Tag("buoys".to_string()));
        session.next();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.current_card.map(|c| c.front.as_str()), Some("Q2"));
        assert_eq!(snapshot.position, 1);
        assert_eq!(snapshot.total_count, 2);
        assert_eq!(snapshot.mode, QuizMode::Test);
        assert!(!snapshot.revealed);
        assert_eq!(snapshot.score_percentage, 0);
        assert_eq!(snapshot.available_tags, ["buoys", "charts", "lights"]);
        assert_eq!(snapshot.active_filter, &TagFilter::Tag("buoys".to_string()));
        assert!(!snapshot.advance_pending);
    }

    #[test]
    fn test_handle_quiz_input_keys() {
        let now = Instant::now();
        let mut session = create_test_session();
        let mut state = AppState::Quiz;

        handle_quiz_input(&mut session, key(KeyCode::Right), &mut state, now);
        assert_eq!(session.position(), 1);
        handle_quiz_input(&mut session, key(KeyCode::Up), &mut state, now);
        assert_eq!(session.position(), 0);

        handle_quiz_input(&mut session, key(KeyCode::Char('2')), &mut state, now);
        assert_eq!(session.mode(), QuizMode::Test);
        handle_quiz_input(&mut session, key(KeyCode::Char(' ')), &mut state, now);
        assert!(session.is_revealed());
        handle_quiz_input(&mut session, key(KeyCode::Char('c')), &mut state, now);
        assert_eq!(session.score().correct, 1);

        handle_quiz_input(&mut session, key(KeyCode::Char('t')), &mut state, now);
        assert_eq!(state, AppState::TagPicker);
    }

    #[test]
    fn test_handle_quiz_input_commands() {
        let now = Instant::now();
        let mut session = create_test_session();
        let mut state = AppState::Quiz;

        assert_eq!(
            handle_quiz_input(&mut session, key(KeyCode::Char('q')), &mut state, now),
            QuizCommand::Quit
        );
        assert_eq!(
            handle_quiz_input(&mut session, key(KeyCode::Esc), &mut state, now),
            QuizCommand::Quit
        );
        assert_eq!(
            handle_quiz_input(&mut session, key(KeyCode::Char('d')), &mut state, now),
            QuizCommand::Export
        );
        assert_eq!(
            handle_quiz_input(&mut session, key(KeyCode::Char('s')), &mut state, now),
            QuizCommand::None
        );
        assert_eq!(state, AppState::Quiz);
    }
}
