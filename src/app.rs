use crate::cli::Args;
use crate::csv::{export_deck, export_path_for, load_deck};
use crate::error::{AppError, LoadError};
use crate::models::{AppState, Deck, QuizMode, TagFilter};
use crate::picker::{TagPicker, handle_tag_picker_input};
use crate::session::{QuizCommand, QuizSession, handle_quiz_input};
use crate::ui::{draw_loading, draw_quiz, draw_tag_picker};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::task::JoinError;

/// Everything the event loop owns. The session stays `None` until the deck
/// has been read; a failed read leaves it `None` for good.
pub struct App {
    pub state: AppState,
    pub session: Option<QuizSession>,
    pub picker: TagPicker,
    pub status: Option<String>,
    deck_path: PathBuf,
    export_dir: PathBuf,
    advance_delay: Duration,
    initial_mode: QuizMode,
    initial_filter: TagFilter,
}

impl App {
    pub fn new(args: &Args) -> Self {
        Self {
            state: AppState::Loading,
            session: None,
            picker: TagPicker::default(),
            status: None,
            deck_path: args.deck.clone(),
            export_dir: PathBuf::new(),
            advance_delay: args.advance_delay(),
            initial_mode: args.mode,
            initial_filter: args.initial_filter(),
        }
    }

    /// Directory the `d` key exports into; the working directory by default.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn install_deck(&mut self, deck: Deck) {
        let mut session = QuizSession::new(deck).with_advance_delay(self.advance_delay);
        session.set_mode(self.initial_mode);
        if self.initial_filter != TagFilter::All {
            session.set_filter(self.initial_filter.clone());
        }
        self.session = Some(session);
        self.state = AppState::Quiz;
    }

    pub fn on_loaded(&mut self, result: Result<Result<Deck, LoadError>, JoinError>) {
        let result = result.map_err(|e| LoadError::Interrupted(e.to_string()));
        match result.and_then(|loaded| loaded) {
            Ok(deck) => self.install_deck(deck),
            Err(e) => {
                // No retry: the screen keeps saying it is loading.
                log::error!("Could not load flashcards: {e}");
            }
        }
    }

    pub fn advance_deadline(&self) -> Option<Instant> {
        self.session.as_ref().and_then(QuizSession::advance_deadline)
    }

    pub fn fire_due(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.fire_due(now);
        }
    }

    pub fn draw(&self, f: &mut Frame) {
        match (&self.state, &self.session) {
            (AppState::Quiz, Some(session)) => {
                draw_quiz(f, &session.snapshot(), self.status.as_deref());
            }
            (AppState::TagPicker, Some(session)) => {
                draw_quiz(f, &session.snapshot(), self.status.as_deref());
                draw_tag_picker(f, session.deck(), &self.picker);
            }
            _ => draw_loading(f, None),
        }
    }

    /// Returns `false` once the user asked to quit.
    pub async fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }

        let Some(session) = self.session.as_mut() else {
            return !matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
        };

        match self.state {
            AppState::Quiz => {
                self.status = None;
                match handle_quiz_input(session, key, &mut self.state, now) {
                    QuizCommand::Quit => return false,
                    QuizCommand::Export => {
                        let dest = self.export_dir.join(export_path_for(&self.deck_path));
                        self.status = Some(match export_deck(session.deck(), &dest).await {
                            Ok(()) => format!("Saved {}", dest.display()),
                            Err(e) => {
                                log::error!("{e}");
                                "Export failed, see log".to_string()
                            }
                        });
                    }
                    QuizCommand::None => {}
                }
                if self.state == AppState::TagPicker {
                    self.picker = TagPicker::open(session.deck(), session.filter());
                }
            }
            AppState::TagPicker => {
                handle_tag_picker_input(&mut self.picker, session, key, &mut self.state);
            }
            AppState::Loading => {}
        }
        true
    }
}

pub async fn run<B: Backend>(terminal: &mut Terminal<B>, args: &Args) -> Result<(), AppError> {
    let mut app = App::new(args);

    let deck_path = args.deck.clone();
    log::info!("Loading flashcards from {}", deck_path.display());
    let mut load = tokio::spawn(async move { load_deck(&deck_path).await });
    let mut loading = true;
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| app.draw(f))?;

        let deadline = app.advance_deadline();
        let wake = deadline
            .map(tokio::time::Instant::from_std)
            .unwrap_or_else(tokio::time::Instant::now);

        tokio::select! {
            result = &mut load, if loading => {
                loading = false;
                app.on_loaded(result);
            }
            _ = tokio::time::sleep_until(wake), if deadline.is_some() => {
                app.fire_due(Instant::now());
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if !app.handle_key(key, Instant::now()).await {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }
    }

    if loading {
        load.abort();
    }
    log::info!("Quitting");
    Ok(())
}
