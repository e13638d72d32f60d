use crate::models::{AppState, Deck, TagFilter};
use crate::session::QuizSession;
use crossterm::event::{KeyCode, KeyEvent};

/// Selection state of the topic popup. Entry 0 is "all topics", entry `i`
/// is the deck's `i - 1`th tag.
#[derive(Debug, Default)]
pub struct TagPicker {
    pub selected: usize,
}

impl TagPicker {
    pub fn options(deck: &Deck) -> Vec<TagFilter> {
        std::iter::once(TagFilter::All)
            .chain(deck.tags().iter().cloned().map(TagFilter::Tag))
            .collect()
    }

    /// Opens with the active filter highlighted.
    pub fn open(deck: &Deck, active: &TagFilter) -> Self {
        let selected = Self::options(deck)
            .iter()
            .position(|option| option == active)
            .unwrap_or(0);
        Self { selected }
    }
}

pub fn handle_tag_picker_input(
    picker: &mut TagPicker,
    session: &mut QuizSession,
    key: KeyEvent,
    app_state: &mut AppState,
) {
    let options = TagPicker::options(session.deck());
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if picker.selected > 0 {
                picker.selected -= 1;
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if picker.selected < options.len().saturating_sub(1) {
                picker.selected += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(filter) = options.into_iter().nth(picker.selected) {
                log::info!("Selected topic {}", filter);
                session.set_filter(filter);
            }
            *app_state = AppState::Quiz;
        }
        KeyCode::Esc | KeyCode::Char('t') => {
            *app_state = AppState::Quiz;
        }
        _ => {}
    }
}
