use crate::models::{Deck, TagFilter};
use crate::picker::TagPicker;
use crate::ui::layout::centered_rect;
use crate::utils::truncate_to_width;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

const POPUP_WIDTH: u16 = 44;

pub fn option_label(deck: &Deck, filter: &TagFilter) -> String {
    match filter {
        TagFilter::All => format!("All Topics ({} cards)", deck.len()),
        TagFilter::Tag(_) => format!("{} ({})", filter, deck.count_matching(filter)),
    }
}

/// Rows for `options` entries plus the border, saturating at `u16::MAX`.
fn popup_height(options: usize) -> u16 {
    u16::try_from(options)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
}

/// The list scrolls so the selected topic stays inside the popup.
pub fn draw_tag_picker(f: &mut Frame, deck: &Deck, picker: &TagPicker) {
    let options = TagPicker::options(deck);
    let area = centered_rect(f.area(), POPUP_WIDTH, popup_height(options.len()));

    let items: Vec<ListItem> = options
        .iter()
        .map(|filter| {
            ListItem::new(truncate_to_width(
                &option_label(deck, filter),
                (POPUP_WIDTH - 2) as usize,
            ))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter by Topic (Enter select, Esc cancel)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
    let mut state = ListState::default().with_selected(Some(picker.selected));

    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}
