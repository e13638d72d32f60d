use crate::models::QuizMode;
use crate::session::QuizSnapshot;
use crate::ui::layout::{QuizLayout, calculate_quiz_chunks};
use crate::utils::progress_ratio;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

pub const TITLE: &str = "⚓ Practical Navigation Quiz";
const SUBTITLE: &str = "Master the fundamentals of marine navigation";

fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Shown until a deck arrives, and whenever the active view is empty.
pub fn draw_loading(f: &mut Frame, snapshot: Option<&QuizSnapshot>) {
    let layout = calculate_quiz_chunks(f.area());
    draw_header(f, layout.header_area);

    let mut text = Text::default();
    match snapshot {
        Some(snapshot) => {
            text.push_line(Line::from(format!(
                "No cards match {}.",
                snapshot.active_filter
            )));
            text.push_line(Line::from(""));
            text.push_line(Line::from(vec![
                Span::from("Press "),
                key_span("t"),
                Span::from(" to pick another topic."),
            ]));
        }
        None => {
            text.push_line(Line::from(Span::styled(
                "Loading flashcards...",
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(body, layout.card_area);

    let help = Paragraph::new(Line::from(vec![
        key_span("q"),
        Span::from(" Quit"),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, layout.help_area);
}

pub fn draw_quiz(f: &mut Frame, snapshot: &QuizSnapshot, status: Option<&str>) {
    let layout = calculate_quiz_chunks(f.area());
    let Some(card) = snapshot.current_card else {
        draw_loading(f, Some(snapshot));
        return;
    };

    draw_header(f, layout.header_area);
    draw_status(f, &layout, snapshot, status);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::DarkGray))
        .ratio(progress_ratio(snapshot.position, snapshot.total_count))
        .label(format!(
            "Card {} of {}",
            snapshot.position + 1,
            snapshot.total_count
        ));
    f.render_widget(gauge, layout.progress_area);

    let (title, body) = if snapshot.revealed {
        ("Answer:", card.back.as_str())
    } else {
        ("Question:", card.front.as_str())
    };
    let mut text = Text::default();
    text.push_line(Line::from(body));
    if !card.tags.is_empty() {
        text.push_line(Line::from(""));
        text.push_line(Line::from(Span::styled(
            format!("Tags: {}", card.tags),
            Style::default().fg(Color::LightBlue),
        )));
    }
    let card_style = if snapshot.revealed {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    let card_widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(card_style)
                .title(Span::styled(title, card_style.add_modifier(Modifier::BOLD))),
        );
    f.render_widget(card_widget, layout.card_area);

    draw_help(f, layout.help_area, snapshot);
}

fn draw_status(f: &mut Frame, layout: &QuizLayout, snapshot: &QuizSnapshot, status: Option<&str>) {
    let mut spans = vec![
        Span::styled(
            format!(
                "{} ({} cards)",
                snapshot.active_filter, snapshot.total_count
            ),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::from("  |  "),
        Span::styled(
            snapshot.mode.to_string(),
            Style::default().fg(match snapshot.mode {
                QuizMode::Study => Color::Blue,
                QuizMode::Test => Color::Green,
            }),
        ),
    ];

    if snapshot.mode == QuizMode::Test {
        spans.extend([
            Span::from("  |  "),
            Span::styled(
                format!("✓ {}", snapshot.score.correct),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::from(" "),
            Span::styled(
                format!("✗ {}", snapshot.score.incorrect),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::from(" "),
            Span::styled(
                format!("{}% correct", snapshot.score_percentage),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
    }

    if let Some(status) = status {
        spans.extend([
            Span::from("  |  "),
            Span::styled(status.to_string(), Style::default().fg(Color::Yellow)),
        ]);
    }

    let widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(widget, layout.status_area);
}

fn draw_help(f: &mut Frame, area: Rect, snapshot: &QuizSnapshot) {
    let card_spans = match (snapshot.mode, snapshot.revealed) {
        (QuizMode::Study, false) => vec![key_span("Space"), Span::from(" Show Answer")],
        (QuizMode::Study, true) => vec![key_span("Space"), Span::from(" Hide Answer")],
        (QuizMode::Test, false) => vec![key_span("Space"), Span::from(" Reveal Answer")],
        (QuizMode::Test, true) => vec![
            key_span("c"),
            Span::from(" Correct  "),
            key_span("x"),
            Span::from(" Incorrect"),
        ],
    };

    let nav_spans = vec![
        key_span("←/→"),
        Span::from(" Previous/Next  "),
        key_span("Tab"),
        Span::from(" Mode  "),
        key_span("t"),
        Span::from(" Topic  "),
        key_span("s"),
        Span::from(" Shuffle  "),
        key_span("r"),
        Span::from(" Reset  "),
        key_span("d"),
        Span::from(" Export  "),
        key_span("q"),
        Span::from(" Quit"),
    ];

    let help = Paragraph::new(vec![Line::from(card_spans), Line::from(nav_spans)])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
