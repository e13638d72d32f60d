use crate::error::{AppError, LoadError};
use crate::models::{Deck, Flashcard};
use std::path::{Path, PathBuf};

pub const DEFAULT_DECK_PATH: &str = "navigation_flashcard_quiz.csv";

pub async fn load_deck(path: &Path) -> Result<Deck, LoadError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let deck = parse_deck(&content);
    log::info!(
        "Loaded {} cards with {} tags from {}",
        deck.len(),
        deck.tags().len(),
        path.display()
    );
    Ok(deck)
}

/// Writes the text the deck was loaded from, unmodified.
pub async fn export_deck(deck: &Deck, dest: &Path) -> Result<(), AppError> {
    tokio::fs::write(dest, deck.source())
        .await
        .map_err(|source| AppError::Export {
            path: dest.to_path_buf(),
            source,
        })?;
    log::info!("Exported deck to {}", dest.display());
    Ok(())
}

/// Where `d` in the quiz writes the export: `exported_<deck file name>` in the
/// working directory.
pub fn export_path_for(deck_path: &Path) -> PathBuf {
    let name = deck_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_DECK_PATH.to_string());
    PathBuf::from(format!("exported_{name}"))
}

pub fn parse_deck(content: &str) -> Deck {
    let mut flashcards = Vec::new();

    // First line is the header.
    for (line_no, raw) in content.split('\n').enumerate().skip(1) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = parse_csv_line(line).into_iter();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(front), Some(back), Some(tags)) => {
                flashcards.push(Flashcard { front, back, tags });
            }
            _ => {
                log::debug!("Skipping line {} with fewer than 3 fields", line_no + 1);
            }
        }
    }

    Deck::new(flashcards, content.to_string())
}

/// Splits one line on commas outside quotes. Quote characters only toggle
/// quoting and are dropped; every field is trimmed.
pub fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }
    fields.push(current.trim().to_string());

    fields
}
