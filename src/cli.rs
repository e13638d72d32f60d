use crate::csv::DEFAULT_DECK_PATH;
use crate::logger::DEFAULT_LOG_FILE;
use crate::models::{QuizMode, TagFilter};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Page through a deck of tagged flashcards in study or test mode.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Deck file: a header row, then `front,back,tags` rows.
    #[arg(long, default_value = DEFAULT_DECK_PATH)]
    pub deck: PathBuf,

    /// Milliseconds to wait after grading a card before moving on.
    #[arg(long, default_value_t = 500)]
    pub advance_delay_ms: u64,

    /// Where log output goes.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Copy the deck file unmodified to this path and exit.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Mode to start in.
    #[arg(long, value_enum, default_value_t = QuizMode::Study)]
    pub mode: QuizMode,

    /// Only show cards whose tags contain this text.
    #[arg(long)]
    pub tag: Option<String>,
}

impl Args {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    /// A blank `--tag` would match nothing, so it counts as no filter.
    pub fn initial_filter(&self) -> TagFilter {
        match self.tag.as_deref().map(str::trim) {
            None | Some("" | "all") => TagFilter::All,
            Some(tag) => TagFilter::Tag(tag.to_string()),
        }
    }
}
