pub mod app;
pub mod cli;
pub mod csv;
pub mod deferred;
pub mod error;
pub mod logger;
pub mod models;
pub mod picker;
pub mod session;
pub mod ui;
pub mod utils;


// Re-exports for convenience
pub use csv::{export_deck, load_deck, parse_csv_line, parse_deck};
pub use error::{AppError, LoadError};
pub use models::{AppState, Deck, Flashcard, QuizMode, Score, TagFilter};
pub use session::{QuizSession, QuizSnapshot, handle_quiz_input};
