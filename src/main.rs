use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use navigation_flashcard_quiz::{AppError, app, cli::Args, export_deck, load_deck, logger};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    logger::init(&args.log_file)?;

    if let Some(dest) = &args.export {
        let deck = load_deck(&args.deck).await?;
        export_deck(&deck, dest).await?;
        println!("Exported {} to {}", args.deck.display(), dest.display());
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app::run(&mut terminal, &args).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
