use crate::error::AppError;
use std::fs::OpenOptions;
use std::path::Path;

pub const DEFAULT_LOG_FILE: &str = "quiz_debug.log";

/// Routes the `log` macros to an append-only file, since the terminal belongs
/// to the UI. `RUST_LOG` picks the level, `info` otherwise.
pub fn init(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| AppError::Logger {
            path: path.to_path_buf(),
            source,
        })?;

    let env = env_logger::Env::default().default_filter_or("info");
    let installed = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .write_style(env_logger::WriteStyle::Never)
        .try_init();
    if installed.is_err() {
        log::warn!("Logger already initialised, keeping the existing one");
    }
    Ok(())
}
