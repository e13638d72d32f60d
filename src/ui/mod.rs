pub mod layout;
mod quiz;
mod tag_picker;

pub use layout::{calculate_quiz_chunks, centered_rect};
pub use quiz::{TITLE, draw_loading, draw_quiz};
pub use tag_picker::{draw_tag_picker, option_label};
