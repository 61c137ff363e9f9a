pub mod prompts;
pub mod render;

pub use prompts::{prompt_already_have, prompt_weekdays, prompt_yes_no};
pub use render::{display_names, display_sheets, display_summary};
