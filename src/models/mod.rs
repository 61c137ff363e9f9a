pub mod already_have;
pub mod calendar;
pub mod chosen;
pub mod food;
pub mod recipe;

pub use already_have::AlreadyHave;
pub use calendar::{day_shortstr, is_weekday_name, CalendarWindow, WEEKDAY_NAMES};
pub use chosen::ChosenItem;
pub use food::Food;
pub use recipe::Recipe;
