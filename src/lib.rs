pub mod cli;
pub mod error;
pub mod interface;
pub mod loader;
pub mod logging;
pub mod models;
pub mod sheets;
pub mod shopping;
pub mod state;
pub mod units;
pub mod worker;

pub use error::{Result, ShopError};
pub use models::{AlreadyHave, CalendarWindow, ChosenItem, Food, Recipe};
pub use shopping::{build_shopping_list, BuildOutput, BuildRequest};
