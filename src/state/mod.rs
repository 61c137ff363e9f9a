mod persistence;
mod settings;

pub use persistence::{load_or_init, load_settings, save_settings};
pub use settings::Settings;
