use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::state::settings::Settings;

/// Load settings from a JSON file, filling missing keys with defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Save settings to a JSON file.
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load settings, writing defaults first when the file does not exist.
///
/// An existing file is rewritten so newly added keys appear in it.
pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    if !path.exists() {
        info!("Creating default config {}", path.display());
        let settings = Settings::default();
        save_settings(path, &settings)?;
        return Ok(settings);
    }
    let settings = load_settings(path)?;
    save_settings(path, &settings)?;
    Ok(settings)
}
