use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::models::{is_weekday_name, AlreadyHave};
use crate::sheets::SheetLayout;
use crate::shopping::BuildRequest;

/// User settings persisted between runs. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Already-have names and whether each is currently enabled.
    pub names: BTreeMap<String, bool>,

    /// Plan workbook name to the weekday names used from it (empty = all).
    pub sheets: BTreeMap<String, Vec<String>>,

    pub threaded: bool,
    pub filename: String,
    pub output_dir: PathBuf,
    pub data_dir: PathBuf,
    pub catalog_workbook: String,
    pub layout: SheetLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            names: BTreeMap::new(),
            sheets: BTreeMap::new(),
            threaded: true,
            filename: "shopping_list".to_string(),
            output_dir: PathBuf::from("."),
            data_dir: PathBuf::from("sheets"),
            catalog_workbook: "Food List".to_string(),
            layout: SheetLayout::default(),
        }
    }
}

impl Settings {
    /// Enabled already-have names.
    pub fn already_have(&self) -> AlreadyHave {
        AlreadyHave::from_names(
            self.names
                .iter()
                .filter(|(_, enabled)| **enabled)
                .map(|(name, _)| name),
        )
    }

    /// `<output_dir>/<filename>.txt`
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.filename).with_extension("txt")
    }

    pub fn build_request(&self, today: NaiveDate) -> BuildRequest {
        BuildRequest {
            sheets: self.sheets.clone(),
            catalog_workbook: self.catalog_workbook.clone(),
            layout: self.layout.clone(),
            already_have: self.already_have(),
            today,
        }
    }

    fn find_name(&self, name: &str) -> Option<String> {
        let wanted = name.to_lowercase();
        self.names.keys().find(|n| n.to_lowercase() == wanted).cloned()
    }

    /// Add an enabled already-have name; names are unique case-insensitively.
    pub fn add_name(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShopError::InvalidInput("Name cannot be empty".to_string()));
        }
        if let Some(existing) = self.find_name(name) {
            return Err(ShopError::InvalidInput(format!("{} already in list!", existing)));
        }
        self.names.insert(name.to_string(), true);
        Ok(())
    }

    /// Enable a name, adding it if needed. Returns false when it was already enabled.
    pub fn enable_name(&mut self, name: &str) -> bool {
        match self.find_name(name) {
            Some(existing) => {
                let enabled = self.names.entry(existing).or_insert(true);
                let changed = !*enabled;
                *enabled = true;
                changed
            }
            None => {
                self.names.insert(name.trim().to_string(), true);
                true
            }
        }
    }

    pub fn remove_name(&mut self, name: &str) -> Result<()> {
        let existing = self
            .find_name(name)
            .ok_or_else(|| ShopError::InvalidInput(format!("{} not in list", name)))?;
        self.names.remove(&existing);
        Ok(())
    }

    /// Flip a name's enabled flag, returning the new state.
    pub fn toggle_name(&mut self, name: &str) -> Result<bool> {
        let existing = self
            .find_name(name)
            .ok_or_else(|| ShopError::InvalidInput(format!("{} not in list", name)))?;
        let enabled = self.names.entry(existing).or_insert(false);
        *enabled = !*enabled;
        Ok(*enabled)
    }

    fn find_sheet(&self, name: &str) -> Option<String> {
        let wanted = name.trim().to_lowercase();
        self.sheets.keys().find(|s| s.to_lowercase() == wanted).cloned()
    }

    /// Add a plan sheet. `days` must be full weekday names; empty means all.
    pub fn add_sheet(&mut self, name: &str, days: Vec<String>) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ShopError::InvalidInput("Sheet name cannot be empty".to_string()));
        }
        if let Some(existing) = self.find_sheet(name) {
            return Err(ShopError::InvalidInput(format!("{} already in list!", existing)));
        }
        if let Some(bad) = days.iter().find(|d| !is_weekday_name(d)) {
            return Err(ShopError::InvalidInput(format!(
                "{} is not a weekday name (use e.g. Sunday)",
                bad
            )));
        }
        self.sheets.insert(name.to_string(), days);
        Ok(())
    }

    pub fn remove_sheet(&mut self, name: &str) -> Result<()> {
        let existing = self
            .find_sheet(name)
            .ok_or_else(|| ShopError::InvalidInput(format!("{} not in list", name)))?;
        self.sheets.remove(&existing);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_have_only_enabled() {
        let mut settings = Settings::default();
        settings.add_name("Olive Oil").unwrap();
        settings.add_name("Salt").unwrap();
        settings.toggle_name("salt").unwrap();

        let have = settings.already_have();
        assert!(have.contains("olive oil"));
        assert!(!have.contains("salt"));
    }

    #[test]
    fn test_add_name_rejects_case_duplicate() {
        let mut settings = Settings::default();
        settings.add_name("Salt").unwrap();
        assert!(settings.add_name("SALT").is_err());
        assert!(settings.add_name("  ").is_err());
    }

    #[test]
    fn test_enable_name() {
        let mut settings = Settings::default();
        settings.add_name("Salt").unwrap();
        settings.toggle_name("Salt").unwrap();
        assert!(settings.enable_name("salt"));
        assert!(!settings.enable_name("Salt"));
        assert!(settings.enable_name("Pepper"));
        assert_eq!(settings.names.len(), 2);
    }

    #[test]
    fn test_output_path() {
        let settings = Settings {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(settings.output_path(), PathBuf::from("out/shopping_list.txt"));
    }

    #[test]
    fn test_sheets() {
        let mut settings = Settings::default();
        settings
            .add_sheet("Chris Food Plan", vec!["Sunday".to_string()])
            .unwrap();
        assert!(settings.add_sheet("chris food plan", vec![]).is_err());
        settings.remove_sheet("Chris Food Plan").unwrap();
        assert!(settings.remove_sheet("Chris Food Plan").is_err());
    }

    #[test]
    fn test_add_sheet_rejects_short_day_names() {
        let mut settings = Settings::default();
        let err = settings.add_sheet("Plan", vec!["Sun".to_string()]);
        assert!(matches!(err, Err(ShopError::InvalidInput(msg)) if msg.contains("Sun")));
        assert!(settings.sheets.is_empty());

        settings
            .add_sheet("Plan", vec!["sunday".to_string(), "Monday".to_string()])
            .unwrap();
        assert_eq!(settings.sheets["Plan"].len(), 2);
    }

    #[test]
    fn test_remove_sheet_ignores_case() {
        let mut settings = Settings::default();
        settings.add_sheet("Chris Food Plan", vec![]).unwrap();
        settings.remove_sheet("chris food plan").unwrap();
        assert!(settings.sheets.is_empty());
    }
}
