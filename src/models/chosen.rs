use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

/// One named plan selection accumulated across every sheet and day.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenItem {
    pub name: String,
    pub sheets: BTreeSet<String>,
    pub servings: f64,
    pub grams: f64,
    /// Weight of one serving, set by the last gram-denominated row.
    pub serv_weight_as_grams: Option<f64>,
    pub days: BTreeSet<NaiveDate>,
}

impl ChosenItem {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sheets: BTreeSet::new(),
            servings: 0.0,
            grams: 0.0,
            serv_weight_as_grams: None,
            days: BTreeSet::new(),
        }
    }

    pub fn record_source(&mut self, sheet: &str, day: NaiveDate) {
        self.sheets.insert(sheet.to_string());
        self.days.insert(day);
    }

    pub fn add_servings(&mut self, servings: f64) {
        self.servings += servings;
    }

    pub fn add_grams(&mut self, grams: f64, serv_weight_as_grams: f64) {
        self.grams += grams;
        self.serv_weight_as_grams = Some(serv_weight_as_grams);
    }

    fn nonzero_weight(&self) -> Option<f64> {
        self.serv_weight_as_grams.filter(|w| *w != 0.0)
    }

    /// Direct servings plus grams expressed as servings.
    pub fn total_servings(&self) -> f64 {
        match self.nonzero_weight() {
            Some(weight) => self.servings + self.grams / weight,
            None => self.servings,
        }
    }

    /// Direct grams plus servings expressed as grams; `None` until a serving
    /// weight is known.
    pub fn total_grams(&self) -> Option<f64> {
        let weight = self.serv_weight_as_grams?;
        let mut grams = self.grams;
        if self.servings != 0.0 && weight != 0.0 {
            grams += self.servings * weight;
        }
        Some(grams)
    }

    /// Source sheets and weekdays, for log context.
    pub fn context(&self) -> String {
        let sheets: Vec<&str> = self.sheets.iter().map(String::as_str).collect();
        let days: Vec<String> = self.days.iter().map(|d| d.format("%a").to_string()).collect();
        format!("sheets=[{}] days=[{}]", sheets.join(", "), days.join(", "))
    }
}

impl fmt::Display for ChosenItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} servings", self.name, self.total_servings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_servings_with_grams() {
        let mut item = ChosenItem::new("Oats");
        item.add_servings(2.0);
        assert_eq!(item.total_servings(), 2.0);

        item.add_grams(44.4, 11.1);
        assert_eq!(item.total_servings(), 6.0);
    }

    #[test]
    fn test_total_grams_requires_weight() {
        let mut item = ChosenItem::new("Oats");
        item.add_servings(3.0);
        assert_eq!(item.total_grams(), None);

        item.add_grams(20.0, 10.0);
        assert_eq!(item.total_grams(), Some(50.0));
    }

    #[test]
    fn test_zero_weight_ignored_for_servings() {
        let mut item = ChosenItem::new("Oats");
        item.add_servings(1.0);
        item.add_grams(5.0, 0.0);
        assert_eq!(item.total_servings(), 1.0);
        assert_eq!(item.total_grams(), Some(5.0));
    }

    #[test]
    fn test_record_source_dedups() {
        let day = NaiveDate::from_ymd_opt(2025, 10, 12).unwrap();
        let mut item = ChosenItem::new("Oats");
        item.record_source("Chris Food Plan", day);
        item.record_source("Chris Food Plan", day);
        assert_eq!(item.sheets.len(), 1);
        assert_eq!(item.days.len(), 1);
        assert_eq!(item.context(), "sheets=[Chris Food Plan] days=[Sun]");
    }
}
