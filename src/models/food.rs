use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::error::{Result, ShopError};
use crate::models::calendar::day_shortstr;
use crate::units::Quantity;

/// Category whose day list is shown as calendar dates instead of weekdays.
pub const DATED_FOOD_TYPE: &str = "meat";

/// A quantity of one named ingredient, tagged with the days it is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub name: String,
    pub amount: Quantity,
    /// Preferred display unit; may not share the amount's dimension.
    pub rec_unit: String,
    /// Lower-cased category, empty when uncategorized.
    pub food_type: String,
    pub days: BTreeSet<NaiveDate>,
}

impl Food {
    pub fn new(name: &str, amount: Quantity, rec_unit: &str, food_type: &str) -> Self {
        Self {
            name: name.to_string(),
            amount,
            rec_unit: rec_unit.to_string(),
            food_type: food_type.trim().to_lowercase(),
            days: BTreeSet::new(),
        }
    }

    /// Copy of this food with `days` added.
    pub fn with_days(&self, days: &BTreeSet<NaiveDate>) -> Self {
        let mut food = self.clone();
        food.days.extend(days.iter().copied());
        food
    }

    /// Copy of this food with its amount multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            amount: self.amount * factor,
            ..self.clone()
        }
    }

    /// Combine two entries for the same food: amounts summed, days unioned.
    pub fn merge(&self, other: &Food) -> Result<Food> {
        if self.name != other.name {
            return Err(ShopError::NameMismatch {
                left: self.name.clone(),
                right: other.name.clone(),
            });
        }
        let mut merged = self.with_days(&other.days);
        merged.amount = self.amount.try_add(&other.amount)?;
        Ok(merged)
    }

    /// Canonical key for already-have lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn day_shortstr(&self) -> String {
        if self.food_type == DATED_FOOD_TYPE {
            day_shortstr(&self.days, "%m/%d")
        } else {
            day_shortstr(&self.days, "%a")
        }
    }
}

impl fmt::Display for Food {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = self.amount.display_in(&self.rec_unit);
        write!(f, "{:.2} {} {}", shown, self.name, self.day_shortstr())
    }
}
