use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;

use crate::models::food::Food;

/// A named bundle of ingredients, each already scaled to one full batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub name: String,
    /// Fraction of one batch consumed by a single serving.
    pub rec_per_serv: f64,
    pub ingredients: Vec<Food>,
    pub days: BTreeSet<NaiveDate>,
}

impl Recipe {
    pub fn new(name: &str, rec_per_serv: f64) -> Self {
        Self {
            name: name.to_string(),
            rec_per_serv,
            ingredients: Vec::new(),
            days: BTreeSet::new(),
        }
    }

    pub fn push(&mut self, ingredient: Food) {
        self.ingredients.push(ingredient);
    }

    /// Servings yielded by one batch.
    pub fn servings_per_recipe(&self) -> f64 {
        1.0 / self.rec_per_serv
    }

    /// Whole batches needed to cover `servings`.
    ///
    /// Demand below one batch still needs one batch; leftover demand of at
    /// least one serving past a whole batch adds another.
    pub fn batches_for(&self, servings: f64) -> u32 {
        let per_recipe = self.servings_per_recipe();
        if servings < per_recipe {
            return 1;
        }
        let mut batches = servings * self.rec_per_serv;
        if servings > per_recipe && servings % per_recipe >= 1.0 {
            batches += 1.0;
        }
        batches as u32
    }

    pub fn with_days(&self, days: &BTreeSet<NaiveDate>) -> Self {
        let mut recipe = self.clone();
        recipe.days.extend(days.iter().copied());
        recipe
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with {} ingredients.", self.name, self.ingredients.len())
    }
}
