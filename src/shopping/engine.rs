use std::collections::BTreeMap;

use strsim::jaro_winkler;
use tracing::{debug, error, info};

use crate::error::{Result, ShopError};
use crate::loader::Catalog;
use crate::models::{AlreadyHave, ChosenItem, Food, Recipe};
use crate::sheets::MasterRow;
use crate::units::{quantity, Quantity};

/// Minimum similarity for a "did you mean" hint on a missing catalog name.
pub const SUGGESTION_THRESHOLD: f64 = 0.85;

/// What a chosen item name refers to in the catalog.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    Recipe(&'a Recipe),
    CatalogItem(&'a MasterRow),
    Missing,
}

/// Recipes win over master entries of the same name.
pub fn resolve<'a>(name: &str, catalog: &'a Catalog) -> Resolved<'a> {
    if let Some(recipe) = catalog.recipes.get(name) {
        return Resolved::Recipe(recipe);
    }
    match catalog.master.get(name) {
        Some(row) => Resolved::CatalogItem(row),
        None => Resolved::Missing,
    }
}

/// Result of one aggregation run.
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub shopping_list: BTreeMap<String, Food>,
    pub used_recipes: BTreeMap<String, Recipe>,
    /// Suppressed amounts per food name.
    pub ignored: BTreeMap<String, Quantity>,
    pub ignored_recipes: Vec<String>,
}

/// Build a food from its master entry for a chosen item, before scaling.
///
/// Falls back to the gram-weight column when the quantity column is not a number.
pub fn food_from_master(row: &MasterRow, item: &ChosenItem) -> Result<Food> {
    let qty = match row.quantity.parse::<f64>() {
        Ok(qty) => qty,
        Err(_) => {
            let total_grams = item
                .total_grams()
                .filter(|g| *g != 0.0)
                .ok_or_else(|| ShopError::invalid_field("quantity", &row.quantity))?;
            let grams: f64 = row
                .grams
                .parse()
                .map_err(|_| ShopError::invalid_field("grams", &row.grams))?;
            grams / total_grams
        }
    };
    let amount = quantity(qty, &row.unit)?;
    Ok(Food::new(&row.name, amount, &row.unit, &row.food_type))
}

fn closest_name<'a, I>(name: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = name.to_lowercase();
    candidates
        .into_iter()
        .map(|c| (c, jaro_winkler(&wanted, &c.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(c, _)| c)
}

/// Working state for one run: the list being built plus the suppression ledgers.
struct Aggregator<'a> {
    catalog: &'a Catalog,
    already_have: &'a AlreadyHave,
    out: Aggregation,
}

impl<'a> Aggregator<'a> {
    fn new(catalog: &'a Catalog, already_have: &'a AlreadyHave) -> Self {
        Self {
            catalog,
            already_have,
            out: Aggregation::default(),
        }
    }

    /// Merge a scaled food into the list, or into the ignored ledger.
    fn add_food(&mut self, food: Food) -> Result<()> {
        if self.already_have.contains(&food.name) {
            let total = match self.out.ignored.get(&food.name) {
                Some(seen) => seen.try_add(&food.amount)?,
                None => food.amount,
            };
            self.out.ignored.insert(food.name, total);
            return Ok(());
        }

        let merged = match self.out.shopping_list.get(&food.name) {
            Some(existing) => existing.merge(&food)?,
            None => food,
        };
        self.out.shopping_list.insert(merged.name.clone(), merged);
        Ok(())
    }

    fn add_recipe(&mut self, recipe: &Recipe, item: &ChosenItem) -> Result<()> {
        let recipe = recipe.with_days(&item.days);
        if self.already_have.contains(&recipe.name) {
            self.out.ignored_recipes.push(recipe.name);
            return Ok(());
        }

        let servings = item.total_servings();
        let batches = recipe.batches_for(servings);
        debug!(
            recipe = %recipe.name,
            servings,
            batches,
            "Expanding recipe"
        );
        for ingredient in &recipe.ingredients {
            let food = ingredient.with_days(&item.days).scaled(batches as f64);
            self.add_food(food)?;
        }

        let used = match self.out.used_recipes.remove(&recipe.name) {
            Some(prior) => prior.with_days(&recipe.days),
            None => recipe,
        };
        self.out.used_recipes.insert(used.name.clone(), used);
        Ok(())
    }

    fn add_catalog_item(&mut self, row: &MasterRow, item: &ChosenItem) -> Result<()> {
        let food = match food_from_master(row, item) {
            Ok(food) => food,
            Err(e) => {
                error!(
                    item = %item.name,
                    context = %item.context(),
                    "Failed to convert from master list: {}",
                    e
                );
                return Ok(());
            }
        };
        self.add_food(food.with_days(&item.days).scaled(item.total_servings()))
    }

    fn report_missing(&self, item: &ChosenItem) {
        let candidates = self
            .catalog
            .master
            .names()
            .chain(self.catalog.recipes.keys().map(String::as_str));
        match closest_name(&item.name, candidates) {
            Some(hint) => error!(
                item = %item.name,
                context = %item.context(),
                "{} cant be found in master list! Did you mean {}?",
                item.name,
                hint
            ),
            None => error!(
                item = %item.name,
                context = %item.context(),
                "{} cant be found in master list!",
                item.name
            ),
        }
    }

    fn finish(self) -> Aggregation {
        for (name, amount) in &self.out.ignored {
            info!("Assuming already have {:.2} of {}", amount, name);
        }
        for name in &self.out.ignored_recipes {
            info!("Assuming already made recipe {}", name);
        }
        self.out
    }
}

/// Turn chosen items into a shopping list.
///
/// Recipes are expanded first, then the remaining names are resolved
/// against the master list. Items missing from the catalog are logged and
/// left out. Fails only when two entries for the same food carry
/// incompatible units.
pub fn create_shopping_list(
    items: &BTreeMap<String, ChosenItem>,
    catalog: &Catalog,
    already_have: &AlreadyHave,
) -> Result<Aggregation> {
    let mut recipes = Vec::new();
    let mut plain = Vec::new();
    for (name, item) in items {
        match resolve(name, catalog) {
            Resolved::Recipe(recipe) => recipes.push((recipe, item)),
            other => plain.push((other, item)),
        }
    }

    let mut aggregator = Aggregator::new(catalog, already_have);
    for (recipe, item) in recipes {
        aggregator.add_recipe(recipe, item)?;
    }
    for (resolved, item) in plain {
        match resolved {
            Resolved::CatalogItem(row) => aggregator.add_catalog_item(row, item)?,
            Resolved::Missing => aggregator.report_missing(item),
            Resolved::Recipe(_) => {}
        }
    }
    Ok(aggregator.finish())
}
