use std::collections::{BTreeMap, HashMap};

use tracing::{debug, error, warn};

use crate::error::{Result, ShopError};
use crate::models::{Food, Recipe};
use crate::sheets::{
    MasterColumns, MasterRow, RawIngredients, RecipeColumns, SheetLayout, Table, Workbook,
};
use crate::units::quantity;

/// Marker row that opens a recipe block; the next row defines the recipe.
pub const NAME_MARKER: &str = "Name";
/// Marker row after which ingredient rows follow.
pub const INGREDIENTS_MARKER: &str = "Ingredients";

pub const MASTER_TAB: &str = "master";
pub const RECIPES_TAB: &str = "recipes";
pub const RAW_INGREDIENTS_TAB: &str = "raw ingredients";

/// The master ingredient list, keyed by exact name.
#[derive(Debug, Clone, Default)]
pub struct MasterTable {
    rows: HashMap<String, MasterRow>,
}

impl MasterTable {
    pub fn from_table(table: &Table, columns: &MasterColumns) -> Self {
        let mut rows = HashMap::new();
        for idx in 0..table.len() {
            let row = columns.read(table, idx);
            if row.name.is_empty() {
                continue;
            }
            if rows.contains_key(&row.name) {
                debug!(row = idx, item = %row.name, "Duplicate master entry ignored");
                continue;
            }
            rows.insert(row.name.clone(), row);
        }
        Self { rows }
    }

    pub fn get(&self, name: &str) -> Option<&MasterRow> {
        self.rows.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Everything the aggregation needs to resolve plan items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub master: MasterTable,
    pub recipes: BTreeMap<String, Recipe>,
}

/// Load the master list and recipes from the catalog workbook.
///
/// A missing master, recipes or raw-ingredients tab fails the whole load.
pub fn load_catalog(workbook: &Workbook, layout: &SheetLayout) -> Result<Catalog> {
    let require = |title: &str| {
        workbook.tab(title).ok_or_else(|| {
            error!(workbook = %workbook.name, "Missing {} table from food list", title);
            ShopError::MissingTable(title.to_string())
        })
    };
    let master_table = require(MASTER_TAB)?;
    let recipe_table = require(RECIPES_TAB)?;
    let raw_table = require(RAW_INGREDIENTS_TAB)?;

    let raw = RawIngredients::from_table(raw_table)?;
    let master = MasterTable::from_table(master_table, &layout.master);
    let recipes = load_recipes(recipe_table, &raw, &layout.recipe);

    debug!(
        master = master.len(),
        raw = raw.len(),
        recipes = recipes.len(),
        "Loaded catalog"
    );
    Ok(Catalog { master, recipes })
}

/// Start a recipe from its definition row, the row right after a `Name` marker.
fn start_recipe(table: &Table, idx: usize, columns: &RecipeColumns) -> Result<Recipe> {
    let row = columns.read(table, idx);
    if row.name.is_empty() {
        return Err(ShopError::invalid_field("recipe name", row.name));
    }
    let rec_per_serv: f64 = row
        .rec_per_serv
        .parse()
        .map_err(|_| ShopError::invalid_field("recipe per serving", row.rec_per_serv))?;
    if !rec_per_serv.is_finite() || rec_per_serv <= 0.0 {
        return Err(ShopError::invalid_field("recipe per serving", row.rec_per_serv));
    }
    Ok(Recipe::new(row.name, rec_per_serv))
}

/// Build one full-batch ingredient from a recipe ingredient row.
fn parse_ingredient(
    table: &Table,
    idx: usize,
    columns: &RecipeColumns,
    raw: &RawIngredients,
) -> Result<Food> {
    let row = columns.read(table, idx);
    let ingredient = raw
        .get(row.name)
        .ok_or_else(|| ShopError::InvalidInput(format!("no raw ingredient named {}", row.name)))?;
    let serving_qty: f64 = ingredient
        .serving_qty
        .parse()
        .map_err(|_| ShopError::invalid_field("serving qty", &ingredient.serving_qty))?;
    let num_servings: f64 = row
        .servings
        .parse()
        .map_err(|_| ShopError::invalid_field("servings", row.servings))?;
    let amount = quantity(serving_qty, &ingredient.serving_unit)?;

    let food = Food::new(&ingredient.name, amount, row.rec_unit, &ingredient.food_type);
    Ok(food.scaled(num_servings))
}

fn store(recipes: &mut BTreeMap<String, Recipe>, recipe: Recipe) {
    if recipes.contains_key(&recipe.name) {
        warn!(recipe = %recipe.name, "Recipe defined more than once, keeping the last");
    }
    recipes.insert(recipe.name.clone(), recipe);
}

/// Scan the recipe sheet block by block.
///
/// Unparseable recipe or ingredient rows are logged and skipped.
pub fn load_recipes(
    table: &Table,
    raw: &RawIngredients,
    columns: &RecipeColumns,
) -> BTreeMap<String, Recipe> {
    let mut recipes = BTreeMap::new();
    let mut current: Option<Recipe> = None;
    let mut tracking = false;

    for idx in 0..table.len() {
        let first_col = columns.read(table, idx).name;

        if first_col == NAME_MARKER {
            tracking = false;
            if let Some(done) = current.take() {
                store(&mut recipes, done);
            }
            match start_recipe(table, idx + 1, columns) {
                Ok(recipe) => current = Some(recipe),
                Err(e) => warn!(row = idx + 1, "Skipping recipe: {}", e),
            }
            continue;
        }

        if tracking && !first_col.is_empty() {
            if let Some(recipe) = current.as_mut() {
                match parse_ingredient(table, idx, columns, raw) {
                    Ok(food) => recipe.push(food),
                    Err(e) => warn!(
                        recipe = %recipe.name,
                        row = idx,
                        item = first_col,
                        "Skipping ingredient: {}",
                        e
                    ),
                }
            }
        }

        if current.is_some() && first_col == INGREDIENTS_MARKER {
            tracking = true;
        }
    }

    if let Some(done) = current.take() {
        store(&mut recipes, done);
    }
    recipes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe_row(name: &str, rec_unit: &str, rec_per_serv: &str, servings: &str) -> Vec<String> {
        let mut cells = vec![String::new(); 10];
        cells[0] = name.to_string();
        cells[2] = rec_unit.to_string();
        cells[7] = rec_per_serv.to_string();
        cells[9] = servings.to_string();
        cells
    }

    fn raw_table() -> Table {
        Table::from_rows([
            vec!["Name", "Serving Qty", "Serving Unit", "Food Type"],
            vec!["Beans", "0.5", "cup", "Canned"],
            vec!["Beef", "4", "oz", "Meat"],
            vec!["Salt", "n/a", "tsp", "Spice"],
        ])
    }

    fn recipe_table() -> Table {
        Table::from_rows(vec![
            recipe_row("Name", "", "", ""),
            recipe_row("Chili", "", "0.125", ""),
            recipe_row("Ingredients", "", "", ""),
            recipe_row("Beans", "cup", "", "4"),
            recipe_row("Salt", "tsp", "", "1"),
            recipe_row("Unicorn", "g", "", "1"),
            recipe_row("Beef", "lb", "", "8"),
            recipe_row("", "", "", ""),
            recipe_row("Name", "", "", ""),
            recipe_row("Broken", "", "zero", ""),
            recipe_row("Ingredients", "", "", ""),
            recipe_row("Beans", "cup", "", "1"),
            recipe_row("Name", "", "", ""),
            recipe_row("Beef Bowl", "", "0.5", ""),
            recipe_row("Ingredients", "", "", ""),
            recipe_row("Beef", "oz", "", "2"),
        ])
    }

    #[test]
    fn test_load_recipes_blocks() {
        let raw = RawIngredients::from_table(&raw_table()).unwrap();
        let recipes = load_recipes(&recipe_table(), &raw, &RecipeColumns::default());

        assert_eq!(recipes.len(), 2);
        let chili = &recipes["Chili"];
        assert_eq!(chili.rec_per_serv, 0.125);
        let names: Vec<&str> = chili.ingredients.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Beans", "Beef"]);
        assert!((chili.ingredients[0].amount.magnitude - 2.0).abs() < 1e-9);
        assert_eq!(chili.ingredients[0].rec_unit, "cup");
        assert_eq!(chili.ingredients[1].food_type, "meat");
        assert!((chili.ingredients[1].amount.magnitude - 32.0).abs() < 1e-9);

        // final block is flushed
        assert_eq!(recipes["Beef Bowl"].ingredients.len(), 1);
    }

    #[test]
    fn test_load_catalog_requires_tables() {
        let book = Workbook::new("Food List")
            .with_tab("Master", Table::default())
            .with_tab("Raw Ingredients", raw_table());
        let (result, lines) =
            crate::logging::capture_logs(|| load_catalog(&book, &SheetLayout::default()));
        assert!(matches!(result, Err(ShopError::MissingTable(t)) if t == RECIPES_TAB));

        let errors: Vec<&String> = lines.iter().filter(|l| l.contains("ERROR")).collect();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Missing recipes table from food list"));
    }

    #[test]
    fn test_load_catalog_master_index() {
        let mut master_row = vec![String::new(); 12];
        master_row[0] = "Chicken".to_string();
        master_row[4] = "1".to_string();
        master_row[5] = "piece".to_string();
        master_row[11] = "meat".to_string();
        let book = Workbook::new("Food List")
            .with_tab("master", Table::from_rows([master_row]))
            .with_tab("recipes", recipe_table())
            .with_tab("raw ingredients", raw_table());

        let catalog = load_catalog(&book, &SheetLayout::default()).unwrap();
        let chicken = catalog.master.get("Chicken").unwrap();
        assert_eq!(chicken.unit, "piece");
        assert_eq!(chicken.food_type, "meat");
        assert!(catalog.recipes.contains_key("Chili"));
    }
}
