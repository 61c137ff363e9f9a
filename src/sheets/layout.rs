//! Column positions for each kind of sheet and the typed rows read through them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopError};
use crate::sheets::source::Table;

/// Plan sheet columns: A name, B quantity, C unit type, N serving weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanColumns {
    pub name: usize,
    pub quantity: usize,
    pub unit_type: usize,
    pub serving_grams: usize,
}

impl Default for PlanColumns {
    fn default() -> Self {
        Self {
            name: 0,
            quantity: 1,
            unit_type: 2,
            serving_grams: 13,
        }
    }
}

/// One food row of a plan sheet, cells trimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRow<'a> {
    pub name: &'a str,
    pub quantity: &'a str,
    pub unit_type: &'a str,
    pub serving_grams: &'a str,
}

impl PlanColumns {
    pub fn read<'a>(&self, table: &'a Table, row: usize) -> PlanRow<'a> {
        PlanRow {
            name: table.cell(row, self.name).trim(),
            quantity: table.cell(row, self.quantity).trim(),
            unit_type: table.cell(row, self.unit_type).trim(),
            serving_grams: table.cell(row, self.serving_grams).trim(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterColumns {
    pub name: usize,
    pub quantity: usize,
    pub unit: usize,
    pub grams: usize,
    pub food_type: usize,
}

impl Default for MasterColumns {
    fn default() -> Self {
        Self {
            name: 0,
            quantity: 4,
            unit: 5,
            grams: 6,
            food_type: 11,
        }
    }
}

/// A master catalog entry. Numeric cells stay text until a chosen item needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterRow {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub grams: String,
    pub food_type: String,
}

impl MasterColumns {
    pub fn read(&self, table: &Table, row: usize) -> MasterRow {
        let cell = |col| table.cell(row, col).trim().to_string();
        MasterRow {
            name: cell(self.name),
            quantity: cell(self.quantity),
            unit: cell(self.unit),
            grams: cell(self.grams),
            food_type: cell(self.food_type),
        }
    }
}

/// Recipe sheet columns: A name, C preferred unit, H batch fraction, J servings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeColumns {
    pub name: usize,
    pub rec_unit: usize,
    pub rec_per_serv: usize,
    pub servings: usize,
}

impl Default for RecipeColumns {
    fn default() -> Self {
        Self {
            name: 0,
            rec_unit: 2,
            rec_per_serv: 7,
            servings: 9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeRow<'a> {
    pub name: &'a str,
    pub rec_unit: &'a str,
    pub rec_per_serv: &'a str,
    pub servings: &'a str,
}

impl RecipeColumns {
    pub fn read<'a>(&self, table: &'a Table, row: usize) -> RecipeRow<'a> {
        RecipeRow {
            name: table.cell(row, self.name).trim(),
            rec_unit: table.cell(row, self.rec_unit).trim(),
            rec_per_serv: table.cell(row, self.rec_per_serv).trim(),
            servings: table.cell(row, self.servings).trim(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    pub plan: PlanColumns,
    pub master: MasterColumns,
    pub recipe: RecipeColumns,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawIngredient {
    pub name: String,
    pub serving_qty: String,
    pub serving_unit: String,
    pub food_type: String,
}

/// The raw-ingredient table, indexed by name through its header row.
#[derive(Debug, Clone, Default)]
pub struct RawIngredients {
    rows: HashMap<String, RawIngredient>,
}

impl RawIngredients {
    const NAME: &'static str = "Name";
    const SERVING_QTY: &'static str = "Serving Qty";
    const SERVING_UNIT: &'static str = "Serving Unit";
    const FOOD_TYPE: &'static str = "Food Type";

    pub fn from_table(table: &Table) -> Result<Self> {
        let header = table.rows().first().cloned().unwrap_or_default();
        let column = |label: &str| {
            header
                .iter()
                .position(|h| h.trim() == label)
                .ok_or_else(|| {
                    ShopError::InvalidInput(format!("raw ingredients has no '{}' column", label))
                })
        };
        let name = column(Self::NAME)?;
        let serving_qty = column(Self::SERVING_QTY)?;
        let serving_unit = column(Self::SERVING_UNIT)?;
        let food_type = column(Self::FOOD_TYPE)?;

        let mut rows = HashMap::new();
        for row in 1..table.len() {
            let cell = |col| table.cell(row, col).trim().to_string();
            let entry = RawIngredient {
                name: cell(name),
                serving_qty: cell(serving_qty),
                serving_unit: cell(serving_unit),
                food_type: cell(food_type),
            };
            if entry.name.is_empty() {
                continue;
            }
            rows.entry(entry.name.clone()).or_insert(entry);
        }
        Ok(Self { rows })
    }

    pub fn get(&self, name: &str) -> Option<&RawIngredient> {
        self.rows.get(name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
