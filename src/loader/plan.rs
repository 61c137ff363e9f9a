use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{Result, ShopError};
use crate::models::{CalendarWindow, ChosenItem};
use crate::sheets::{PlanColumns, PlanRow, Table, Workbook};

/// Section headers of a plan sheet that are not food rows.
pub const IGNORED_ROWS: [&str; 8] = [
    "Breakfast",
    "Lunch",
    "Snack",
    "Dinner",
    "Desert",
    "Stick To",
    "Totals",
    "Differences",
];

const SERVINGS: &str = "servings";
const GRAMS: &str = "grams";

/// One day's table from one plan workbook.
#[derive(Debug, Clone)]
pub struct PlanSheet {
    pub source: String,
    pub day: NaiveDate,
    pub table: Table,
}

/// Pick the tabs of `workbook` named after a selected weekday in `window`.
///
/// Only the first tab for each day is used.
pub fn select_plan_sheets(
    workbook: &Workbook,
    window: &CalendarWindow,
    selected: &BTreeSet<NaiveDate>,
) -> Vec<PlanSheet> {
    let mut seen = BTreeSet::new();
    let mut sheets = Vec::new();
    for tab in &workbook.tabs {
        let Some(day) = window.by_weekday_name(&tab.title) else {
            continue;
        };
        if !selected.contains(&day) {
            continue;
        }
        if !seen.insert(day) {
            warn!(
                source = %workbook.name,
                tab = %tab.title,
                "Ignoring second tab for the same day"
            );
            continue;
        }
        sheets.push(PlanSheet {
            source: workbook.name.clone(),
            day,
            table: tab.table.clone(),
        });
    }
    sheets
}

/// How a parsed row contributes to its item.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Portion {
    Servings(f64),
    Grams { grams: f64, serving_grams: f64 },
}

/// Parse a plan row. `Ok(None)` means the row is not a food row at all.
fn parse_row(row: &PlanRow) -> Result<Option<Portion>> {
    if row.name.is_empty() || row.quantity.is_empty() || IGNORED_ROWS.contains(&row.name) {
        return Ok(None);
    }
    let qty: f64 = row
        .quantity
        .parse()
        .map_err(|_| ShopError::invalid_field("quantity", row.quantity))?;
    if qty == 0.0 {
        return Ok(None);
    }

    match row.unit_type.to_lowercase().as_str() {
        SERVINGS => Ok(Some(Portion::Servings(qty))),
        GRAMS => {
            if row.serving_grams.is_empty() {
                return Err(ShopError::invalid_field("serving weight (g)", row.serving_grams));
            }
            let serving_grams = row
                .serving_grams
                .parse()
                .map_err(|_| ShopError::invalid_field("serving weight (g)", row.serving_grams))?;
            Ok(Some(Portion::Grams {
                grams: qty,
                serving_grams,
            }))
        }
        _ => Err(ShopError::invalid_field("unit type", row.unit_type)),
    }
}

/// Fold every plan sheet into one item per name.
///
/// Bad rows are logged and skipped; they never abort the load.
pub fn build_chosen_items(
    sheets: &[PlanSheet],
    columns: &PlanColumns,
) -> BTreeMap<String, ChosenItem> {
    let mut items: BTreeMap<String, ChosenItem> = BTreeMap::new();

    for sheet in sheets {
        let day_name = sheet.day.format("%A").to_string();
        for idx in 0..sheet.table.len() {
            let row = columns.read(&sheet.table, idx);
            let portion = match parse_row(&row) {
                Ok(Some(portion)) => portion,
                Ok(None) => continue,
                Err(e) => {
                    warn!(
                        source = %sheet.source,
                        day = %day_name,
                        row = idx,
                        item = row.name,
                        "Skipping row: {}",
                        e
                    );
                    continue;
                }
            };

            let item = items
                .entry(row.name.to_string())
                .or_insert_with(|| ChosenItem::new(row.name));
            item.record_source(&sheet.source, sheet.day);
            match portion {
                Portion::Servings(servings) => item.add_servings(servings),
                Portion::Grams {
                    grams,
                    serving_grams,
                } => item.add_grams(grams, serving_grams),
            }
        }
    }

    debug!(count = items.len(), "Combined plan items");
    items
}
