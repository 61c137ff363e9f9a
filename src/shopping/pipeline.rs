use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::error::{Result, ShopError};
use crate::loader::{build_chosen_items, load_catalog, select_plan_sheets, Catalog};
use crate::models::{AlreadyHave, CalendarWindow, Food, Recipe};
use crate::sheets::{SheetLayout, TableSource};
use crate::shopping::engine::create_shopping_list;
use crate::shopping::report::render_to_string;

/// Everything one run needs besides the table source.
#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Plan workbook name to the weekday names wanted from it (empty = all).
    pub sheets: BTreeMap<String, Vec<String>>,
    pub catalog_workbook: String,
    pub layout: SheetLayout,
    pub already_have: AlreadyHave,
    pub today: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub shopping_list: BTreeMap<String, Food>,
    pub used_recipes: BTreeMap<String, Recipe>,
    pub report: String,
}

/// Load plans and catalog, aggregate, and render the report.
///
/// A plan workbook that cannot be opened aborts the run. A catalog with a
/// missing table is logged and treated as empty.
pub fn build_shopping_list<S>(request: &BuildRequest, source: &S) -> Result<BuildOutput>
where
    S: TableSource + ?Sized,
{
    let window = CalendarWindow::starting(request.today);

    let mut plan_sheets = Vec::new();
    for (name, day_names) in &request.sheets {
        info!("Grabbing food from {}", name);
        let workbook = source.open(name).inspect_err(|e| {
            error!("Unable to open {}! {}", name, e);
        })?;
        for day in day_names {
            if window.by_weekday_name(day).is_none() {
                warn!(sheet = %name, "{} is not a weekday name; no tab selected for it", day);
            }
        }
        let selected: BTreeSet<NaiveDate> = window.select(day_names);
        plan_sheets.extend(select_plan_sheets(&workbook, &window, &selected));
    }

    info!("Grabbing master food list");
    let catalog = source
        .open(&request.catalog_workbook)
        .and_then(|book| load_catalog(&book, &request.layout))
        .unwrap_or_else(|e| {
            error!("Unable to load {}: {}", request.catalog_workbook, e);
            Catalog::default()
        });

    info!("Combining food sheets");
    let items = build_chosen_items(&plan_sheets, &request.layout.plan);

    info!("Creating the food list");
    let aggregation = create_shopping_list(&items, &catalog, &request.already_have)?;
    let report = render_to_string(&aggregation.shopping_list, &aggregation.used_recipes, &window);

    Ok(BuildOutput {
        shopping_list: aggregation.shopping_list,
        used_recipes: aggregation.used_recipes,
        report,
    })
}

pub fn write_report_file<P: AsRef<Path>>(path: P, report: &str) -> Result<()> {
    fs::write(path.as_ref(), report)?;
    info!("File Created {}", path.as_ref().display());
    Ok(())
}

/// Run a build and write its report to `path`.
///
/// The output directory is checked before any table is loaded.
pub fn run_to_file<S>(request: &BuildRequest, source: &S, path: &Path) -> Result<BuildOutput>
where
    S: TableSource + ?Sized,
{
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.is_dir() {
            return Err(ShopError::InvalidInput(format!(
                "Output dir {} does not exist!",
                dir.display()
            )));
        }
    }
    let output = build_shopping_list(request, source)?;
    write_report_file(path, &output.report)?;
    Ok(output)
}
