pub mod catalog;
pub mod plan;

pub use catalog::{load_catalog, load_recipes, Catalog, MasterTable};
pub use plan::{build_chosen_items, select_plan_sheets, PlanSheet};
