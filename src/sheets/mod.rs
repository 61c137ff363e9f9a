mod layout;
mod source;

pub use layout::{
    MasterColumns, MasterRow, PlanColumns, PlanRow, RawIngredient, RawIngredients, RecipeColumns,
    RecipeRow, SheetLayout,
};
pub use source::{CsvSource, MemorySource, Tab, Table, TableSource, Workbook};
