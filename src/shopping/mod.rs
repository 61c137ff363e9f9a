pub mod engine;
pub mod pipeline;
pub mod report;

pub use engine::{create_shopping_list, food_from_master, resolve, Aggregation, Resolved};
pub use pipeline::{build_shopping_list, run_to_file, write_report_file, BuildOutput, BuildRequest};
pub use report::{build_groups, render_report, render_to_string, NO_CATEGORY};
