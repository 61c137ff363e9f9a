use std::path::Path;

use crate::shopping::{build_groups, BuildOutput};
use crate::state::Settings;

/// Summarize a finished run: recipes used and item counts per category.
pub fn display_summary(output: &BuildOutput, path: &Path) {
    println!();
    println!("=== Shopping List ===");
    println!();

    if output.used_recipes.is_empty() {
        println!("Recipes: (none)");
    } else {
        println!("Recipes ({}):", output.used_recipes.len());
        for recipe in output.used_recipes.values() {
            println!("  {}", recipe.name);
        }
    }
    println!();

    let groups = build_groups(&output.shopping_list);
    let width = groups.iter().map(|(g, _)| g.len()).max().unwrap_or(10);
    for (group, foods) in &groups {
        println!("  {:<width$}  {:>3} items", group, foods.len(), width = width);
    }

    println!();
    println!("Total items: {}", output.shopping_list.len());
    println!("Written to {}", path.display());
    println!();
}

/// List already-have names with their enabled state.
pub fn display_names(settings: &Settings) {
    if settings.names.is_empty() {
        println!("Already have: (none)");
        return;
    }
    for (name, enabled) in &settings.names {
        let mark = if *enabled { "x" } else { " " };
        println!("  [{}] {}", mark, name);
    }
}

/// List plan sheets and the weekdays used from each.
pub fn display_sheets(settings: &Settings) {
    if settings.sheets.is_empty() {
        println!("Plan sheets: (none)");
        return;
    }
    for (name, days) in &settings.sheets {
        let days = if days.is_empty() {
            "all days".to_string()
        } else {
            days.join(", ")
        };
        println!("  {} - {}", name, days);
    }
}
