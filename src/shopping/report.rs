use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::models::{day_shortstr, CalendarWindow, Food, Recipe};

/// Group title for foods with a blank category; always listed last.
pub const NO_CATEGORY: &str = "No Category";

pub const RECIPE_HEADER: &str = "Recipes Making this Week";

/// Foods grouped by category, categories sorted by name, items sorted by name.
pub fn build_groups(foods: &BTreeMap<String, Food>) -> Vec<(String, Vec<&Food>)> {
    let mut groups: BTreeMap<&str, Vec<&Food>> = BTreeMap::new();
    let mut no_group = Vec::new();
    for food in foods.values() {
        if food.food_type.is_empty() {
            no_group.push(food);
        } else {
            groups.entry(food.food_type.as_str()).or_default().push(food);
        }
    }

    let mut ordered: Vec<(String, Vec<&Food>)> = groups
        .into_iter()
        .map(|(name, items)| (name.to_string(), items))
        .collect();
    if !no_group.is_empty() {
        ordered.push((NO_CATEGORY.to_string(), no_group));
    }
    for (_, items) in ordered.iter_mut() {
        items.sort_by(|a, b| a.name.cmp(&b.name));
    }
    ordered
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn write_calendar<W: Write>(out: &mut W, window: &CalendarWindow) -> io::Result<()> {
    let mut names = String::new();
    let mut dates = String::new();
    let last = window.days().len().saturating_sub(1);
    for (i, day) in window.days().iter().enumerate() {
        let sep = if i == last { "" } else { " " };
        let day_block = format!("{}{}", day.format("%A"), sep);
        let date_block = day.format("%m/%d").to_string();
        dates.push_str(&format!("{:<width$}", date_block, width = day_block.len()));
        names.push_str(&day_block);
    }
    writeln!(out, "{}", names)?;
    writeln!(out, "{}", dates)?;
    writeln!(out)
}

/// Render the weekly shopping list.
///
/// Output depends only on the arguments, so identical input renders identical text.
pub fn render_report<W: Write>(
    out: &mut W,
    shopping_list: &BTreeMap<String, Food>,
    used_recipes: &BTreeMap<String, Recipe>,
    window: &CalendarWindow,
) -> io::Result<()> {
    write_calendar(out, window)?;

    writeln!(out, "{}", RECIPE_HEADER)?;
    writeln!(out, "{}", "-".repeat(RECIPE_HEADER.len()))?;
    for recipe in used_recipes.values() {
        writeln!(out, " - {} - {}", recipe.name, day_shortstr(&recipe.days, "%a"))?;
    }
    writeln!(out)?;

    for (group, items) in build_groups(shopping_list) {
        writeln!(out, "{}", capitalize(&group))?;
        writeln!(out, "{}", "-".repeat(group.chars().count()))?;
        for food in items {
            writeln!(out, "{}", food)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn render_to_string(
    shopping_list: &BTreeMap<String, Food>,
    used_recipes: &BTreeMap<String, Recipe>,
    window: &CalendarWindow,
) -> String {
    let mut buf = Vec::new();
    let _ = render_report(&mut buf, shopping_list, used_recipes, window);
    String::from_utf8_lossy(&buf).into_owned()
}
