use dialoguer::{Confirm, MultiSelect};

use crate::error::Result;
use crate::models::WEEKDAY_NAMES;
use crate::shopping::{build_groups, BuildOutput};


/// Let the user pick recipes and foods from a finished list that they already have.
///
/// Returns the picked names.
pub fn prompt_already_have(output: &BuildOutput) -> Result<Vec<String>> {
    let mut names: Vec<String> = output.used_recipes.keys().cloned().collect();
    let mut labels: Vec<String> = names.iter().map(|n| format!("Recipe: {}", n)).collect();

    for (_, foods) in build_groups(&output.shopping_list) {
        for food in foods {
            labels.push(food.to_string());
            names.push(food.name.clone());
        }
    }

    if labels.is_empty() {
        println!("Nothing to review.");
        return Ok(Vec::new());
    }

    let picked = MultiSelect::new()
        .with_prompt("Select anything you already have (space to toggle, enter to finish)")
        .items(&labels)
        .interact()?;

    Ok(picked.into_iter().map(|i| names[i].clone()).collect())
}

/// Pick the weekdays to use from a plan sheet; none picked means every day.
pub fn prompt_weekdays(sheet: &str) -> Result<Vec<String>> {
    let picked = MultiSelect::new()
        .with_prompt(format!("Days to use from '{}' (none = all)", sheet))
        .items(&WEEKDAY_NAMES[..])
        .interact()?;
    Ok(picked.into_iter().map(|i| WEEKDAY_NAMES[i].to_string()).collect())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
