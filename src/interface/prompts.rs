use dialoguer::{Confirm, MultiSelect, Select};

use crate::catalog::{match_meal_name, NameMatch};
use crate::error::Result;
use crate::models::{Meal, Soup};

/// Let the user tick meals from the catalog. Current picks start ticked.
///
/// The returned order keeps already-selected meals first, in their existing
/// order, so saving does not reshuffle the week.
pub fn prompt_meal_selection(catalog: &[Meal], current: &[Meal]) -> Result<Vec<Meal>> {
    let labels: Vec<String> = catalog
        .iter()
        .map(|m| {
            if m.requires_soup() {
                format!("{} (swallow)", m.name)
            } else {
                m.name.clone()
            }
        })
        .collect();
    let defaults: Vec<bool> = catalog
        .iter()
        .map(|m| current.iter().any(|c| c.id == m.id))
        .collect();

    let picked = MultiSelect::new()
        .with_prompt("Choose your meals (space to toggle, enter to save)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let picked: Vec<&Meal> = picked.into_iter().map(|i| &catalog[i]).collect();
    let mut ordered: Vec<Meal> = current
        .iter()
        .filter(|c| picked.iter().any(|p| p.id == c.id))
        .cloned()
        .collect();
    for meal in picked {
        if !ordered.iter().any(|m| m.id == meal.id) {
            ordered.push(meal.clone());
        }
    }
    Ok(ordered)
}

/// Let the user pick one soup. `None` if they back out.
pub fn prompt_soup(soups: &[Soup]) -> Result<Option<Soup>> {
    let mut options: Vec<String> = soups.iter().map(|s| s.name.clone()).collect();
    options.push("Close".to_string());

    let selection = Select::new()
        .with_prompt("Select a soup")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(soups.get(selection).cloned())
}

/// Resolve a typed meal name, asking the user to confirm fuzzy matches.
pub fn prompt_resolve_meal<'a>(catalog: &'a [Meal], input: &str) -> Result<Option<&'a Meal>> {
    match match_meal_name(catalog, input) {
        NameMatch::Exact(meal) => Ok(Some(meal)),
        NameMatch::NoMatch => {
            println!("No matching meal found for '{}'", input);
            Ok(None)
        }
        NameMatch::Fuzzy(candidates) if candidates.len() == 1 => {
            let meal = candidates[0];
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", meal.name))
                .default(true)
                .interact()?;
            Ok(confirm.then_some(meal))
        }
        NameMatch::Fuzzy(candidates) => {
            let mut options: Vec<String> = candidates.iter().map(|m| m.name.clone()).collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            Ok(candidates.get(selection).copied())
        }
    }
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
