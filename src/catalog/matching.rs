use strsim::jaro_winkler;

use crate::models::Meal;
use crate::planner::{FUZZY_MATCH_THRESHOLD, FUZZY_MAX_CANDIDATES};

/// Outcome of resolving free text against meal names.
#[derive(Debug, PartialEq)]
pub enum NameMatch<'a> {
    /// Case-insensitive exact match.
    Exact(&'a Meal),
    /// Similar names, best first.
    Fuzzy(Vec<&'a Meal>),
    NoMatch,
}

/// Resolve `input` to a meal: exact first, then Jaro-Winkler above the threshold.
pub fn match_meal_name<'a>(meals: &'a [Meal], input: &str) -> NameMatch<'a> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return NameMatch::NoMatch;
    }

    if let Some(meal) = meals.iter().find(|m| m.name.to_lowercase() == input) {
        return NameMatch::Exact(meal);
    }

    let mut candidates: Vec<(&Meal, f64)> = meals
        .iter()
        .map(|m| (m, jaro_winkler(&m.name.to_lowercase(), &input)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    if candidates.is_empty() {
        return NameMatch::NoMatch;
    }

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    NameMatch::Fuzzy(
        candidates
            .into_iter()
            .take(FUZZY_MAX_CANDIDATES)
            .map(|(m, _)| m)
            .collect(),
    )
}
