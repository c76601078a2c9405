use crate::catalog::video_url;
use crate::models::{DayPlan, Meal, MealSlotKey, Profile, Soup};
use crate::state::{EatenTracker, SoupAssignmentStore, WaterTracker};

/// Shown when there is nothing to plan.
pub const NO_MEALS_TEXT: &str = "No meals selected yet";

/// Format the weekly grid, one block per day.
pub fn format_week_plan(
    plan: &[DayPlan],
    soups: &SoupAssignmentStore,
    eaten: &EatenTracker,
) -> String {
    if plan.is_empty() {
        return format!("{}\nRun `weekly_diet select` to choose meals.\n", NO_MEALS_TEXT);
    }

    let mut out = String::from("=== Your Weekly Diet Plan ===\n");
    for day in plan {
        out.push('\n');
        out.push_str(&format!("{}\n", day.day));
        for (key, meal) in day.slots() {
            out.push_str(&format_slot_line(key, meal, soups, eaten));
            out.push('\n');
        }
    }
    out
}

fn format_slot_line(
    key: MealSlotKey,
    meal: &Meal,
    soups: &SoupAssignmentStore,
    eaten: &EatenTracker,
) -> String {
    let mut line = format!("  {:<10} {}", key.slot.label(), meal.name);

    if meal.requires_soup() {
        match soups.get_key(key) {
            Some(soup) => line.push_str(&format!(" with {}", soup.name)),
            None => line.push_str(" (select soup)"),
        }
    }
    if eaten.is_eaten_key(key) {
        line.push_str("  [Eaten]");
    }
    line
}

pub fn display_week_plan(plan: &[DayPlan], soups: &SoupAssignmentStore, eaten: &EatenTracker) {
    print!("{}", format_week_plan(plan, soups, eaten));
}

pub fn display_progress(percent: u8) {
    println!();
    println!("Weekly progress: {}% eaten", percent);
}

/// Format a meal's detail and portion view.
pub fn format_meal_detail(
    meal: &Meal,
    soup: Option<&Soup>,
    swallow_video: Option<&str>,
    soup_video: Option<&str>,
) -> String {
    let mut out = format!("=== {} ===\n", meal.name);
    let description = if meal.description.trim().is_empty() {
        "No description available."
    } else {
        meal.description.as_str()
    };
    out.push_str(&format!("{}\n\n", description));

    out.push_str("Ingredients\n");
    if meal.ingredients.is_empty() {
        out.push_str("  No ingredients listed.\n");
    } else {
        for item in &meal.ingredients {
            out.push_str(&format!("  - {}\n", item));
        }
    }

    out.push_str("\nInstructions\n");
    out.push_str(&format!(
        "  {}\n",
        meal.instructions.as_deref().unwrap_or("No instructions available.")
    ));

    out.push_str("\nPortion\n");
    out.push_str(&format!(
        "  {}\n",
        meal.portion_size.as_deref().unwrap_or("Standard")
    ));
    match meal.calories {
        Some(cal) => out.push_str(&format!("  Calories: {} kcal\n", cal)),
        None => out.push_str("  Calories: Not specified\n"),
    }

    if let Some(link) = &meal.video_link {
        out.push_str(&format!("\nHow to cook {}: {}\n", meal.name, video_url(link)));
    }

    if meal.requires_soup() {
        match soup {
            Some(soup) => out.push_str(&format!("\nServed with {}\n", soup.name)),
            None => out.push_str("\nNo soup selected for this meal yet.\n"),
        }
        if let Some(link) = swallow_video {
            out.push_str(&format!("How to make swallow: {}\n", video_url(link)));
        }
        if let (Some(soup), Some(link)) = (soup, soup_video) {
            out.push_str(&format!("How to cook {}: {}\n", soup.name, video_url(link)));
        }
    }
    out
}

/// List catalog meals, tagging swallows and current picks.
pub fn display_meal_list(meals: &[Meal], is_selected: impl Fn(&Meal) -> bool) {
    if meals.is_empty() {
        println!("No meals available.");
        return;
    }

    println!();
    println!("=== Meals ({} items) ===", meals.len());
    println!();
    for meal in meals {
        let mark = if is_selected(meal) { "[x]" } else { "[ ]" };
        let swallow = if meal.requires_soup() { "  (swallow)" } else { "" };
        match meal.calories {
            Some(cal) => println!("  {} {} - {} kcal{}", mark, meal.name, cal, swallow),
            None => println!("  {} {}{}", mark, meal.name, swallow),
        }
    }
    println!();
}

pub fn display_water(water: &WaterTracker) {
    const BAR_WIDTH: usize = 24;
    let filled = (water.fraction() * BAR_WIDTH as f64).round() as usize;

    println!("Water intake: {} / {} cups", water.cups(), water.daily_goal());
    println!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    println!("{}", water.status_line());
}

/// Format the profile screen: details, health goals and settings.
pub fn format_profile(profile: &Profile) -> String {
    fn or_unset(value: Option<String>) -> String {
        value.unwrap_or_else(|| "Not set".to_string())
    }
    fn on_off(enabled: bool) -> &'static str {
        if enabled { "On" } else { "Off" }
    }

    let mut out = String::from("=== Your Profile ===\n");
    out.push_str(&format!("  Username:      {}\n", or_unset(profile.username.clone())));
    out.push_str(&format!(
        "  Weight:        {}\n",
        or_unset(profile.weight.map(|kg| format!("{} kg", kg)))
    ));
    out.push_str(&format!("  Age:           {}\n", or_unset(profile.age.map(|a| a.to_string()))));
    out.push_str(&format!(
        "  Health Issues: {}\n",
        or_unset(profile.health_issues.clone())
    ));

    out.push_str("\nHealth Goals\n");
    match &profile.health_goals {
        Some(goals) => {
            out.push_str(&format!("  Current Weight: {} kg\n", goals.current_weight));
            out.push_str(&format!("  Goal Weight:    {} kg\n", goals.goal_weight));
            out.push_str(&format!("  Target Date:    {}\n", goals.target_date));
            let remaining = goals.remaining_kg();
            if remaining > 0.0 {
                out.push_str(&format!("  {:.1} kg to go\n", remaining));
            }
        }
        None => out.push_str("  No goals set. Run `weekly_diet profile goals`.\n"),
    }

    out.push_str("\nSettings\n");
    out.push_str(&format!("  Dark Mode: {}\n", on_off(profile.dark_mode)));
    out.push_str(&format!("  Reminders: {}\n", on_off(profile.reminders_enabled)));
    out
}

pub fn display_profile(profile: &Profile) {
    print!("{}", format_profile(profile));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, HealthGoals, SlotType};
    use crate::planner::assign_week;
    use crate::state::MemoryStore;

    #[test]
    fn test_empty_plan_placeholder() {
        let text = format_week_plan(&[], &SoupAssignmentStore::new(), &EatenTracker::new());
        assert!(text.starts_with(NO_MEALS_TEXT));
    }

    #[test]
    fn test_plan_shows_soup_and_eaten() {
        let mut store = MemoryStore::new();
        let plan = assign_week(&[Meal::new("m1", "Eba", ""), Meal::new("m2", "Beans", "")]);
        let mut soups = SoupAssignmentStore::new();
        let mut eaten = EatenTracker::new();
        let _ = soups.select(&mut store, Day::Monday, SlotType::Breakfast, Soup::new("s1", "Egusi"));
        let _ = eaten.toggle(&mut store, Day::Monday, SlotType::Lunch);

        let text = format_week_plan(&plan, &soups, &eaten);
        assert!(text.contains("Breakfast  Eba with Egusi"));
        assert!(text.contains("Lunch      Beans  [Eaten]"));
        // Tuesday breakfast is Beans, lunch is Eba without a soup yet.
        assert!(text.contains("Lunch      Eba (select soup)"));
    }

    #[test]
    fn test_meal_detail_fallbacks() {
        let meal = Meal::new("m1", "Moi Moi", "");
        let text = format_meal_detail(&meal, None, None, None);
        assert!(text.contains("No description available."));
        assert!(text.contains("No ingredients listed."));
        assert!(text.contains("No instructions available."));
        assert!(text.contains("Standard"));
        assert!(text.contains("Calories: Not specified"));
        assert!(!text.contains("soup"));
    }

    #[test]
    fn test_swallow_detail_links() {
        let mut meal = Meal::new("m1", "Amala", "Yam flour swallow");
        meal.video_link = Some("amala123".to_string());
        let soup = Soup::new("s1", "Ewedu");
        let text = format_meal_detail(&meal, Some(&soup), Some("swallow1"), Some("https://v/ewedu"));

        assert!(text.contains("How to cook Amala: https://www.youtube.com/watch?v=amala123"));
        assert!(text.contains("Served with Ewedu"));
        assert!(text.contains("How to make swallow: https://www.youtube.com/watch?v=swallow1"));
        assert!(text.contains("How to cook Ewedu: https://v/ewedu"));
    }

    #[test]
    fn test_profile_view() {
        let empty = format_profile(&Profile::default());
        assert!(empty.contains("Username:      Not set"));
        assert!(empty.contains("No goals set."));
        assert!(empty.contains("Dark Mode: Off"));

        let profile = Profile {
            username: Some("Ada".to_string()),
            weight: Some(80.0),
            health_goals: Some(HealthGoals::from_input("80", "74.5", "2026-12-31").unwrap()),
            reminders_enabled: true,
            ..Default::default()
        };
        let text = format_profile(&profile);
        assert!(text.contains("Username:      Ada"));
        assert!(text.contains("Weight:        80 kg"));
        assert!(text.contains("Goal Weight:    74.5 kg"));
        assert!(text.contains("Target Date:    2026-12-31"));
        assert!(text.contains("5.5 kg to go"));
        assert!(text.contains("Reminders: On"));
    }
}
