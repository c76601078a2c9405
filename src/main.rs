use clap::Parser;

use weekly_diet_rs::catalog::{
    fetch_meals_or_empty, fetch_soups_or_empty, video_or_notice, JsonCatalog, MealCatalog,
};
use weekly_diet_rs::cli::{Cli, Command, ProfileAction, WaterAction};
use weekly_diet_rs::config::DietConfig;
use weekly_diet_rs::error::{DietError, Result};
use weekly_diet_rs::interface::{
    display_meal_list, display_profile, display_progress, display_water, display_week_plan,
    export_plan_csv, format_meal_detail, prompt_meal_selection, prompt_resolve_meal, prompt_soup, prompt_yes_no,
};
use weekly_diet_rs::models::{Day, HealthGoals, ProfileUpdate, SlotType};
use weekly_diet_rs::state::{eaten_notice, DietSession, JsonDirStore, Mutation, WaterOutcome};

type Session = DietSession<JsonDirStore>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = DietConfig::resolve(cli.data_dir.as_deref(), cli.catalog.as_deref())?;
    let store = JsonDirStore::open(&config.data_dir)?;
    let mut session = DietSession::hydrate(store, config.daily_water_cups);
    let catalog = JsonCatalog::new(&config.catalog_path);

    match cli.command.unwrap_or_default() {
        Command::Plan => cmd_plan(&session),
        Command::Meals => cmd_meals(&session, &catalog),
        Command::Select { names } => cmd_select(&mut session, &catalog, &names),
        Command::ClearSelection => cmd_clear_selection(&mut session),
        Command::Soup { day, slot, name } => cmd_soup(&mut session, &catalog, day, slot, name),
        Command::Eat { day, slot } => cmd_eat(&mut session, day, slot),
        Command::Show { day, slot } => cmd_show(&session, &catalog, day, slot),
        Command::Water { action } => cmd_water(&mut session, action.unwrap_or_default()),
        Command::Export { csv } => {
            let plan = session.week_plan();
            export_plan_csv(&csv, &plan, session.soups(), session.eaten())?;
            println!("Wrote weekly plan to {}", csv.display());
            Ok(())
        }
        Command::Reset { yes } => cmd_reset(&mut session, yes),
        Command::Profile { action } => cmd_profile(&mut session, action.unwrap_or_default()),
    }
}

/// Tell the user when a change stayed in memory only.
fn report_unsaved<T>(mutation: &Mutation<T>) {
    if let Some(err) = &mutation.persist_error {
        eprintln!("Warning: change may not have been saved ({})", err);
    }
}

fn cmd_plan(session: &Session) -> Result<()> {
    let plan = session.week_plan();
    display_week_plan(&plan, session.soups(), session.eaten());
    if !plan.is_empty() {
        display_progress(session.progress());
    }
    Ok(())
}

fn cmd_meals(session: &Session, catalog: &JsonCatalog) -> Result<()> {
    let (meals, notice) = fetch_meals_or_empty(catalog);
    if let Some(notice) = notice {
        eprintln!("Notice: failed to load meals ({})", notice);
    }
    display_meal_list(&meals, |m| session.selection().contains(&m.id));
    Ok(())
}

fn cmd_select(session: &mut Session, catalog: &JsonCatalog, names: &[String]) -> Result<()> {
    let (meals, notice) = fetch_meals_or_empty(catalog);
    if let Some(notice) = notice {
        eprintln!("Notice: failed to load meals ({})", notice);
    }
    if meals.is_empty() {
        println!("No meals available to select.");
        return Ok(());
    }

    if names.is_empty() {
        let picked = prompt_meal_selection(&meals, session.selection().as_slice())?;
        if picked.is_empty() {
            println!("Please select at least one meal.");
            return Ok(());
        }
        session.replace_selection(picked)?;
    } else {
        for name in names {
            if let Some(meal) = prompt_resolve_meal(&meals, name)? {
                let now_selected = session.toggle_selection(meal.clone());
                let verb = if now_selected { "Added" } else { "Removed" };
                println!("{}: {}", verb, meal.name);
            }
        }
        match session.save_selection() {
            Ok(()) => {}
            Err(DietError::NoMealsSelected) => {
                println!("Please select at least one meal.");
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }

    println!("Meals saved successfully! ({} selected)", session.selection().len());
    Ok(())
}

fn cmd_clear_selection(session: &mut Session) -> Result<()> {
    session.clear_selection()?;
    println!("All selected meals have been removed.");
    Ok(())
}

fn cmd_soup(
    session: &mut Session,
    catalog: &JsonCatalog,
    day: Day,
    slot: SlotType,
    name: Option<String>,
) -> Result<()> {
    let plan = session.week_plan();
    let Some(day_plan) = plan.get(day.index()) else {
        println!("No meals selected yet");
        return Ok(());
    };
    let meal = day_plan.meal(slot);
    if !meal.requires_soup() {
        println!("{} is not a swallow; no soup needed.", meal.name);
        return Ok(());
    }

    let (soups, notice) = fetch_soups_or_empty(catalog);
    if let Some(notice) = notice {
        eprintln!("Notice: failed to load soups ({})", notice);
    }

    let chosen = match name {
        Some(name) => {
            let soup = soups
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
                .cloned()
                .ok_or_else(|| DietError::SoupNotFound(name.clone()))?;
            Some(soup)
        }
        None if soups.is_empty() => {
            println!("No soups available.");
            None
        }
        None => prompt_soup(&soups)?,
    };

    // Backing out leaves the previous choice in place.
    if let Some(soup) = chosen {
        let soup_name = soup.name.clone();
        let mutation = session.select_soup(day, slot, soup);
        report_unsaved(&mutation);
        println!("{} {} on {} will be served with {}", meal.name, slot, day, soup_name);
    }
    Ok(())
}

fn cmd_eat(session: &mut Session, day: Day, slot: SlotType) -> Result<()> {
    if session.selection().is_empty() {
        println!("No meals selected yet");
        return Ok(());
    }
    let mutation = session.toggle_eaten(day, slot);
    report_unsaved(&mutation);
    println!("{}", eaten_notice(day, slot, mutation.value));
    Ok(())
}

fn cmd_show(session: &Session, catalog: &JsonCatalog, day: Day, slot: SlotType) -> Result<()> {
    let plan = session.week_plan();
    let Some(day_plan) = plan.get(day.index()) else {
        println!("No meals selected yet");
        return Ok(());
    };
    let planned = day_plan.meal(slot);

    // Prefer the live catalog record; fall back to the saved copy.
    let meal = match catalog.fetch_meal(&planned.id) {
        Ok(Some(meal)) => meal,
        Ok(None) => planned.clone(),
        Err(err) => {
            eprintln!("Notice: {}", err);
            planned.clone()
        }
    };

    let soup = session.soup_for(day, slot);
    let (swallow_video, soup_video) = if meal.requires_soup() {
        let swallow = video_link(catalog.swallow_video(&meal.name));
        let soup_link = soup.and_then(|soup| video_link(catalog.soup_video(&soup.name)));
        (swallow, soup_link)
    } else {
        (None, None)
    };

    print!(
        "{}",
        format_meal_detail(&meal, soup, swallow_video.as_deref(), soup_video.as_deref())
    );
    if session.is_eaten(day, slot) {
        println!("\nEaten on {}.", day);
    }
    Ok(())
}

fn video_link(lookup: Result<Option<String>>) -> Option<String> {
    let (link, notice) = video_or_notice(lookup);
    if let Some(notice) = notice {
        eprintln!("Notice: {}", notice);
    }
    link
}

fn cmd_water(session: &mut Session, action: WaterAction) -> Result<()> {
    match action {
        WaterAction::Status => {}
        WaterAction::Drink => {
            let mutation = session.drink_water();
            report_unsaved(&mutation);
            match mutation.value {
                WaterOutcome::Drank { message, .. } => println!("{}", message),
                WaterOutcome::GoalAlreadyReached => {
                    println!("Goal Reached! You've met your daily goal! Stay Hydrated!")
                }
            }
        }
        WaterAction::Reset => {
            let mutation = session.reset_water();
            report_unsaved(&mutation);
        }
    }
    display_water(session.water());
    Ok(())
}

fn cmd_reset(session: &mut Session, yes: bool) -> Result<()> {
    if !yes && !prompt_yes_no("Clear all saved meals, soups, eaten marks and water intake?", false)? {
        println!("Nothing cleared.");
        return Ok(());
    }
    session.clear_all()?;
    println!("All diet state cleared.");
    Ok(())
}

fn cmd_profile(session: &mut Session, action: ProfileAction) -> Result<()> {
    match action {
        ProfileAction::Show => {}
        ProfileAction::Edit { username, weight, age, health_issues } => {
            let update = ProfileUpdate { username, weight, age, health_issues };
            if update.is_empty() {
                println!("Nothing to update. Pass --username, --weight, --age or --health-issues.");
                return Ok(());
            }
            let mutation = session.update_profile(update);
            report_unsaved(&mutation);
            if mutation.value {
                println!("Profile Updated: your changes have been saved.");
            } else {
                println!("Profile unchanged.");
            }
        }
        ProfileAction::Goals { current_weight, goal_weight, target_date } => {
            let goals = match HealthGoals::from_input(
                current_weight.as_deref().unwrap_or_default(),
                goal_weight.as_deref().unwrap_or_default(),
                target_date.as_deref().unwrap_or_default(),
            ) {
                Ok(goals) => goals,
                Err(DietError::IncompleteGoals) => {
                    println!("{}", DietError::IncompleteGoals);
                    return Ok(());
                }
                Err(e) => return Err(e),
            };
            let mutation = session.set_health_goals(goals);
            report_unsaved(&mutation);
            println!("Health goals saved.");
        }
        ProfileAction::Settings { dark_mode, reminders } => {
            if dark_mode.is_none() && reminders.is_none() {
                println!("Nothing to change. Pass --dark-mode or --reminders.");
                return Ok(());
            }
            if let Some(enabled) = dark_mode {
                report_unsaved(&session.set_dark_mode(enabled));
            }
            if let Some(enabled) = reminders {
                report_unsaved(&session.set_reminders(enabled));
            }
        }
    }
    display_profile(session.profile());
    Ok(())
}
