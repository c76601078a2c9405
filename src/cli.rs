use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::{parse_weight, Day, SlotType};

/// Weekly Diet: rotate your chosen meals across the week and track what you eat.
#[derive(Parser, Debug)]
#[command(name = "weekly_diet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory holding saved diet state (overrides WEEKLY_DIET_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to the meal catalog JSON document (overrides WEEKLY_DIET_CATALOG).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Default)]
pub enum Command {
    /// Show this week's meal plan.
    #[default]
    Plan,

    /// List the meals in the catalog.
    Meals,

    /// Toggle meals by name, or pick interactively when no names are given, then save.
    Select {
        /// Meal names to toggle.
        names: Vec<String>,
    },

    /// Remove all selected meals.
    ClearSelection,

    /// Choose the soup served with a swallow meal.
    Soup {
        #[arg(value_parser = parse_day)]
        day: Day,
        #[arg(value_parser = parse_slot)]
        slot: SlotType,
        /// Soup name; prompts when omitted.
        name: Option<String>,
    },

    /// Mark a meal as eaten, or unmark it.
    Eat {
        #[arg(value_parser = parse_day)]
        day: Day,
        #[arg(value_parser = parse_slot)]
        slot: SlotType,
    },

    /// Show meal details and portion for a slot.
    Show {
        #[arg(value_parser = parse_day)]
        day: Day,
        #[arg(value_parser = parse_slot)]
        slot: SlotType,
    },

    /// Track today's water intake.
    Water {
        #[command(subcommand)]
        action: Option<WaterAction>,
    },

    /// Export the weekly plan.
    Export {
        /// Output CSV file.
        #[arg(long)]
        csv: PathBuf,
    },

    /// Clear all saved diet state.
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },

    /// Show or edit your profile, health goals and settings.
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },
}

#[derive(Subcommand, Debug, Default, Clone, PartialEq)]
pub enum ProfileAction {
    /// Show the profile.
    #[default]
    Show,

    /// Update profile details. A blank value clears a text field.
    Edit {
        #[arg(long)]
        username: Option<String>,
        /// Body weight in kg.
        #[arg(long, value_parser = parse_weight)]
        weight: Option<f64>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        health_issues: Option<String>,
    },

    /// Save health goals. Every field is required.
    Goals {
        /// Current weight in kg.
        #[arg(long)]
        current_weight: Option<String>,
        /// Goal weight in kg.
        #[arg(long)]
        goal_weight: Option<String>,
        /// Target date, YYYY-MM-DD.
        #[arg(long)]
        target_date: Option<String>,
    },

    /// Change app settings.
    Settings {
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        reminders: Option<bool>,
    },
}

#[derive(Subcommand, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WaterAction {
    /// Show cups drunk today.
    #[default]
    Status,
    /// Log one cup.
    Drink,
    /// Start over at zero.
    Reset,
}

fn parse_day(s: &str) -> Result<Day, String> {
    Day::parse_loose(s).ok_or_else(|| format!("'{}' is not a day of the week", s))
}

fn parse_slot(s: &str) -> Result<SlotType, String> {
    SlotType::parse_loose(s).ok_or_else(|| format!("'{}' is not breakfast, lunch or dinner", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eat_command() {
        let cli = Cli::try_parse_from(["weekly_diet", "eat", "monday", "Breakfast"]).unwrap();
        match cli.command {
            Some(Command::Eat { day, slot }) => {
                assert_eq!(day, Day::Monday);
                assert_eq!(slot, SlotType::Breakfast);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_slot() {
        assert!(Cli::try_parse_from(["weekly_diet", "eat", "monday", "brunch"]).is_err());
    }

    #[test]
    fn test_default_command_and_globals() {
        let cli = Cli::try_parse_from(["weekly_diet", "--data-dir", "/tmp/diet"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/diet")));
    }

    #[test]
    fn test_parse_profile_goals() {
        let cli = Cli::try_parse_from([
            "weekly_diet",
            "profile",
            "goals",
            "--current-weight",
            "80",
            "--target-date",
            "2026-12-31",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Profile {
                action: Some(ProfileAction::Goals { current_weight, goal_weight, target_date }),
            }) => {
                assert_eq!(current_weight.as_deref(), Some("80"));
                assert_eq!(goal_weight, None);
                assert_eq!(target_date.as_deref(), Some("2026-12-31"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_profile_settings_and_edit() {
        let cli = Cli::try_parse_from(["weekly_diet", "profile", "settings", "--dark-mode", "true"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Profile {
                action: Some(ProfileAction::Settings { dark_mode: Some(true), reminders: None })
            })
        ));

        assert!(Cli::try_parse_from(["weekly_diet", "profile", "edit", "--weight", "-5"]).is_err());
        let cli = Cli::try_parse_from(["weekly_diet", "profile"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Profile { action: None })));
    }
}
