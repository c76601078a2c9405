mod meal;
mod plan;
mod profile;

pub use meal::{is_swallow_name, Meal, Soup};
pub use plan::{Day, DayPlan, MealSlotKey, SlotType};
pub use profile::{is_iso_date, parse_weight, HealthGoals, Profile, ProfileUpdate};
