pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod interface;
pub mod models;
pub mod planner;
pub mod state;

pub use error::{DietError, Result};
pub use models::{Day, DayPlan, HealthGoals, Meal, MealSlotKey, Profile, SlotType, Soup};
pub use planner::assign_week;
pub use state::{DietSession, JsonDirStore, KeyValueStore, MemoryStore, Mutation};
