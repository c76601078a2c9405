pub mod export;
pub mod prompts;
pub mod render;

pub use export::{export_plan_csv, write_plan_csv};
pub use prompts::{prompt_meal_selection, prompt_resolve_meal, prompt_soup, prompt_yes_no};
pub use render::{
    display_meal_list, display_profile, display_progress, display_water, display_week_plan,
    format_meal_detail, format_profile, format_week_plan, NO_MEALS_TEXT,
};
