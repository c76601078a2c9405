pub mod assign;
pub mod constants;
pub mod progress;

pub use assign::assign_week;
pub use constants::*;
pub use progress::weekly_progress;
