/// Meals that must be eaten with a soup ("swallows").
pub const SWALLOW_MEALS: [&str; 3] = ["Amala", "Eba", "Semo"];

/// Meal slots per day (breakfast, lunch, dinner).
pub const SLOTS_PER_DAY: usize = 3;

// ─────────────────────────────────────────────────────────────────────────────
// Storage keys
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered list of selected meals.
pub const SELECTED_MEALS_KEY: &str = "selectedMeals";

/// Map of `"{day}-{slot}"` to the chosen soup.
pub const SELECTED_SOUPS_KEY: &str = "selectedSoups";

/// Map of `"{day}-{slot}"` to `true` for eaten meals.
pub const EATEN_MEALS_KEY: &str = "eatenMeals";

/// Cups of water drunk today, as an integer string.
pub const CUPS_DRUNK_KEY: &str = "cupsDrunk";

/// Profile details, health goals and settings.
pub const PROFILE_KEY: &str = "profile";

// ─────────────────────────────────────────────────────────────────────────────
// Water intake
// ─────────────────────────────────────────────────────────────────────────────

/// Default daily water goal in cups.
pub const DEFAULT_DAILY_WATER_CUPS: u32 = 8;

/// Cups short of the goal at which the "almost there" status kicks in.
pub const WATER_ALMOST_THERE_GAP: u32 = 2;

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

/// Prefix used to expand bare video ids into links.
pub const YOUTUBE_WATCH_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Minimum Jaro-Winkler similarity for a fuzzy meal-name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum fuzzy candidates offered to the user.
pub const FUZZY_MAX_CANDIDATES: usize = 5;
