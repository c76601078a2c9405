mod eaten;
mod persistence;
mod profile;
mod selection;
mod session;
mod soups;
mod water;

pub use eaten::{eaten_notice, EatenTracker};
pub use persistence::{
    load_json, remove_key, save_json, JsonDirStore, KeyValueStore, MemoryStore, Mutation,
    STATE_FILE_PREFIX,
};
pub use profile::ProfileStore;
pub use selection::SelectedMeals;
pub use session::{DietSession, PruningPolicy, SessionHandle};
pub use soups::SoupAssignmentStore;
pub use water::{WaterOutcome, WaterTracker};
