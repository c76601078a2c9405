use tracing::{debug, info};

use crate::models::{HealthGoals, Profile, ProfileUpdate};
use crate::planner::PROFILE_KEY;
use crate::state::persistence::{load_json, save_json, KeyValueStore, Mutation};

/// The stored profile, written through as one JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileStore {
    profile: Profile,
}

impl ProfileStore {
    /// Hydrate from storage. Missing or corrupt data gives the default profile.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            profile: load_json(store, PROFILE_KEY).unwrap_or_default(),
        }
    }

    pub fn get(&self) -> &Profile {
        &self.profile
    }

    /// Replace the health goals.
    pub fn set_goals<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        goals: HealthGoals,
    ) -> Mutation<()> {
        info!(
            current = goals.current_weight,
            goal = goals.goal_weight,
            target = %goals.target_date,
            "health goals saved"
        );
        self.profile.health_goals = Some(goals);
        Mutation::new((), self.flush(store))
    }

    /// Apply a details edit. Returns whether anything changed; an edit that
    /// changes nothing is not written.
    pub fn update<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        update: ProfileUpdate,
    ) -> Mutation<bool> {
        if !self.profile.apply(update) {
            debug!("profile edit changed nothing");
            return Mutation::new(false, Ok(()));
        }
        info!("profile details updated");
        Mutation::new(true, self.flush(store))
    }

    pub fn set_dark_mode<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        enabled: bool,
    ) -> Mutation<()> {
        self.profile.dark_mode = enabled;
        Mutation::new((), self.flush(store))
    }

    pub fn set_reminders<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        enabled: bool,
    ) -> Mutation<()> {
        self.profile.reminders_enabled = enabled;
        Mutation::new((), self.flush(store))
    }

    pub(crate) fn reset(&mut self) {
        self.profile = Profile::default();
    }

    fn flush<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> crate::Result<()> {
        save_json(store, PROFILE_KEY, &self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DietError, Result};
    use crate::state::MemoryStore;

    fn goals() -> HealthGoals {
        HealthGoals::from_input("80", "72", "2026-12-31").unwrap()
    }

    #[test]
    fn test_goals_persist() {
        let mut store = MemoryStore::new();
        let mut profile = ProfileStore::default();
        let m = profile.set_goals(&mut store, goals());
        assert!(m.is_persisted());

        let reloaded = ProfileStore::load(&store);
        assert_eq!(reloaded.get().health_goals, Some(goals()));
        assert_eq!(reloaded, profile);
    }

    #[test]
    fn test_settings_and_details_persist() {
        let mut store = MemoryStore::new();
        let mut profile = ProfileStore::default();
        let _ = profile.set_dark_mode(&mut store, true);
        let _ = profile.set_reminders(&mut store, true);
        let m = profile.update(
            &mut store,
            ProfileUpdate {
                username: Some("Ada".to_string()),
                age: Some(34),
                ..Default::default()
            },
        );
        assert!(m.value);

        let reloaded = ProfileStore::load(&store).get().clone();
        assert!(reloaded.dark_mode);
        assert!(reloaded.reminders_enabled);
        assert_eq!(reloaded.username.as_deref(), Some("Ada"));
        assert_eq!(reloaded.age, Some(34));
    }

    #[test]
    fn test_unchanged_edit_is_not_written() {
        let mut store = MemoryStore::new();
        let mut profile = ProfileStore::default();
        let m = profile.update(&mut store, ProfileUpdate::default());
        assert!(!m.value);
        assert!(store.is_empty());
    }

    #[test]
    fn test_corrupt_profile_is_default() {
        let mut store = MemoryStore::new();
        store.save(PROFILE_KEY, "{\"age\": \"old\"").unwrap();
        assert_eq!(ProfileStore::load(&store).get(), &Profile::default());
    }

    struct ReadOnly;

    impl KeyValueStore for ReadOnly {
        fn load(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        fn save(&mut self, key: &str, _value: &str) -> Result<()> {
            Err(DietError::write_failure(key, "read-only"))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
        fn clear_all(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_keeps_goals_in_memory() {
        let mut profile = ProfileStore::default();
        let m = profile.set_goals(&mut ReadOnly, goals());
        assert!(matches!(
            m.persist_error,
            Some(DietError::PersistenceWrite { ref key, .. }) if key == PROFILE_KEY
        ));
        assert_eq!(profile.get().health_goals, Some(goals()));
    }
}
