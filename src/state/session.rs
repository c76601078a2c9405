use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::error::Result;
use crate::models::{
    Day, DayPlan, HealthGoals, Meal, MealSlotKey, Profile, ProfileUpdate, SlotType, Soup,
};
use crate::planner::{assign_week, weekly_progress};
use crate::state::eaten::EatenTracker;
use crate::state::persistence::{KeyValueStore, Mutation};
use crate::state::profile::ProfileStore;
use crate::state::selection::SelectedMeals;
use crate::state::soups::SoupAssignmentStore;
use crate::state::water::{WaterOutcome, WaterTracker};

/// What happens to soup choices and eaten markers when the selection changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PruningPolicy {
    /// Keep every entry, even for cells whose meal changed or vanished.
    #[default]
    Keep,
    /// Keep soup choices only on cells whose current meal is a swallow, and
    /// eaten markers only while a plan exists.
    PruneToPlan,
}

/// All per-user diet state plus the store it is written through to.
///
/// Built once and handed to whatever needs it. Mutations take `&mut self`,
/// so only one write-through can be in flight per session.
pub struct DietSession<S: KeyValueStore> {
    store: S,
    selection: SelectedMeals,
    soups: SoupAssignmentStore,
    eaten: EatenTracker,
    water: WaterTracker,
    profile: ProfileStore,
    pruning: PruningPolicy,
}

impl<S: KeyValueStore> DietSession<S> {
    /// Load every stored structure. Missing or corrupt values start empty.
    pub fn hydrate(store: S, daily_water_goal: u32) -> Self {
        let selection = SelectedMeals::load(&store);
        let soups = SoupAssignmentStore::load(&store);
        let eaten = EatenTracker::load(&store);
        let water = WaterTracker::load(&store, daily_water_goal);
        let profile = ProfileStore::load(&store);
        info!(
            selected = selection.len(),
            soups = soups.len(),
            eaten = eaten.len(),
            cups = water.cups(),
            has_goals = profile.get().health_goals.is_some(),
            "session hydrated"
        );
        Self {
            store,
            selection,
            soups,
            eaten,
            water,
            profile,
            pruning: PruningPolicy::default(),
        }
    }

    pub fn with_pruning(mut self, pruning: PruningPolicy) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn pruning(&self) -> PruningPolicy {
        self.pruning
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn selection(&self) -> &SelectedMeals {
        &self.selection
    }

    pub fn soups(&self) -> &SoupAssignmentStore {
        &self.soups
    }

    pub fn eaten(&self) -> &EatenTracker {
        &self.eaten
    }

    pub fn water(&self) -> &WaterTracker {
        &self.water
    }

    pub fn profile(&self) -> &Profile {
        self.profile.get()
    }

    /// The weekly grid for the current selection, computed fresh.
    pub fn week_plan(&self) -> Vec<DayPlan> {
        assign_week(self.selection.as_slice())
    }

    /// Percentage of this week's grid marked eaten.
    pub fn progress(&self) -> u8 {
        weekly_progress(&self.week_plan(), |key| self.eaten.is_eaten_key(key))
    }

    /// Toggle a meal in the in-memory selection without saving.
    pub fn toggle_selection(&mut self, meal: Meal) -> bool {
        self.selection.toggle(meal)
    }

    /// Replace the selection wholesale and save it.
    pub fn replace_selection(&mut self, meals: Vec<Meal>) -> Result<()> {
        self.selection = SelectedMeals::from_meals(meals);
        self.save_selection()
    }

    /// Save the current selection. Refused when empty.
    pub fn save_selection(&mut self) -> Result<()> {
        self.selection.save(&mut self.store)?;
        self.apply_pruning();
        Ok(())
    }

    /// Clear the selection in memory and in storage.
    pub fn clear_selection(&mut self) -> Result<()> {
        let result = self.selection.clear(&mut self.store);
        self.apply_pruning();
        result
    }

    pub fn select_soup(&mut self, day: Day, slot: SlotType, soup: Soup) -> Mutation<()> {
        self.soups.select(&mut self.store, day, slot, soup)
    }

    pub fn soup_for(&self, day: Day, slot: SlotType) -> Option<&Soup> {
        self.soups.get(day, slot)
    }

    pub fn toggle_eaten(&mut self, day: Day, slot: SlotType) -> Mutation<bool> {
        self.eaten.toggle(&mut self.store, day, slot)
    }

    pub fn is_eaten(&self, day: Day, slot: SlotType) -> bool {
        self.eaten.is_eaten(day, slot)
    }

    pub fn drink_water(&mut self) -> Mutation<WaterOutcome> {
        self.water.drink(&mut self.store)
    }

    pub fn reset_water(&mut self) -> Mutation<()> {
        self.water.reset(&mut self.store)
    }

    /// Save validated health goals, replacing any earlier ones.
    pub fn set_health_goals(&mut self, goals: HealthGoals) -> Mutation<()> {
        self.profile.set_goals(&mut self.store, goals)
    }

    /// Edit profile details. The value is whether anything changed.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Mutation<bool> {
        self.profile.update(&mut self.store, update)
    }

    pub fn set_dark_mode(&mut self, enabled: bool) -> Mutation<()> {
        self.profile.set_dark_mode(&mut self.store, enabled)
    }

    pub fn set_reminders(&mut self, enabled: bool) -> Mutation<()> {
        self.profile.set_reminders(&mut self.store, enabled)
    }

    /// Wipe all stored state and reset every in-memory structure.
    pub fn clear_all(&mut self) -> Result<()> {
        self.selection.reset();
        self.soups.reset();
        self.eaten.reset();
        self.water.reset_in_memory();
        self.profile.reset();
        self.store.clear_all()?;
        info!("all stored diet state cleared");
        Ok(())
    }

    fn apply_pruning(&mut self) {
        if self.pruning == PruningPolicy::Keep {
            return;
        }

        let plan = self.week_plan();
        let needs_soup = |key: MealSlotKey| {
            plan.get(key.day.index())
                .is_some_and(|day| day.meal(key.slot).requires_soup())
        };
        // Every cell is filled whenever at least one meal is selected.
        let has_plan = !plan.is_empty();

        let dropped_soups = self.soups.retain(needs_soup);
        let dropped_eaten = self.eaten.retain(|_| has_plan);
        if dropped_soups > 0 {
            if let Err(err) = self.soups.flush(&mut self.store) {
                warn!(error = %err, "failed to persist pruned soup choices");
            }
        }
        if dropped_eaten > 0 {
            if let Err(err) = self.eaten.flush(&mut self.store) {
                warn!(error = %err, "failed to persist pruned eaten markers");
            }
        }
        info!(dropped_soups, dropped_eaten, "pruned state to plan");
    }
}

/// Shared handle to one session. Each call holds the lock for the whole
/// mutation, so concurrent writes queue behind each other.
pub struct SessionHandle<S: KeyValueStore> {
    inner: Arc<Mutex<DietSession<S>>>,
}

impl<S: KeyValueStore> Clone for SessionHandle<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SessionHandle<S> {
    pub fn new(session: DietSession<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Run `f` with exclusive access to the session.
    ///
    /// A panic in an earlier holder does not lock the session out; the last
    /// completed state is used.
    pub fn with<R>(&self, f: impl FnOnce(&mut DietSession<S>) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
