use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::models::{Day, MealSlotKey, SlotType, Soup};
use crate::planner::SELECTED_SOUPS_KEY;
use crate::state::persistence::{load_json, save_json, KeyValueStore, Mutation};

/// Soup chosen for each `(day, slot)` cell.
///
/// Choices are not checked against the current plan: a soup may sit on a
/// slot whose meal is not a swallow, or on a slot from an older selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoupAssignmentStore {
    choices: BTreeMap<MealSlotKey, Soup>,
}

impl SoupAssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from storage. Missing or corrupt data gives an empty store.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let raw: BTreeMap<String, Soup> = load_json(store, SELECTED_SOUPS_KEY).unwrap_or_default();
        let choices = raw
            .into_iter()
            .filter_map(|(key, soup)| match key.parse::<MealSlotKey>() {
                Ok(slot_key) => Some((slot_key, soup)),
                Err(_) => {
                    warn!(key = %key, "dropping soup choice with unrecognized slot key");
                    None
                }
            })
            .collect();
        Self { choices }
    }

    /// Choose `soup` for a slot, replacing any earlier choice, and write the
    /// whole map through before returning.
    pub fn select<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        day: Day,
        slot: SlotType,
        soup: Soup,
    ) -> Mutation<()> {
        let key = MealSlotKey::new(day, slot);
        info!(key = %key, soup = %soup.name, "soup selected");
        self.choices.insert(key, soup);
        Mutation::new((), self.flush(store))
    }

    pub fn get(&self, day: Day, slot: SlotType) -> Option<&Soup> {
        self.choices.get(&MealSlotKey::new(day, slot))
    }

    pub fn get_key(&self, key: MealSlotKey) -> Option<&Soup> {
        self.choices.get(&key)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Drop in-memory choices without touching storage.
    pub(crate) fn reset(&mut self) {
        self.choices.clear();
    }

    /// Keep only the choices whose key satisfies `keep`. Returns how many were removed.
    pub(crate) fn retain<F: Fn(MealSlotKey) -> bool>(&mut self, keep: F) -> usize {
        let before = self.choices.len();
        self.choices.retain(|key, _| keep(*key));
        before - self.choices.len()
    }

    pub(crate) fn flush<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> crate::Result<()> {
        let wire: BTreeMap<String, &Soup> = self
            .choices
            .iter()
            .map(|(key, soup)| (key.to_string(), soup))
            .collect();
        save_json(store, SELECTED_SOUPS_KEY, &wire)
    }
}
