use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::models::{Day, MealSlotKey, SlotType};
use crate::planner::EATEN_MEALS_KEY;
use crate::state::persistence::{load_json, save_json, KeyValueStore, Mutation};

/// Which `(day, slot)` meals have been eaten. Eaten is key presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EatenTracker {
    eaten: BTreeSet<MealSlotKey>,
}

impl EatenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from storage. Entries that are not `true` count as not eaten.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let raw: BTreeMap<String, serde_json::Value> =
            load_json(store, EATEN_MEALS_KEY).unwrap_or_default();
        let eaten = raw
            .into_iter()
            .filter(|(_, flag)| flag.as_bool() == Some(true))
            .filter_map(|(key, _)| match key.parse::<MealSlotKey>() {
                Ok(slot_key) => Some(slot_key),
                Err(_) => {
                    warn!(key = %key, "dropping eaten marker with unrecognized slot key");
                    None
                }
            })
            .collect();
        Self { eaten }
    }

    /// Flip the eaten state of a slot and write the whole map through.
    ///
    /// `value` is the new state: `true` if the slot is now eaten.
    pub fn toggle<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        day: Day,
        slot: SlotType,
    ) -> Mutation<bool> {
        let key = MealSlotKey::new(day, slot);
        let now_eaten = if self.eaten.remove(&key) {
            false
        } else {
            self.eaten.insert(key);
            true
        };
        info!(key = %key, eaten = now_eaten, "eaten state toggled");
        Mutation::new(now_eaten, self.flush(store))
    }

    pub fn is_eaten(&self, day: Day, slot: SlotType) -> bool {
        self.eaten.contains(&MealSlotKey::new(day, slot))
    }

    pub fn is_eaten_key(&self, key: MealSlotKey) -> bool {
        self.eaten.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.eaten.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eaten.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.eaten.clear();
    }

    pub(crate) fn retain<F: Fn(MealSlotKey) -> bool>(&mut self, keep: F) -> usize {
        let before = self.eaten.len();
        self.eaten.retain(|key| keep(*key));
        before - self.eaten.len()
    }

    pub(crate) fn flush<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> crate::Result<()> {
        let wire: BTreeMap<String, bool> =
            self.eaten.iter().map(|key| (key.to_string(), true)).collect();
        save_json(store, EATEN_MEALS_KEY, &wire)
    }
}

/// Confirmation text for a toggle, e.g. "breakfast for Monday marked as eaten!".
pub fn eaten_notice(day: Day, slot: SlotType, eaten: bool) -> String {
    if eaten {
        format!("{} for {} marked as eaten!", slot, day)
    } else {
        format!("{} for {} unmarked", slot, day)
    }
}
