use tracing::info;

use crate::error::{DietError, Result};
use crate::models::Meal;
use crate::planner::SELECTED_MEALS_KEY;
use crate::state::persistence::{load_json, remove_key, save_json, KeyValueStore};

/// The user's chosen meals, in the order they were picked.
///
/// Order drives the weekly rotation. Ids are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectedMeals {
    meals: Vec<Meal>,
}

impl SelectedMeals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from a list, keeping the first occurrence of each id.
    pub fn from_meals(meals: Vec<Meal>) -> Self {
        let mut selection = Self::new();
        for meal in meals {
            if !selection.contains(&meal.id) {
                selection.meals.push(meal);
            }
        }
        selection
    }

    /// Hydrate from storage. Missing or corrupt data gives an empty selection.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let meals: Vec<Meal> = load_json(store, SELECTED_MEALS_KEY).unwrap_or_default();
        Self::from_meals(meals)
    }

    /// Add the meal if its id is absent, remove it otherwise.
    ///
    /// Returns `true` if the meal is selected afterwards.
    pub fn toggle(&mut self, meal: Meal) -> bool {
        if let Some(pos) = self.meals.iter().position(|m| m.id == meal.id) {
            self.meals.remove(pos);
            false
        } else {
            self.meals.push(meal);
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.meals.iter().any(|m| m.id == id)
    }

    pub fn as_slice(&self) -> &[Meal] {
        &self.meals
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Replace the stored selection with this one.
    ///
    /// An empty selection is refused and nothing is written.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        if self.meals.is_empty() {
            return Err(DietError::NoMealsSelected);
        }
        save_json(store, SELECTED_MEALS_KEY, &self.meals)?;
        info!(count = self.meals.len(), "selection saved");
        Ok(())
    }

    /// Empty the selection and remove it from storage.
    ///
    /// The in-memory selection is cleared even if the removal fails.
    pub fn clear<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<()> {
        self.meals.clear();
        remove_key(store, SELECTED_MEALS_KEY)?;
        info!("selection cleared");
        Ok(())
    }

    pub(crate) fn reset(&mut self) {
        self.meals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;

    fn meal(id: &str, name: &str) -> Meal {
        Meal::new(id, name, "")
    }

    #[test]
    fn test_toggle_by_id() {
        let mut selection = SelectedMeals::new();
        assert!(selection.toggle(meal("m1", "Eba")));
        assert!(selection.toggle(meal("m2", "Jollof Rice")));
        assert_eq!(selection.len(), 2);

        // Same id, different payload: still a removal.
        assert!(!selection.toggle(meal("m1", "Eba (renamed)")));
        assert_eq!(selection.len(), 1);
        assert!(!selection.contains("m1"));
        assert!(selection.contains("m2"));
    }

    #[test]
    fn test_save_preserves_order() {
        let mut store = MemoryStore::new();
        let selection = SelectedMeals::from_meals(vec![
            meal("m3", "Semo"),
            meal("m1", "Eba"),
            meal("m2", "Moi Moi"),
        ]);
        selection.save(&mut store).unwrap();

        let reloaded = SelectedMeals::load(&store);
        assert_eq!(reloaded, selection);
        let ids: Vec<&str> = reloaded.as_slice().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m3", "m1", "m2"]);
    }

    #[test]
    fn test_empty_save_refused() {
        let mut store = MemoryStore::new();
        let err = SelectedMeals::new().save(&mut store).unwrap_err();
        assert!(matches!(err, DietError::NoMealsSelected));
        assert!(store.is_empty());
    }

    #[test]
    fn test_clear_removes_key() {
        let mut store = MemoryStore::new();
        let mut selection = SelectedMeals::from_meals(vec![meal("m1", "Eba")]);
        selection.save(&mut store).unwrap();
        selection.clear(&mut store).unwrap();

        assert!(selection.is_empty());
        assert!(store.load(SELECTED_MEALS_KEY).unwrap().is_none());
    }

    #[test]
    fn test_from_meals_dedupes() {
        let selection = SelectedMeals::from_meals(vec![meal("m1", "Eba"), meal("m1", "Eba")]);
        assert_eq!(selection.len(), 1);
    }
}
