use crate::models::{Day, DayPlan, Meal, SlotType};

/// Rotate the selected meals across the week.
///
/// Day `i` gets `selected[(i + offset) % n]` for each slot, where the slot
/// offset is 0 for breakfast, 1 for lunch and 2 for dinner. An empty
/// selection yields an empty plan. The result depends only on the order of
/// `selected`, so it is always derived fresh instead of stored.
pub fn assign_week(selected: &[Meal]) -> Vec<DayPlan> {
    if selected.is_empty() {
        return Vec::new();
    }

    let n = selected.len();
    let pick = |day: Day, slot: SlotType| selected[(day.index() + slot.offset()) % n].clone();

    Day::ALL
        .into_iter()
        .map(|day| DayPlan {
            day,
            breakfast: pick(day, SlotType::Breakfast),
            lunch: pick(day, SlotType::Lunch),
            dinner: pick(day, SlotType::Dinner),
        })
        .collect()
}
