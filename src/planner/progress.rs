use crate::models::{DayPlan, MealSlotKey};

/// Percentage of the plan's grid cells marked eaten, rounded.
///
/// Only keys that are part of `plan` count. An empty plan is 0%.
pub fn weekly_progress<F>(plan: &[DayPlan], is_eaten: F) -> u8
where
    F: Fn(MealSlotKey) -> bool,
{
    let total = plan.len() * crate::planner::SLOTS_PER_DAY;
    if total == 0 {
        return 0;
    }

    let eaten = plan
        .iter()
        .flat_map(|day| day.slots())
        .filter(|(key, _)| is_eaten(*key))
        .count();

    ((eaten as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Day, Meal, SlotType};
    use crate::planner::assign_week;

    #[test]
    fn test_empty_plan_is_zero() {
        assert_eq!(weekly_progress(&[], |_| true), 0);
    }

    #[test]
    fn test_progress_rounding() {
        let plan = assign_week(&[Meal::new("m1", "Amala", "")]);

        assert_eq!(weekly_progress(&plan, |_| false), 0);
        assert_eq!(weekly_progress(&plan, |_| true), 100);

        // 1 / 21 = 4.76%
        let monday = MealSlotKey::new(Day::Monday, SlotType::Breakfast);
        assert_eq!(weekly_progress(&plan, |k| k == monday), 5);

        // 7 / 21 = 33.3%
        assert_eq!(weekly_progress(&plan, |k| k.slot == SlotType::Lunch), 33);
    }
}
