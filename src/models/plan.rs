use std::fmt;
use std::str::FromStr;

use crate::error::DietError;
use crate::models::Meal;

/// Day of the plan week. Spellings are used verbatim in stored keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Position in the week, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Case-insensitive parse for user input.
    ///
    /// Full names only: "monday" is accepted, "MON" is not.
    pub fn parse_loose(input: &str) -> Option<Day> {
        let input = input.trim();
        Day::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Day::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| DietError::InvalidInput(format!("unknown day '{}'", s)))
    }
}

/// Meal slot within a day. Spellings are lowercase in stored keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotType {
    Breakfast,
    Lunch,
    Dinner,
}

impl SlotType {
    pub const ALL: [SlotType; 3] = [SlotType::Breakfast, SlotType::Lunch, SlotType::Dinner];

    /// Rotation offset applied to the day index.
    pub fn offset(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotType::Breakfast => "breakfast",
            SlotType::Lunch => "lunch",
            SlotType::Dinner => "dinner",
        }
    }

    /// Capitalized label for display.
    pub fn label(self) -> &'static str {
        match self {
            SlotType::Breakfast => "Breakfast",
            SlotType::Lunch => "Lunch",
            SlotType::Dinner => "Dinner",
        }
    }

    pub fn parse_loose(input: &str) -> Option<SlotType> {
        let input = input.trim();
        SlotType::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlotType {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DietError::InvalidInput(format!("unknown meal slot '{}'", s)))
    }
}

/// One cell of the weekly grid. Its string form `"{day}-{slot}"` is the
/// stored map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MealSlotKey {
    pub day: Day,
    pub slot: SlotType,
}

impl MealSlotKey {
    pub fn new(day: Day, slot: SlotType) -> Self {
        Self { day, slot }
    }

    /// All 21 keys in grid order.
    pub fn all() -> impl Iterator<Item = MealSlotKey> {
        Day::ALL
            .into_iter()
            .flat_map(|day| SlotType::ALL.into_iter().map(move |slot| MealSlotKey { day, slot }))
    }
}

impl fmt::Display for MealSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.slot)
    }
}

impl FromStr for MealSlotKey {
    type Err = DietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, slot) = s
            .split_once('-')
            .ok_or_else(|| DietError::InvalidInput(format!("malformed meal slot key '{}'", s)))?;
        Ok(Self {
            day: day.parse()?,
            slot: slot.parse()?,
        })
    }
}

/// Meals assigned to one day of the week.
#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub day: Day,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
}

impl DayPlan {
    pub fn meal(&self, slot: SlotType) -> &Meal {
        match slot {
            SlotType::Breakfast => &self.breakfast,
            SlotType::Lunch => &self.lunch,
            SlotType::Dinner => &self.dinner,
        }
    }

    /// The day's three slots in order, each with its key.
    pub fn slots(&self) -> impl Iterator<Item = (MealSlotKey, &Meal)> {
        SlotType::ALL
            .into_iter()
            .map(move |slot| (MealSlotKey::new(self.day, slot), self.meal(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_string_form() {
        let key = MealSlotKey::new(Day::Monday, SlotType::Breakfast);
        assert_eq!(key.to_string(), "Monday-breakfast");

        let parsed: MealSlotKey = "Tuesday-dinner".parse().unwrap();
        assert_eq!(parsed, MealSlotKey::new(Day::Tuesday, SlotType::Dinner));
    }

    #[test]
    fn test_key_parse_is_case_sensitive() {
        assert!("monday-breakfast".parse::<MealSlotKey>().is_err());
        assert!("Monday-Breakfast".parse::<MealSlotKey>().is_err());
        assert!("Amala".parse::<MealSlotKey>().is_err());
        assert!("Monday-brunch".parse::<MealSlotKey>().is_err());
    }

    #[test]
    fn test_all_keys() {
        let keys: Vec<MealSlotKey> = MealSlotKey::all().collect();
        assert_eq!(keys.len(), 21);
        assert_eq!(keys[0].to_string(), "Monday-breakfast");
        assert_eq!(keys[20].to_string(), "Sunday-dinner");
    }

    #[test]
    fn test_loose_parse() {
        assert_eq!(Day::parse_loose("wednesday"), Some(Day::Wednesday));
        assert_eq!(Day::parse_loose(" SUNDAY "), Some(Day::Sunday));
        assert_eq!(Day::parse_loose("monday"), Some(Day::Monday));
        assert_eq!(Day::parse_loose("Mon"), None);
        assert_eq!(Day::parse_loose("MON"), None);
        assert_eq!(SlotType::parse_loose("Dinner"), Some(SlotType::Dinner));
    }

    #[test]
    fn test_day_index_order() {
        for (i, day) in Day::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
        assert_eq!(SlotType::Lunch.offset(), 1);
    }
}
