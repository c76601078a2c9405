use serde::{Deserialize, Serialize};

use crate::error::{DietError, Result};

/// Weight-loss target set on the health goals form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthGoals {
    /// Kilograms.
    pub current_weight: f64,
    /// Kilograms.
    pub goal_weight: f64,
    /// ISO date, `YYYY-MM-DD`.
    pub target_date: String,
}

impl HealthGoals {
    /// Validate raw form input.
    ///
    /// Any blank field refuses the whole form with `IncompleteGoals` before
    /// the values themselves are checked.
    pub fn from_input(current_weight: &str, goal_weight: &str, target_date: &str) -> Result<Self> {
        if [current_weight, goal_weight, target_date]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(DietError::IncompleteGoals);
        }

        let target_date = target_date.trim();
        if !is_iso_date(target_date) {
            return Err(DietError::InvalidInput(format!(
                "target date '{}' must be YYYY-MM-DD",
                target_date
            )));
        }

        Ok(Self {
            current_weight: parse_weight(current_weight).map_err(DietError::InvalidInput)?,
            goal_weight: parse_weight(goal_weight).map_err(DietError::InvalidInput)?,
            target_date: target_date.to_string(),
        })
    }

    /// Kilograms still to lose; negative when the goal is a gain.
    pub fn remaining_kg(&self) -> f64 {
        self.current_weight - self.goal_weight
    }
}

/// Everything the profile screens edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub username: Option<String>,
    /// Kilograms.
    pub weight: Option<f64>,
    pub age: Option<u32>,
    pub health_issues: Option<String>,
    pub health_goals: Option<HealthGoals>,
    pub dark_mode: bool,
    pub reminders_enabled: bool,
}

/// Partial edit of the profile details. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    /// A blank name clears it.
    pub username: Option<String>,
    pub weight: Option<f64>,
    pub age: Option<u32>,
    /// Blank text clears it.
    pub health_issues: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Profile {
    /// Apply an edit. Returns `true` when anything changed.
    pub fn apply(&mut self, update: ProfileUpdate) -> bool {
        let before = self.clone();
        if let Some(name) = update.username {
            self.username = non_blank(name);
        }
        if let Some(weight) = update.weight {
            self.weight = Some(weight);
        }
        if let Some(age) = update.age {
            self.age = Some(age);
        }
        if let Some(issues) = update.health_issues {
            self.health_issues = non_blank(issues);
        }
        *self != before
    }
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse a body weight in kilograms. Must be a positive, finite number.
pub fn parse_weight(text: &str) -> std::result::Result<f64, String> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(kg) if kg.is_finite() && kg > 0.0 => Ok(kg),
        _ => Err(format!("weight '{}' must be a positive number of kg", text)),
    }
}

/// Check a `YYYY-MM-DD` calendar date.
pub fn is_iso_date(text: &str) -> bool {
    let mut parts = text.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return false;
    }
    let (Ok(year), Ok(month), Ok(day)) = (y.parse::<u32>(), m.parse::<u32>(), d.parse::<u32>())
    else {
        return false;
    };

    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    let days_in_month = match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => return false,
    };
    (1..=days_in_month).contains(&day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goals_require_every_field() {
        for (current, goal, date) in [
            ("", "70", "2026-12-31"),
            ("80", "  ", "2026-12-31"),
            ("80", "70", ""),
        ] {
            let err = HealthGoals::from_input(current, goal, date).unwrap_err();
            assert!(matches!(err, DietError::IncompleteGoals));
            assert_eq!(err.to_string(), "Please fill in all fields.");
        }
    }

    #[test]
    fn test_goals_from_valid_input() {
        let goals = HealthGoals::from_input("82.5", " 75 ", "2026-12-31").unwrap();
        assert_eq!(goals.current_weight, 82.5);
        assert_eq!(goals.goal_weight, 75.0);
        assert_eq!(goals.target_date, "2026-12-31");
        assert_eq!(goals.remaining_kg(), 7.5);
    }

    #[test]
    fn test_goals_reject_bad_values() {
        assert!(matches!(
            HealthGoals::from_input("heavy", "70", "2026-12-31"),
            Err(DietError::InvalidInput(_))
        ));
        assert!(matches!(
            HealthGoals::from_input("80", "-3", "2026-12-31"),
            Err(DietError::InvalidInput(_))
        ));
        assert!(matches!(
            HealthGoals::from_input("80", "70", "31/12/2026"),
            Err(DietError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_iso_dates() {
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
        assert!(!is_iso_date("2026-13-01"));
        assert!(!is_iso_date("2026-04-31"));
        assert!(!is_iso_date("2026-4-1"));
        assert!(!is_iso_date("2026-04-01-01"));
    }

    #[test]
    fn test_apply_update() {
        let mut profile = Profile::default();
        let changed = profile.apply(ProfileUpdate {
            username: Some("  Ada ".to_string()),
            weight: Some(68.0),
            ..Default::default()
        });
        assert!(changed);
        assert_eq!(profile.username.as_deref(), Some("Ada"));
        assert_eq!(profile.weight, Some(68.0));
        assert_eq!(profile.age, None);

        // Blank text clears; repeating the same edit is a no-op.
        assert!(profile.apply(ProfileUpdate {
            username: Some(String::new()),
            ..Default::default()
        }));
        assert_eq!(profile.username, None);
        assert!(!profile.apply(ProfileUpdate {
            weight: Some(68.0),
            ..Default::default()
        }));
    }

    #[test]
    fn test_profile_wire_shape() {
        let profile: Profile = serde_json::from_str(
            r#"{"username":"Ada","darkMode":true,"healthGoals":{"currentWeight":80,"goalWeight":70,"targetDate":"2026-12-31"}}"#,
        )
        .unwrap();
        assert_eq!(profile.username.as_deref(), Some("Ada"));
        assert!(profile.dark_mode);
        assert!(!profile.reminders_enabled);
        assert_eq!(profile.health_goals.unwrap().goal_weight, 70.0);

        let json = serde_json::to_value(Profile::default()).unwrap();
        assert_eq!(json["remindersEnabled"], false);
        assert!(json["healthGoals"].is_null());
    }
}
