use tracing::{info, warn};

use crate::planner::{CUPS_DRUNK_KEY, DEFAULT_DAILY_WATER_CUPS, WATER_ALMOST_THERE_GAP};
use crate::state::persistence::{KeyValueStore, Mutation};

/// What happened when the user logged a cup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaterOutcome {
    Drank { cups: u32, message: &'static str },
    GoalAlreadyReached,
}

/// Daily water intake counter, capped at the goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterTracker {
    cups: u32,
    daily_goal: u32,
}

impl Default for WaterTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DAILY_WATER_CUPS)
    }
}

impl WaterTracker {
    pub fn new(daily_goal: u32) -> Self {
        Self {
            cups: 0,
            daily_goal: daily_goal.max(1),
        }
    }

    /// Hydrate from storage. Anything that is not an integer counts as 0.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, daily_goal: u32) -> Self {
        let mut tracker = Self::new(daily_goal);
        tracker.cups = match store.load(CUPS_DRUNK_KEY) {
            Ok(Some(raw)) => raw.trim().trim_matches('"').parse().unwrap_or_else(|_| {
                warn!(value = %raw, "stored cup count unreadable, starting from 0");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "failed to read cup count, starting from 0");
                0
            }
        };
        tracker
    }

    pub fn cups(&self) -> u32 {
        self.cups
    }

    pub fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    pub fn goal_reached(&self) -> bool {
        self.cups >= self.daily_goal
    }

    /// Fraction of the goal reached, clamped to `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        (self.cups as f64 / self.daily_goal as f64).min(1.0)
    }

    /// Log one cup. Nothing changes once the goal is reached.
    pub fn drink<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Mutation<WaterOutcome> {
        if self.goal_reached() {
            return Mutation::new(WaterOutcome::GoalAlreadyReached, Ok(()));
        }
        self.cups += 1;
        info!(cups = self.cups, goal = self.daily_goal, "cup logged");
        let outcome = WaterOutcome::Drank {
            cups: self.cups,
            message: self.motivation(),
        };
        Mutation::new(outcome, self.flush(store))
    }

    /// Start the day over at zero cups.
    pub fn reset<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Mutation<()> {
        self.cups = 0;
        Mutation::new((), self.flush(store))
    }

    /// Message shown right after a cup is logged.
    pub fn motivation(&self) -> &'static str {
        match self.daily_goal.saturating_sub(self.cups) {
            0 => "You did it! Daily goal reached!",
            1 => "One more cup to go! Finish strong!",
            2 => "Almost there! Just 2 more cups left!",
            _ => "Stay hydrated! Keep going!",
        }
    }

    /// Standing status line under the progress bar.
    pub fn status_line(&self) -> &'static str {
        if self.goal_reached() {
            "Goal Achieved!"
        } else if self.cups >= self.daily_goal.saturating_sub(WATER_ALMOST_THERE_GAP) {
            "Almost there!"
        } else {
            "Keep going! Every sip helps!"
        }
    }

    pub(crate) fn reset_in_memory(&mut self) {
        self.cups = 0;
    }

    fn flush<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> crate::Result<()> {
        store
            .save(CUPS_DRUNK_KEY, &self.cups.to_string())
            .map_err(|e| {
                warn!(error = %e, "failed to persist cup count");
                match e {
                    crate::DietError::PersistenceWrite { .. } => e,
                    other => crate::DietError::write_failure(CUPS_DRUNK_KEY, other),
                }
            })
    }
}
