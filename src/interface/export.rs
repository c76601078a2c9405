use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::DayPlan;
use crate::state::{EatenTracker, SoupAssignmentStore};

/// Write the weekly grid as CSV: one row per cell.
pub fn write_plan_csv<W: Write>(
    writer: W,
    plan: &[DayPlan],
    soups: &SoupAssignmentStore,
    eaten: &EatenTracker,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["day", "slot", "meal", "soup", "eaten"])?;

    for day in plan {
        for (key, meal) in day.slots() {
            let soup = if meal.requires_soup() {
                soups.get_key(key).map(|s| s.name.as_str()).unwrap_or("")
            } else {
                ""
            };
            let eaten = if eaten.is_eaten_key(key) { "yes" } else { "no" };
            wtr.write_record([key.day.as_str(), key.slot.as_str(), meal.name.as_str(), soup, eaten])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Write the weekly grid to a CSV file.
pub fn export_plan_csv(
    path: &Path,
    plan: &[DayPlan],
    soups: &SoupAssignmentStore,
    eaten: &EatenTracker,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_plan_csv(file, plan, soups, eaten)
}
