use serde::{Deserialize, Serialize};

use super::Shift;

/// Everything read from one schedule page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Page heading such as the calendar month label, when the markup names one
    pub heading: Option<String>,
    pub shifts: Vec<Shift>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Sum of shift lengths in decimal hours
    pub fn total_hours(&self) -> f64 {
        self.shifts.iter().map(Shift::hours).sum()
    }
}
