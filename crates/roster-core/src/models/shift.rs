use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One rostered work period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub role: String,
    pub location: Option<String>,
}

impl Shift {
    /// True when the shift runs past midnight (end at or before start)
    pub fn is_overnight(&self) -> bool {
        self.end <= self.start
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        let end = self.date.and_time(self.end);
        if self.is_overnight() {
            end + Duration::days(1)
        } else {
            end
        }
    }

    pub fn duration(&self) -> Duration {
        self.ends_at() - self.starts_at()
    }

    /// Hours as a decimal, e.g. 7.5
    pub fn hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }
}

/// "Mon 01 Jan 2024  09:00-17:00  Barista @ Downtown"
impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {}-{}  {}",
            self.date.format("%a %d %b %Y"),
            self.start.format("%H:%M"),
            self.end.format("%H:%M"),
            self.role
        )?;
        if let Some(ref location) = self.location {
            write!(f, " @ {}", location)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start: (u32, u32), end: (u32, u32), location: Option<&str>) -> Shift {
        Shift {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            start: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            role: "Barista".to_string(),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn test_day_shift_duration() {
        let s = shift((9, 0), (17, 30), Some("Downtown"));
        assert!(!s.is_overnight());
        assert_eq!(s.duration(), Duration::minutes(510));
        assert_eq!(s.hours(), 8.5);
    }

    #[test]
    fn test_overnight_shift_ends_next_day() {
        let s = shift((22, 0), (6, 0), None);
        assert!(s.is_overnight());
        assert_eq!(s.ends_at().date(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(s.duration(), Duration::hours(8));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            shift((9, 0), (17, 0), Some("Downtown")).to_string(),
            "Mon 01 Jan 2024  09:00-17:00  Barista @ Downtown"
        );
        assert_eq!(
            shift((9, 0), (17, 0), None).to_string(),
            "Mon 01 Jan 2024  09:00-17:00  Barista"
        );
    }
}
