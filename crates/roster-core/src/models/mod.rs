//! Data models for scraped roster entries.
//!
//! - `Shift`: one rostered work period (date, start/end time, role, location)
//! - `Schedule`: the shifts of one schedule page plus its heading

pub mod schedule;
pub mod shift;

pub use schedule::Schedule;
pub use shift::Shift;
