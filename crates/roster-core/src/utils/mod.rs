//! Text cleanup and date/time normalization for scraped values.

pub mod format;

pub use format::{
    clean_text, parse_date, parse_day_in_month, parse_time, parse_time_range, split_role_suffix,
};
