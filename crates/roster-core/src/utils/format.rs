use chrono::{NaiveDate, NaiveTime};

/// Date layouts seen on roster pages, tried in order.
/// Day-first wins over month-first for slash dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%a %d %b %Y",
    "%A %d %B %Y",
    "%a, %d %b %Y",
    "%A, %d %B %Y",
];

/// Collapse runs of whitespace (including non-breaking spaces) to one space and trim
pub fn clean_text(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '\u{a0}')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = clean_text(text);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&text, fmt).ok())
}

/// Resolve a calendar cell's day number against a month heading such as
/// "January 2024". Full dates in the cell are accepted as-is.
pub fn parse_day_in_month(day: &str, heading: Option<&str>) -> Option<NaiveDate> {
    if let Some(date) = parse_date(day) {
        return Some(date);
    }
    let day = clean_text(day);
    if day.is_empty() || day.len() > 2 || !day.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    parse_date(&format!("{} {}", day, heading?))
}

/// Split "0900-1700 (Barista)" into the time text and the bracketed role.
/// Text without a trailing bracket comes back unchanged with no role.
pub fn split_role_suffix(text: &str) -> (String, Option<String>) {
    let text = clean_text(text);
    if let Some(open) = text.find('(') {
        if let Some(inner) = text[open + 1..].strip_suffix(')') {
            let role = clean_text(inner);
            let time = text[..open].trim().to_string();
            return (time, Some(role).filter(|r| !r.is_empty()));
        }
    }
    (text, None)
}

/// Parse a single clock time: "09:00", "0900", "9.30", "9:00 AM", "5pm"
pub fn parse_time(text: &str) -> Option<NaiveTime> {
    let lower = clean_text(text).to_ascii_lowercase();

    let (body, pm) = if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim(), Some(true))
    } else if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim(), Some(false))
    } else {
        (lower.as_str(), None)
    };

    let (hour, minute): (u32, u32) = if let Some((h, m)) = body.split_once([':', '.']) {
        if m.len() != 2 {
            return None;
        }
        (h.parse().ok()?, m.parse().ok()?)
    } else if body.chars().all(|c| c.is_ascii_digit()) {
        match body.len() {
            1 | 2 => (body.parse().ok()?, 0),
            3 | 4 => {
                let split = body.len() - 2;
                (body[..split].parse().ok()?, body[split..].parse().ok()?)
            }
            _ => return None,
        }
    } else {
        return None;
    };

    let hour = match pm {
        Some(pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            hour % 12 + if pm { 12 } else { 0 }
        }
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse "09:00-17:00", "0900 - 1700", "9:00 AM – 5:00 PM", "9am to 5pm"
pub fn parse_time_range(text: &str) -> Option<(NaiveTime, NaiveTime)> {
    let normalized = clean_text(text)
        .to_ascii_lowercase()
        .replace(['\u{2013}', '\u{2014}'], "-");

    let (start, end) = normalized
        .split_once('-')
        .or_else(|| normalized.split_once(" to "))?;

    Some((parse_time(start)?, parse_time(end)?))
}
