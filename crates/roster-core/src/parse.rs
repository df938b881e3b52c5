//! HTML extraction for the login form and the schedule page.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::api::ParseError;
use crate::config::Markup;
use crate::models::Shift;
use crate::utils::{clean_text, parse_day_in_month, parse_time_range, split_role_suffix};

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// Compiled field selectors for one shift entry
struct EntrySelectors {
    date: Selector,
    time: Selector,
    role: Option<Selector>,
    location: Selector,
}

impl EntrySelectors {
    fn compile(markup: &Markup) -> Result<Self, ParseError> {
        Ok(Self {
            date: selector(&markup.date)?,
            time: selector(&markup.time)?,
            role: markup.role.as_deref().map(selector).transpose()?,
            location: selector(&markup.location)?,
        })
    }
}

/// Cleaned text of the first match below `entry`, if any and non-empty
fn field_text(entry: ElementRef<'_>, sel: &Selector) -> Option<String> {
    entry
        .select(sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

/// `Ok(None)` for an entry with no shift in it at all (an empty calendar day)
fn parse_entry(
    entry: ElementRef<'_>,
    sels: &EntrySelectors,
    heading: Option<&str>,
) -> Result<Option<Shift>, String> {
    let role_text = sels.role.as_ref().and_then(|sel| field_text(entry, sel));
    let Some(time_text) = field_text(entry, &sels.time) else {
        return match role_text {
            Some(_) => Err("missing time".to_string()),
            None => Ok(None),
        };
    };

    let date_text = field_text(entry, &sels.date).ok_or("missing date")?;
    let date = parse_day_in_month(&date_text, heading)
        .ok_or_else(|| format!("unrecognised date '{}'", date_text))?;

    let (time_text, suffix_role) = split_role_suffix(&time_text);
    let (start, end) = parse_time_range(&time_text)
        .ok_or_else(|| format!("unrecognised time range '{}'", time_text))?;

    let role = role_text.or(suffix_role).ok_or("missing role")?;
    let location = field_text(entry, &sels.location);

    Ok(Some(Shift {
        date,
        start,
        end,
        role,
        location,
    }))
}

fn heading_text(document: &Html, markup: &Markup) -> Result<Option<String>, ParseError> {
    let Some(ref css) = markup.heading else {
        return Ok(None);
    };
    let sel = selector(css)?;
    let heading = document
        .select(&sel)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty());
    Ok(heading)
}

/// Extract shifts from a schedule page in document order.
///
/// A missing listing container is a structural failure and returns an error.
/// Individual entries lacking a date, time range or role are skipped with a
/// warning so one malformed row does not hide the rest of the roster.
/// Day-number dates are resolved against the page heading's month.
pub fn parse_shifts(html: &str, markup: &Markup) -> Result<Vec<Shift>, ParseError> {
    let container_sel = selector(&markup.container)?;
    let entry_sel = selector(&markup.entry)?;
    let fields = EntrySelectors::compile(markup)?;

    let document = Html::parse_document(html);
    let heading = heading_text(&document, markup)?;
    let container = document
        .select(&container_sel)
        .next()
        .ok_or_else(|| ParseError::MissingElement {
            selector: markup.container.clone(),
        })?;

    let mut shifts = Vec::new();
    for (index, entry) in container.select(&entry_sel).enumerate() {
        match parse_entry(entry, &fields, heading.as_deref()) {
            Ok(Some(shift)) => shifts.push(shift),
            Ok(None) => debug!(entry = index, "No shift in entry"),
            Err(reason) => warn!(entry = index, reason = %reason, "Skipping malformed shift entry"),
        }
    }

    debug!(count = shifts.len(), "Parsed shifts");
    Ok(shifts)
}

/// Text of the page heading (e.g. the month label above a calendar), if configured and present
pub fn page_heading(html: &str, markup: &Markup) -> Result<Option<String>, ParseError> {
    let document = Html::parse_document(html);
    heading_text(&document, markup)
}

/// Name/value pairs of every named hidden input, in document order.
/// ASP.NET pages refuse a postback without `__VIEWSTATE` and friends.
pub fn hidden_form_fields(html: &str) -> Vec<(String, String)> {
    let document = Html::parse_document(html);
    let Ok(sel) = Selector::parse("input[type=hidden]") else {
        return Vec::new();
    };
    let fields = document
        .select(&sel)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect();
    fields
}

/// Whether the page has an input named `name`; used to spot the login form
pub fn contains_field(html: &str, name: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(sel) = Selector::parse("input") else {
        return false;
    };
    let found = document
        .select(&sel)
        .any(|input| input.value().attr("name") == Some(name));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn row(date: &str, time: &str, role: &str, location: &str) -> String {
        format!(
            r#"<tr class="shift"><td class="date">{}</td><td class="time">{}</td><td class="role">{}</td><td class="location">{}</td></tr>"#,
            date, time, role, location
        )
    }

    fn page(rows: &[String]) -> String {
        format!(
            r#"<html><body><table class="roster"><tr><th>Date</th><th>Time</th></tr>{}</table></body></html>"#,
            rows.join("")
        )
    }

    #[test]
    fn test_parse_shifts_in_document_order() {
        let html = page(&[
            row("2024-01-01", "09:00-17:00", "Barista", "Downtown"),
            row("2024-01-02", "10:00-14:00", "Cashier", "Uptown"),
        ]);
        let shifts = parse_shifts(&html, &Markup::default()).expect("container present");

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(shifts[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(shifts[0].end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(shifts[1].role, "Cashier");
        assert_eq!(shifts[1].location.as_deref(), Some("Uptown"));
    }

    #[test]
    fn test_whitespace_trimmed_and_empty_location_is_none() {
        let html = page(&[row("\n 2024-01-01 ", " 9:00 am - 5:00 pm ", "  Shift\n  Lead ", "  ")]);
        let shifts = parse_shifts(&html, &Markup::default()).unwrap();

        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].role, "Shift Lead");
        assert_eq!(shifts[0].end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(shifts[0].location, None);
    }

    #[test]
    fn test_absent_role_element_skipped() {
        let html = page(&[
            row("2024-01-01", "09:00-17:00", "Barista", "Downtown"),
            r#"<tr class="shift"><td class="date">2024-01-02</td><td class="time">09:00-17:00</td><td class="location">Downtown</td></tr>"#.to_string(),
            row("2024-01-03", "09:00-17:00", "Barista", "Downtown"),
        ]);
        let shifts = parse_shifts(&html, &Markup::default()).unwrap();

        assert_eq!(shifts.len(), 2);
        assert_eq!(shifts[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(shifts[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_role_element_wins_over_bracket_suffix() {
        let html = page(&[row("2024-01-01", "09:00-17:00 (Cover)", "Barista", "")]);
        let shifts = parse_shifts(&html, &Markup::default()).unwrap();
        assert_eq!(shifts[0].role, "Barista");
    }

    #[test]
    fn test_microster_calendar() {
        let html = include_str!("../tests/fixtures/microster_calendar.html");
        let shifts = parse_shifts(html, &Markup::microster()).unwrap();

        assert_eq!(shifts.len(), 3);
        assert_eq!(shifts[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(shifts[0].start, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(shifts[0].end, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(shifts[0].role, "Barista");
        assert_eq!(shifts[0].location, None);
        assert_eq!(shifts[1].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(shifts[1].role, "Shift Lead");
        assert_eq!(shifts[2].date, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        assert!(shifts[2].is_overnight());
        assert_eq!(
            page_heading(html, &Markup::microster()).unwrap().as_deref(),
            Some("January 2024")
        );
    }

    #[test]
    fn test_day_number_without_heading_skipped() {
        let markup = Markup {
            heading: None,
            ..Markup::microster()
        };
        let html = include_str!("../tests/fixtures/microster_calendar.html");
        assert!(parse_shifts(html, &markup).unwrap().is_empty());
    }

    #[test]
    fn test_unparseable_entries_skipped() {
        let html = page(&[
            row("someday", "09:00-17:00", "Barista", "Downtown"),
            row("2024-01-01", "OFF", "Barista", "Downtown"),
            row("2024-01-03", "09:00-17:00", "Barista", "Downtown"),
        ]);
        let shifts = parse_shifts(&html, &Markup::default()).unwrap();

        assert_eq!(shifts.len(), 1);
        assert_eq!(shifts[0].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_empty_container_is_not_an_error() {
        let shifts = parse_shifts(&page(&[]), &Markup::default()).unwrap();
        assert!(shifts.is_empty());
    }

    #[test]
    fn test_missing_container() {
        let err = parse_shifts("<html><body><p>Maintenance</p></body></html>", &Markup::default())
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingElement {
                selector: "table.roster".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_selector() {
        let markup = Markup {
            entry: "tr[".to_string(),
            ..Markup::default()
        };
        let err = parse_shifts(&page(&[]), &markup).unwrap_err();
        assert!(matches!(err, ParseError::Selector { ref selector, .. } if selector == "tr["));
    }

    #[test]
    fn test_page_heading() {
        let html = r#"<span id="lblCurrentMonth"> January   2024 </span>"#;
        let markup = Markup {
            heading: Some("#lblCurrentMonth".to_string()),
            ..Markup::default()
        };
        assert_eq!(page_heading(html, &markup).unwrap().as_deref(), Some("January 2024"));
        assert_eq!(page_heading(html, &Markup::default()).unwrap(), None);
    }

    #[test]
    fn test_hidden_form_fields() {
        let html = r#"<form>
            <input type="hidden" name="__VIEWSTATE" value="abc" />
            <input type="hidden" name="__EVENTVALIDATION" value="def" />
            <input type="hidden" value="unnamed" />
            <input type="hidden" name="__EVENTTARGET" />
            <input type="text" name="user" value="x" />
        </form>"#;
        assert_eq!(
            hidden_form_fields(html),
            vec![
                ("__VIEWSTATE".to_string(), "abc".to_string()),
                ("__EVENTVALIDATION".to_string(), "def".to_string()),
                ("__EVENTTARGET".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_contains_field() {
        let html = r#"<input type="password" name="ctl00$ContentPlaceHolder1$txtPassword" />"#;
        assert!(contains_field(html, "ctl00$ContentPlaceHolder1$txtPassword"));
        assert!(!contains_field(html, "txtPassword"));
    }
}
