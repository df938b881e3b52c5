//! Site description: where to log in, what the login form calls its
//! fields, and where shifts live in the schedule page.
//!
//! Everything site-specific is data rather than code. Only the two URLs are
//! mandatory; the form defaults match the Microster self-service login page.

use serde::{Deserialize, Serialize};

/// HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Browser-like user agent; some self-service portals refuse unknown clients.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub login_url: String,
    pub schedule_url: String,
    #[serde(default)]
    pub form: LoginForm,
    #[serde(default)]
    pub markup: Markup,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl SiteConfig {
    pub fn new(login_url: impl Into<String>, schedule_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            schedule_url: schedule_url.into(),
            form: LoginForm::default(),
            markup: Markup::default(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Names of the login form inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username_field: String,
    pub password_field: String,
    /// Posted verbatim with every login, e.g. image-button click coordinates.
    pub extra_fields: Vec<(String, String)>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username_field: "ctl00$ContentPlaceHolder1$txtPersonnelId".to_string(),
            password_field: "ctl00$ContentPlaceHolder1$txtPassword".to_string(),
            extra_fields: vec![
                ("ctl00$ContentPlaceHolder1$btnLogin.x".to_string(), "0".to_string()),
                ("ctl00$ContentPlaceHolder1$btnLogin.y".to_string(), "0".to_string()),
            ],
        }
    }
}

/// CSS selectors describing the shift listing.
/// `entry` is matched inside `container`; the field selectors inside each entry.
///
/// `date` may hold a full date or just a day number, which is then read
/// against the month named by `heading`. With `role` unset the role comes
/// from a bracketed suffix on the time text, e.g. `0900-1700 (Barista)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Markup {
    pub container: String,
    pub entry: String,
    pub date: String,
    pub time: String,
    pub role: Option<String>,
    pub location: String,
    pub heading: Option<String>,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            container: "table.roster".to_string(),
            entry: "tr.shift".to_string(),
            date: ".date".to_string(),
            time: ".time".to_string(),
            role: Some(".role".to_string()),
            location: ".location".to_string(),
            heading: None,
        }
    }
}

impl Markup {
    /// Microster self-service "My Roster" calendar: one `DateCellN` cell per
    /// day holding the day number and a `<div>` like `0900-1700 (Barista)`,
    /// with the month and year in the `lblCurrentMonth` label.
    pub fn microster() -> Self {
        Self {
            container: "#aspnetForm".to_string(),
            entry: r#"td[id^="ctl00_ContentPlaceHolder1_calendar_DateCell"]"#.to_string(),
            date: ".day".to_string(),
            time: "div".to_string(),
            role: None,
            location: ".location".to_string(),
            heading: Some("#ctl00_ContentPlaceHolder1_calendar_lblCurrentMonth".to_string()),
        }
    }
}
