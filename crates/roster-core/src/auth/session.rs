use chrono::{DateTime, Utc};

/// Details of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub username: String,
    pub established_at: DateTime<Utc>,
}

/// Two-state login gate. The cookies themselves live in the HTTP client;
/// this only records whether they are believed to be valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated(SessionData),
}

impl Session {
    pub fn authenticated(username: &str) -> Self {
        Session::Authenticated(SessionData {
            username: username.to_string(),
            established_at: Utc::now(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn data(&self) -> Option<&SessionData> {
        match self {
            Session::Authenticated(data) => Some(data),
            Session::Unauthenticated => None,
        }
    }

    /// Get the username if logged in
    pub fn username(&self) -> Option<&str> {
        self.data().map(|d| d.username.as_str())
    }

    pub fn clear(&mut self) {
        *self = Session::Unauthenticated;
    }
}
