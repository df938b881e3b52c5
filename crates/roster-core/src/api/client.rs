//! Session client for the roster site.
//!
//! `RosterClient` owns one cookie-backed HTTP session. `login` replays the
//! site's HTML login form, `fetch_shifts` downloads the schedule page with the
//! same cookies and hands the markup to the parser.

use std::time::Duration;

use reqwest::{header, Client, Url};
use tracing::{debug, info, warn};

use crate::auth::{Credentials, Session};
use crate::config::SiteConfig;
use crate::models::{Schedule, Shift};
use crate::parse;

use super::RosterError;

pub struct RosterClient {
    config: SiteConfig,
    login_url: Url,
    schedule_url: Url,
    client: Client,
    session: Session,
}

impl RosterClient {
    /// Create a client for the given site. No request is made until `login`.
    pub fn new(config: SiteConfig) -> Result<Self, RosterError> {
        let login_url = Self::parse_url(&config.login_url)?;
        let schedule_url = Self::parse_url(&config.schedule_url)?;
        let client = Self::build_http_client(&config)?;

        Ok(Self {
            config,
            login_url,
            schedule_url,
            client,
            session: Session::default(),
        })
    }

    fn parse_url(raw: &str) -> Result<Url, RosterError> {
        Url::parse(raw).map_err(|e| RosterError::Client(format!("invalid URL '{}': {}", raw, e)))
    }

    /// Every session gets its own cookie jar, so dropping the client drops the session.
    fn build_http_client(config: &SiteConfig) -> Result<Client, RosterError> {
        Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RosterError::Client(e.to_string()))
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Forget the current session: fresh cookie jar, unauthenticated.
    pub fn logout(&mut self) -> Result<(), RosterError> {
        self.client = Self::build_http_client(&self.config)?;
        self.session.clear();
        Ok(())
    }

    /// Log in through the site's form.
    ///
    /// Loads the login page for its hidden state fields, then posts them back
    /// along with the credentials. Login counts as failed if the server answers
    /// with a non-2xx status or shows the login form again.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), RosterError> {
        self.logout()?;

        if !credentials.is_complete() {
            return Err(RosterError::Authentication(
                "Username and password required".to_string(),
            ));
        }

        info!(username = %credentials.username, "Logging in");

        let response = self
            .client
            .get(self.login_url.clone())
            .send()
            .await
            .map_err(|e| RosterError::Authentication(format!("Failed to load login page: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RosterError::Authentication(format!(
                "Login page returned {}",
                status
            )));
        }

        let login_page = response
            .text()
            .await
            .map_err(|e| RosterError::Authentication(format!("Failed to read login page: {}", e)))?;

        let form = self.login_form(&login_page, credentials);
        debug!(fields = form.len(), "Submitting login form");

        let response = self
            .client
            .post(self.login_url.clone())
            .header(header::REFERER, self.login_url.as_str())
            .form(&form)
            .send()
            .await
            .map_err(|e| RosterError::Authentication(format!("Failed to send login request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Login rejected");
            return Err(RosterError::Authentication(format!(
                "Server returned {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RosterError::Authentication(format!("Failed to read login response: {}", e)))?;

        if parse::contains_field(&body, &self.config.form.password_field) {
            warn!("Login form shown again after submit");
            return Err(RosterError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        self.session = Session::authenticated(&credentials.username);
        info!(username = %credentials.username, "Login successful");
        Ok(())
    }

    /// Hidden page state first, then credentials, then fixed submit fields
    fn login_form(&self, login_page: &str, credentials: &Credentials) -> Vec<(String, String)> {
        let form = &self.config.form;
        let mut fields = parse::hidden_form_fields(login_page);
        fields.push((form.username_field.clone(), credentials.username.clone()));
        fields.push((form.password_field.clone(), credentials.password.clone()));
        fields.extend(form.extra_fields.iter().cloned());
        fields
    }

    /// Fetch the raw schedule page.
    /// Fails without touching the network unless logged in.
    pub async fn fetch_schedule_page(&mut self) -> Result<String, RosterError> {
        if !self.session.is_authenticated() {
            return Err(RosterError::NotAuthenticated);
        }

        debug!(url = %self.schedule_url, "Fetching schedule page");

        let response = self
            .client
            .get(self.schedule_url.clone())
            .header(header::REFERER, self.schedule_url.as_str())
            .send()
            .await?;

        let status = response.status();
        let redirected_to_login = self.is_login_redirect(response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = RosterError::from_status(status, &body);
            if matches!(err, RosterError::SessionExpired) {
                self.expire();
            }
            return Err(err);
        }

        let body = response.text().await?;

        if redirected_to_login || parse::contains_field(&body, &self.config.form.password_field) {
            self.expire();
            return Err(RosterError::SessionExpired);
        }

        Ok(body)
    }

    /// Fetch the schedule page and extract its heading and shifts
    pub async fn fetch_schedule(&mut self) -> Result<Schedule, RosterError> {
        let html = self.fetch_schedule_page().await?;
        let heading = parse::page_heading(&html, &self.config.markup)?;
        let shifts = parse::parse_shifts(&html, &self.config.markup)?;
        info!(count = shifts.len(), "Fetched shifts");
        Ok(Schedule { heading, shifts })
    }

    /// Fetch and parse the shifts listed on the schedule page, in page order
    pub async fn fetch_shifts(&mut self) -> Result<Vec<Shift>, RosterError> {
        Ok(self.fetch_schedule().await?.shifts)
    }

    /// True when the request for the schedule ended on the login page instead
    fn is_login_redirect(&self, final_url: &Url) -> bool {
        let same_path = |a: &Url, b: &Url| {
            a.host_str() == b.host_str()
                && a.port_or_known_default() == b.port_or_known_default()
                && a.path().eq_ignore_ascii_case(b.path())
        };
        !same_path(final_url, &self.schedule_url) && same_path(final_url, &self.login_url)
    }

    fn expire(&mut self) {
        warn!("Session expired");
        self.session.clear();
    }
}
