//! roster-core - log into a roster site and read your shifts.
//!
//! ```no_run
//! use roster_core::{Credentials, RosterClient, SiteConfig};
//!
//! # async fn run() -> Result<(), roster_core::RosterError> {
//! let config = SiteConfig::new(
//!     "https://ess.example.net/SelfService/Default.aspx",
//!     "https://ess.example.net/SelfService/MyRoster2.aspx",
//! );
//! let mut client = RosterClient::new(config)?;
//! client.login(&Credentials::new("12345", "secret")).await?;
//! for shift in client.fetch_shifts().await? {
//!     println!("{}", shift);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod parse;
pub mod utils;

pub use api::{ParseError, RosterClient, RosterError};
pub use auth::{Credentials, Session, SessionData};
pub use config::{LoginForm, Markup, SiteConfig};
pub use models::{Schedule, Shift};
