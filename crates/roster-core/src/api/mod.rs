//! HTTP client module for the roster site.
//!
//! This module provides the `RosterClient`, which logs in through the
//! site's HTML login form, keeps the resulting cookie session and
//! downloads the schedule page.

pub mod client;
pub mod error;

pub use client::RosterClient;
pub use error::{ParseError, RosterError};
