//! Authentication state for the roster site.
//!
//! This module provides:
//! - `Credentials`: username/password pair handed to `RosterClient::login`
//! - `Session`: the authenticated/unauthenticated gate for fetching
//!
//! Nothing here touches the disk; where credentials come from is up to the caller.

pub mod credentials;
pub mod session;

pub use credentials::Credentials;
pub use session::{Session, SessionData};
