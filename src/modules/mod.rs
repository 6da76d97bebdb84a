//! Feature modules.
//!
//! - [`auth`]: Registration, token issuing and identity resolution
//! - [`accounts`]: Account persistence and listing
//! - [`health`]: Liveness probe

pub mod accounts;
pub mod auth;
pub mod health;
