//! # Bursar Models
//!
//! Domain models and DTOs for the Bursar API.
//!
//! - [`accounts`]: The account entity, its outward view, and the auth DTOs
//! - [`envelope`]: The `{"data": ...}` response wrapper

pub mod accounts;
pub mod envelope;

// Re-export commonly used types at crate root for convenience
pub use accounts::{
    Account, AccountView, NewAccount, RegisterRequest, TokenRequest, TokenResponse,
    normalize_email,
};
pub use envelope::DataResponse;
