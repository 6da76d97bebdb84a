//! # Bursar Core
//!
//! Core types, errors, and utilities for the Bursar API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-based pagination parameters and result envelope
//! - [`password`]: Credential codec (bcrypt hashing and verification)
//!
//! # Example
//!
//! ```ignore
//! use bursar_core::errors::AppError;
//! use bursar_core::password::{hash_password, verify_password};
//!
//! let digest = hash_password("correct horse battery staple")?;
//! assert!(verify_password("correct horse battery staple", &digest));
//!
//! let error = AppError::not_found(anyhow::anyhow!("Account not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{Paginated, PaginationParams};
pub use password::{PasswordError, hash_password, verify_password, verify_password_or_decoy};
