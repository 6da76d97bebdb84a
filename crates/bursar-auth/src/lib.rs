//! # Bursar Auth
//!
//! Access tokens for the Bursar API.
//!
//! - [`claims`]: The claim set carried by every access token
//! - [`jwt`]: Token issuing and verification
//!
//! Tokens are HS256-signed JWTs holding only the account id (`sub`) and an
//! expiry (`exp`). Verification tells an expired token apart from one that is
//! malformed or forged; callers decide whether that distinction is shown.
//!
//! # Example
//!
//! ```ignore
//! use bursar_auth::{issue_token, verify_token, TokenError};
//! use bursar_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let token = issue_token(42, &config)?;
//!
//! match verify_token(&token, &config) {
//!     Ok(claims) => println!("account {}", claims.account_id()?),
//!     Err(TokenError::Expired) => println!("log in again"),
//!     Err(e) => println!("rejected: {e}"),
//! }
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{TokenError, issue_token, issue_token_at, verify_token, verify_token_at};
