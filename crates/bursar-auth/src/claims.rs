//! JWT claim set for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::jwt::TokenError;

/// Claims embedded in an access token.
///
/// - `sub`: Account id, as a decimal string
/// - `exp`: Expiry as a Unix timestamp (seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// Account ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parses the subject back into an account id.
    pub fn account_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::Invalid("subject is not an account id".to_string()))
    }
}
