use anyhow::anyhow;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use bursar_core::AppError;
use bursar_models::Account;

use crate::modules::auth::service::AuthService;
use crate::state::AppState;

/// Extractor that resolves `Authorization: Bearer <token>` to the account it
/// was issued for. Any failure is a 401.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing authorization header")))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                AppError::unauthorized(anyhow!("Invalid authorization header format"))
            })?;

        let account = AuthService::resolve_token(&state.store, token, &state.jwt_config).await?;

        Ok(CurrentAccount(account))
    }
}
