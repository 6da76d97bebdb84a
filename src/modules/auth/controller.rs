use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::instrument;

use bursar_core::AppError;
use bursar_models::{AccountView, DataResponse, RegisterRequest, TokenRequest, TokenResponse};

use super::service::AuthService;
use crate::middleware::auth::CurrentAccount;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = DataResponse<AccountView>),
        (status = 400, description = "Malformed request body"),
        (status = 409, description = "An account with this email already exists"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<DataResponse<AccountView>>), AppError> {
    let account = AuthService::register(&state.store, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(AccountView::from(account))),
    ))
}

/// Exchange credentials for an access token
#[utoipa::path(
    post,
    path = "/api/v1/auth/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = DataResponse<TokenResponse>),
        (status = 400, description = "Invalid username or password"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn token(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TokenRequest>,
) -> Result<Json<DataResponse<TokenResponse>>, AppError> {
    let response = AuthService::authenticate(&state.store, dto, &state.jwt_config).await?;
    Ok(Json(DataResponse::new(response)))
}

/// Get the account behind the bearer token
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = DataResponse<AccountView>),
        (status = 401, description = "Could not validate credentials")
    ),
    security(("bearer_auth" = [])),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn me(CurrentAccount(account): CurrentAccount) -> Json<DataResponse<AccountView>> {
    Json(DataResponse::new(AccountView::from(account)))
}
