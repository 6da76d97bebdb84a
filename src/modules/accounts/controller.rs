use anyhow::anyhow;
use axum::Json;
use axum::extract::{Query, State, rejection::QueryRejection};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use bursar_core::pagination::deserialize_optional_i64;
use bursar_core::{AppError, Paginated, PaginationParams};
use bursar_db::filter::{parse_filter_spec, parse_order_spec};
use bursar_db::Repository;
use bursar_models::{Account, AccountView};

use crate::middleware::auth::CurrentAccount;
use crate::state::AppState;

/// Query parameters for listing accounts.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListAccountsParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Rows per page (default: 10, max: 100)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub per_page: Option<i64>,
    /// Comma-separated sort keys, e.g. `created_at:desc,id`
    pub sort: Option<String>,
    /// Semicolon-separated filters, e.g. `id:gt:10;full_name:eq:Ada`
    pub filter: Option<String>,
}

impl ListAccountsParams {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// List accounts
///
/// Unknown attributes in `sort` or `filter` are ignored.
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    params(ListAccountsParams),
    responses(
        (status = 200, description = "One page of accounts", body = Paginated<AccountView>),
        (status = 400, description = "Malformed filter, sort or pagination parameter"),
        (status = 401, description = "Could not validate credentials")
    ),
    security(("bearer_auth" = [])),
    tag = "Accounts"
)]
#[instrument(skip_all)]
pub async fn list_accounts(
    State(state): State<AppState>,
    _caller: CurrentAccount,
    params: Result<Query<ListAccountsParams>, QueryRejection>,
) -> Result<Json<Paginated<AccountView>>, AppError> {
    let Query(params) =
        params.map_err(|rejection| AppError::bad_request(anyhow!(rejection.body_text())))?;

    let filters = parse_filter_spec(params.filter.as_deref().unwrap_or_default())
        .map_err(AppError::bad_request)?;
    let orders = parse_order_spec(params.sort.as_deref().unwrap_or_default())
        .map_err(AppError::bad_request)?;
    let pagination = params.pagination();

    let page = Repository::<Account>::paginate(
        &state.store,
        filters,
        orders,
        pagination.page(),
        pagination.per_page(),
    )
    .await?;

    Ok(Json(page.map(AccountView::from)))
}
