use axum::{Router, routing::get};

use super::controller::list_accounts;
use crate::state::AppState;

pub fn init_accounts_router() -> Router<AppState> {
    Router::new().route("/", get(list_accounts))
}
