use axum::{
    Router,
    routing::{get, post},
};

use super::controller::{me, register, token};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/token", post(token))
        .route("/me", get(me))
}
