use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use bursar::bursar_config::{CorsConfig, DatabaseConfig, JwtConfig, ServerConfig};
use bursar::bursar_db::{PgStore, init_db_pool};
use bursar::logging::init_tracing;
use bursar::router::init_router;
use bursar::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing("storage/logs").context("failed to initialise logging")?;

    let server_config = ServerConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    jwt_config.validate(server_config.app_env)?;
    let database_config = DatabaseConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let pool = init_db_pool(&database_config)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let state = AppState::new(PgStore::new(pool), jwt_config, cors_config);
    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, env = %server_config.app_env, "server listening");
    info!("Swagger UI available at http://{addr}/swagger-ui");
    info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await?;
    Ok(())
}
