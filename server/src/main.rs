mod config;
mod db;
mod error;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::session::PgSessionResolver;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env().expect("invalid configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    let state = state::AppState::new(Arc::new(PgSessionResolver::new(pool)));
    let cors = routes::cors_layer(config.cors_allow_origin.as_deref()).expect("invalid CORS_ALLOW_ORIGIN");

    // Serve the API alone when the frontend bundle is not configured.
    let app = match routes::leptos_app(state.clone(), cors.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos frontend not configured — serving API only");
            routes::api_only(state, cors)
        }
    };

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "userdash listening");
    axum::serve(listener, app).await.expect("server failed");
}
