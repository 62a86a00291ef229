use std::{env, net::SocketAddr};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use service::TranscriptStore;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr(cfg: Option<&configs::AppConfig>) -> Result<SocketAddr, StartupError> {
    let (host, port) = match cfg {
        Some(cfg) => (cfg.server.host.clone(), cfg.server.port),
        None => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(4001);
            (host, port)
        }
    };
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let cfg = configs::AppConfig::load_and_validate().ok();

    // 种子学生来自配置；缺省为空库
    let seed = cfg.as_ref().map(|c| c.seed.students.clone()).unwrap_or_default();
    let store = TranscriptStore::with_seed(seed);
    let state = ServerState::new(store);

    let app: Router = routes::build_router(build_cors(), state);

    let addr = load_bind_addr(cfg.as_ref())?;
    info!(%addr, "starting transcript server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
