use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pathfinder_logging::{pf_info, pf_warn, LogDestination};
use pathfinder_server::{
    build_router, Catalog, Recommender, ServerState, UnavailableRecommender, UpstreamRecommender,
    API_PREFIX, DEFAULT_PORT,
};
use tokio::net::TcpListener;

#[derive(Debug, Parser)]
#[command(name = "pathfinder_server", about = "Concept catalog and learning path API")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "PATHFINDER_BIND", default_value = "127.0.0.1")]
    bind: IpAddr,

    #[arg(long, env = "PATHFINDER_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// JSON array of lecture records with at least `id` and `title`.
    #[arg(long, env = "PATHFINDER_CATALOG", default_value = "data/lectures.json")]
    catalog: PathBuf,

    /// External service that computes recommendations. Without it `/api/recommend` answers 503.
    #[arg(long, env = "PATHFINDER_RECOMMENDER_URL")]
    recommender_url: Option<String>,

    #[arg(long, default_value_t = 30)]
    recommender_timeout_secs: u64,

    /// Also write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let destination = match cli.log_file.clone() {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    pathfinder_logging::initialize(destination, cli.log_level);

    let catalog = Catalog::load(&cli.catalog)
        .with_context(|| format!("loading catalog from {}", cli.catalog.display()))?;
    if catalog.is_empty() {
        pf_warn!("catalog {:?} has no concepts; every recommendation will be rejected", cli.catalog);
    } else {
        pf_info!("loaded {} concepts from {:?}", catalog.len(), cli.catalog);
    }

    let recommender: Arc<dyn Recommender> = match cli.recommender_url.as_deref() {
        Some(url) => {
            let upstream =
                UpstreamRecommender::new(url, Duration::from_secs(cli.recommender_timeout_secs))
                    .context("configuring upstream recommender")?;
            pf_info!("forwarding recommendations to {}", upstream.url());
            Arc::new(upstream)
        }
        None => {
            pf_warn!("no recommender configured; {API_PREFIX}/recommend will answer 503");
            Arc::new(UnavailableRecommender)
        }
    };

    let app = build_router(ServerState::new(catalog, recommender));
    let addr = SocketAddr::new(cli.bind, cli.port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    pf_info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            pf_info!("shutdown requested");
        })
        .await
        .context("server failed")
}
