//! Pathfinder server: serves the concept catalog and fronts the recommender.
mod catalog;
mod error;
mod recommender;
mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use pathfinder_engine::{CATALOG_PATH, HEALTH_PATH, RECOMMEND_PATH};

pub use catalog::{Catalog, CatalogError};
pub use error::ServerError;
pub use recommender::{
    RecommendError, Recommender, UnavailableRecommender, UpstreamRecommender, UPSTREAM_MAX_BYTES,
};

/// Every application route lives under this prefix.
pub const API_PREFIX: &str = "/api";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct ServerState {
    catalog: Arc<Catalog>,
    recommender: Arc<dyn Recommender>,
}

impl ServerState {
    pub fn new(catalog: Catalog, recommender: Arc<dyn Recommender>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            recommender,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

pub fn build_router(state: ServerState) -> Router {
    let api = Router::new()
        .route(CATALOG_PATH, get(routes::catalog_handler))
        .route(RECOMMEND_PATH, post(routes::recommend_handler))
        .route(HEALTH_PATH, get(routes::health_handler));

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(routes::not_found_handler)
        .with_state(state)
}
