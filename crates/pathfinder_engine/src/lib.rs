//! Pathfinder engine: HTTP client, wire contract and effect execution.
mod client;
mod decode;
mod engine;
mod types;
mod wire;

pub use client::{read_body_capped, ApiClient, ClientSettings, ReqwestApiClient};
pub use decode::{decode_catalog, decode_recommendation, DecodeError};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{ApiError, CatalogEntry, EngineEvent, FailureKind, RequestId};
pub use wire::{
    ErrorBody, RecommendRequest, RecommendResponse, CATALOG_PATH, HEALTH_PATH, RECOMMEND_PATH,
};
