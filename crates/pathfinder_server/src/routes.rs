use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use pathfinder_engine::{RecommendRequest, RecommendResponse};
use pathfinder_logging::{pf_debug, pf_info, pf_warn};
use serde_json::{json, Value};

use crate::{ServerError, ServerState};

pub(crate) async fn catalog_handler(State(state): State<ServerState>) -> Json<Vec<Value>> {
    pf_debug!("serving catalog with {} records", state.catalog().len());
    Json(state.catalog().records().to_vec())
}

pub(crate) async fn health_handler(State(state): State<ServerState>) -> Json<Value> {
    Json(json!({ "status": "ok", "concepts": state.catalog().len() }))
}

pub(crate) async fn recommend_handler(
    State(state): State<ServerState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ServerError> {
    let Json(request) = payload.map_err(|rejection| {
        pf_warn!("rejected recommendation body: {}", rejection.body_text());
        ServerError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    })?;

    validate(&state, &request).inspect_err(|err| pf_warn!("invalid recommendation: {}", err))?;

    pf_info!(
        "recommend known={} target={:?}",
        request.known_concepts.len(),
        request.target_concept
    );
    let recommended_concepts = state
        .recommender
        .recommend(&request)
        .await
        .inspect_err(|err| pf_warn!("recommendation failed: {}", err))?;
    Ok(Json(RecommendResponse {
        recommended_concepts,
    }))
}

fn validate(state: &ServerState, request: &RecommendRequest) -> Result<(), ServerError> {
    if request.target_concept.trim().is_empty() {
        return Err(ServerError::bad_request("targetConcept is required"));
    }
    let catalog = state.catalog();
    let unknown = std::iter::once(&request.target_concept)
        .chain(request.known_concepts.iter())
        .find(|title| !catalog.contains_title(title));
    match unknown {
        Some(title) => Err(ServerError::bad_request(format!("unknown concept: {title}"))),
        None => Ok(()),
    }
}

pub(crate) async fn not_found_handler(uri: Uri) -> ServerError {
    ServerError::NotFound(format!("no route for {}", uri.path()))
}
