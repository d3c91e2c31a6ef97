use std::io;
use std::sync::{mpsc, Arc};

use pathfinder_core::{Concept, Effect, Msg};
use pathfinder_engine::{ApiClient, EngineEvent, EngineHandle, EventSink, FailureKind};
use pathfinder_logging::{pf_debug, pf_error, pf_info};

use super::app::UiEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(client: Arc<dyn ApiClient>, ui_tx: mpsc::Sender<UiEvent>) -> io::Result<Self> {
        let engine = EngineHandle::new(client, Arc::new(MsgSink { ui_tx }))?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCatalog => {
                    pf_info!("FetchCatalog");
                    self.engine.fetch_catalog();
                }
                Effect::RequestRecommendation {
                    request_id,
                    known_concepts,
                    target_concept,
                } => {
                    pf_info!(
                        "RequestRecommendation request_id={} known={:?} target={:?}",
                        request_id,
                        known_concepts,
                        target_concept
                    );
                    self.engine
                        .request_recommendation(request_id, known_concepts, target_concept);
                }
                Effect::CancelRecommendation { request_id } => {
                    pf_info!("CancelRecommendation request_id={}", request_id);
                    self.engine.cancel(request_id);
                }
            }
        }
    }
}

struct MsgSink {
    ui_tx: mpsc::Sender<UiEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.ui_tx.send(UiEvent::Msg(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CatalogFetched(Ok(entries)) => Msg::CatalogLoaded(
            entries
                .into_iter()
                .map(|entry| Concept::new(entry.id, entry.title))
                .collect(),
        ),
        EngineEvent::CatalogFetched(Err(err)) => {
            pf_error!("Failed to fetch lectures: {}", err);
            Msg::CatalogFailed {
                reason: err.to_string(),
            }
        }
        EngineEvent::RecommendationCompleted {
            request_id,
            result: Ok(recommended_concepts),
        } => Msg::RecommendationReceived {
            request_id,
            recommended_concepts,
        },
        EngineEvent::RecommendationCompleted {
            request_id,
            result: Err(err),
        } => {
            if err.kind == FailureKind::Cancelled {
                pf_debug!("request {} cancelled", request_id);
            } else {
                pf_error!("Failed to get recommendations (request {}): {}", request_id, err);
            }
            Msg::RecommendationFailed {
                request_id,
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_engine::{ApiError, CatalogEntry};
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_entries_become_concepts() {
        let msg = map_event(EngineEvent::CatalogFetched(Ok(vec![CatalogEntry {
            id: "l1".into(),
            title: "Intro".into(),
        }])));
        assert_eq!(msg, Msg::CatalogLoaded(vec![Concept::new("l1", "Intro")]));
    }

    #[test]
    fn failures_keep_request_id() {
        let err = ApiError {
            kind: FailureKind::HttpStatus(502),
            message: "recommender failed".into(),
        };
        let msg = map_event(EngineEvent::RecommendationCompleted {
            request_id: 4,
            result: Err(err),
        });
        assert_eq!(
            msg,
            Msg::RecommendationFailed {
                request_id: 4,
                reason: "http status 502: recommender failed".into(),
            }
        );
    }
}
