use std::collections::HashMap;
use std::io;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use pathfinder_logging::{pf_debug, pf_info};
use tokio_util::sync::CancellationToken;

use crate::{ApiClient, ApiError, EngineEvent, RequestId};

/// Receives engine events; implemented by the front end to turn them into messages.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    FetchCatalog,
    Recommend {
        request_id: RequestId,
        known_concepts: Vec<String>,
        target_concept: String,
    },
    Cancel {
        request_id: RequestId,
    },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// The map stays usable after a panicking holder; its entries are still valid tokens.
fn lock_in_flight(in_flight: &InFlight) -> MutexGuard<'_, HashMap<RequestId, CancellationToken>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs API calls on a background tokio runtime. Dropping the handle stops the engine.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn ApiClient>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("pathfinder-engine".to_string())
            .spawn(move || {
                let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));
                while let Ok(command) = cmd_rx.recv() {
                    handle_command(&runtime, &client, &sink, &in_flight, command);
                }
                pf_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn fetch_catalog(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchCatalog);
    }

    pub fn request_recommendation(
        &self,
        request_id: RequestId,
        known_concepts: Vec<String>,
        target_concept: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Recommend {
            request_id,
            known_concepts,
            target_concept: target_concept.into(),
        });
    }

    /// Abort an in-flight recommendation; it completes with `FailureKind::Cancelled`.
    pub fn cancel(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { request_id });
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    client: &Arc<dyn ApiClient>,
    sink: &Arc<dyn EventSink>,
    in_flight: &InFlight,
    command: EngineCommand,
) {
    match command {
        EngineCommand::FetchCatalog => {
            let client = client.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                let result = client.fetch_catalog().await;
                sink.emit(EngineEvent::CatalogFetched(result));
            });
        }
        EngineCommand::Recommend {
            request_id,
            known_concepts,
            target_concept,
        } => {
            let token = CancellationToken::new();
            lock_in_flight(in_flight).insert(request_id, token.clone());
            let client = client.clone();
            let sink = sink.clone();
            let in_flight = in_flight.clone();
            runtime.spawn(async move {
                let result: Result<Vec<String>, ApiError> = tokio::select! {
                    _ = token.cancelled() => Err(ApiError::cancelled()),
                    result = client.get_recommendations(&known_concepts, &target_concept) => result,
                };
                lock_in_flight(&in_flight).remove(&request_id);
                sink.emit(EngineEvent::RecommendationCompleted { request_id, result });
            });
        }
        EngineCommand::Cancel { request_id } => {
            let token = lock_in_flight(in_flight).remove(&request_id);
            if let Some(token) = token {
                pf_info!("cancelling recommendation request {}", request_id);
                token.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct IdleClient;

    #[async_trait::async_trait]
    impl ApiClient for IdleClient {
        async fn fetch_catalog(&self) -> Result<Vec<crate::CatalogEntry>, ApiError> {
            Ok(Vec::new())
        }

        async fn get_recommendations(
            &self,
            _known_concepts: &[String],
            _target_concept: &str,
        ) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }
    }

    struct NullSink;

    impl EventSink for NullSink {
        fn emit(&self, _event: EngineEvent) {}
    }

    #[test]
    fn cancel_still_works_after_map_is_poisoned() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let client: Arc<dyn ApiClient> = Arc::new(IdleClient);
        let sink: Arc<dyn EventSink> = Arc::new(NullSink);
        let in_flight: InFlight = Arc::new(Mutex::new(HashMap::new()));

        let token = CancellationToken::new();
        lock_in_flight(&in_flight).insert(9, token.clone());
        let poisoner = in_flight.clone();
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().expect("lock");
            panic!("poison the in-flight map");
        })
        .join();
        assert!(in_flight.is_poisoned());

        handle_command(
            &runtime,
            &client,
            &sink,
            &in_flight,
            EngineCommand::Cancel { request_id: 9 },
        );
        assert!(token.is_cancelled());
        assert!(lock_in_flight(&in_flight).is_empty());
    }
}
