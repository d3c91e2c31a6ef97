use crate::RequestId;

/// Side effects requested by [`crate::update`]; executed by the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCatalog,
    RequestRecommendation {
        request_id: RequestId,
        known_concepts: Vec<String>,
        target_concept: String,
    },
    /// The request was superseded; its result will be ignored anyway.
    CancelRecommendation { request_id: RequestId },
}
