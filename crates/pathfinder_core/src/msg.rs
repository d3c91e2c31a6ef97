#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Front end finished starting up. Triggers the one catalog fetch.
    Started,
    /// Catalog records arrived, in the order the server sent them.
    CatalogLoaded(Vec<crate::Concept>),
    /// Catalog fetch or decode failed.
    CatalogFailed { reason: String },
    /// User toggled a concept title in or out of the known set.
    KnownConceptToggled(String),
    /// User cleared the known set.
    KnownConceptsCleared,
    /// User picked the concept they want to learn.
    TargetSelected(String),
    /// User asked for a learning path.
    SubmitClicked,
    /// Engine completion for a recommendation request.
    RecommendationReceived {
        request_id: crate::RequestId,
        recommended_concepts: Vec<String>,
    },
    /// Engine failure for a recommendation request.
    RecommendationFailed {
        request_id: crate::RequestId,
        reason: String,
    },
}
