use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if state.begin_catalog_load() {
                vec![Effect::FetchCatalog]
            } else {
                Vec::new()
            }
        }
        Msg::CatalogLoaded(concepts) => {
            state.apply_catalog(concepts);
            Vec::new()
        }
        Msg::CatalogFailed { reason: _ } => {
            state.fail_catalog();
            Vec::new()
        }
        Msg::KnownConceptToggled(title) => {
            state.toggle_known(title.trim());
            Vec::new()
        }
        Msg::KnownConceptsCleared => {
            state.clear_known();
            Vec::new()
        }
        Msg::TargetSelected(title) => {
            state.select_target(title.trim());
            Vec::new()
        }
        Msg::SubmitClicked => {
            let Some(target_concept) = state.target_concept().map(ToOwned::to_owned) else {
                state.reject_missing_target();
                return (state, Vec::new());
            };
            let known_concepts = state.known_concepts().to_vec();
            let (request_id, superseded) = state.begin_submission();
            let mut effects = Vec::with_capacity(2);
            if let Some(request_id) = superseded {
                effects.push(Effect::CancelRecommendation { request_id });
            }
            effects.push(Effect::RequestRecommendation {
                request_id,
                known_concepts,
                target_concept,
            });
            effects
        }
        Msg::RecommendationReceived {
            request_id,
            recommended_concepts,
        } => {
            state.apply_recommendation(request_id, recommended_concepts);
            Vec::new()
        }
        Msg::RecommendationFailed {
            request_id,
            reason: _,
        } => {
            state.fail_recommendation(request_id);
            Vec::new()
        }
    };

    (state, effects)
}
