//! Pathfinder core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, CatalogStatus, Concept, RequestId, SubmissionState};
pub use update::update;
pub use view_model::{
    AppViewModel, CATALOG_ERROR_MESSAGE, MISSING_TARGET_MESSAGE, SUBMISSION_ERROR_MESSAGE,
};
