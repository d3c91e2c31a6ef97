use crate::{CatalogStatus, SubmissionState};

pub const CATALOG_ERROR_MESSAGE: &str = "Failed to load available concepts.";
pub const SUBMISSION_ERROR_MESSAGE: &str = "Failed to generate recommendations. Please check your inputs and ensure the server and its recommender are running.";
pub const MISSING_TARGET_MESSAGE: &str = "Select a target concept before requesting a path.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    /// Selectable titles, in catalog order.
    pub concept_titles: Vec<String>,
    pub known_concepts: Vec<String>,
    pub target_concept: Option<String>,
    /// Empty whenever there is nothing current to show.
    pub recommended_path: Vec<String>,
    pub catalog_status: CatalogStatus,
    pub submission: SubmissionState,
    pub loading: bool,
    pub catalog_error: Option<String>,
    pub submission_error: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn shows_path(&self) -> bool {
        !self.recommended_path.is_empty()
    }
}
