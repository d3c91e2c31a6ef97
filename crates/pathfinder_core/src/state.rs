use crate::view_model::{
    AppViewModel, CATALOG_ERROR_MESSAGE, MISSING_TARGET_MESSAGE, SUBMISSION_ERROR_MESSAGE,
};

pub type RequestId = u64;

/// A unit of learning material, unique by `id` and displayed by `title`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    pub id: String,
    pub title: String,
}

impl Concept {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    NotRequested,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting { request_id: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    catalog: Vec<Concept>,
    catalog_status: CatalogStatus,
    known_concepts: Vec<String>,
    target_concept: Option<String>,
    recommended_path: Vec<String>,
    submission: SubmissionState,
    next_request_id: RequestId,
    catalog_error: Option<String>,
    submission_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            concept_titles: self.catalog.iter().map(|c| c.title.clone()).collect(),
            known_concepts: self.known_concepts.clone(),
            target_concept: self.target_concept.clone(),
            recommended_path: self.recommended_path.clone(),
            catalog_status: self.catalog_status,
            submission: self.submission,
            loading: self.is_loading(),
            catalog_error: self.catalog_error.clone(),
            submission_error: self.submission_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn concepts(&self) -> &[Concept] {
        &self.catalog
    }

    pub fn catalog_status(&self) -> CatalogStatus {
        self.catalog_status
    }

    pub fn submission(&self) -> SubmissionState {
        self.submission
    }

    pub fn is_loading(&self) -> bool {
        self.catalog_status == CatalogStatus::Loading
            || matches!(self.submission, SubmissionState::Submitting { .. })
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn knows_title(&self, title: &str) -> bool {
        self.catalog.iter().any(|c| c.title == title)
    }

    pub(crate) fn begin_catalog_load(&mut self) -> bool {
        if self.catalog_status != CatalogStatus::NotRequested {
            return false;
        }
        self.catalog_status = CatalogStatus::Loading;
        self.catalog_error = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_catalog(&mut self, concepts: Vec<Concept>) {
        if self.catalog_status != CatalogStatus::Loading {
            return;
        }
        // Selections are matched on trimmed titles.
        self.catalog = concepts
            .into_iter()
            .map(|concept| Concept {
                title: concept.title.trim().to_string(),
                ..concept
            })
            .collect();
        self.catalog_status = CatalogStatus::Loaded;
        self.catalog_error = None;
        self.mark_dirty();
    }

    pub(crate) fn fail_catalog(&mut self) {
        if self.catalog_status != CatalogStatus::Loading {
            return;
        }
        self.catalog.clear();
        self.catalog_status = CatalogStatus::Failed;
        self.catalog_error = Some(CATALOG_ERROR_MESSAGE.to_string());
        self.mark_dirty();
    }

    pub(crate) fn toggle_known(&mut self, title: &str) {
        if !self.knows_title(title) {
            return;
        }
        if let Some(pos) = self.known_concepts.iter().position(|t| t == title) {
            self.known_concepts.remove(pos);
        } else {
            self.known_concepts.push(title.to_string());
        }
        self.mark_dirty();
    }

    pub(crate) fn clear_known(&mut self) {
        if self.known_concepts.is_empty() {
            return;
        }
        self.known_concepts.clear();
        self.mark_dirty();
    }

    pub(crate) fn select_target(&mut self, title: &str) {
        if !self.knows_title(title) || self.target_concept.as_deref() == Some(title) {
            return;
        }
        self.target_concept = Some(title.to_string());
        self.mark_dirty();
    }

    pub(crate) fn target_concept(&self) -> Option<&str> {
        self.target_concept.as_deref()
    }

    pub(crate) fn known_concepts(&self) -> &[String] {
        &self.known_concepts
    }

    pub(crate) fn reject_missing_target(&mut self) {
        self.recommended_path.clear();
        self.submission_error = Some(MISSING_TARGET_MESSAGE.to_string());
        self.mark_dirty();
    }

    /// Enters `Submitting`: clears the previous path and error right away.
    /// Returns the new request id and the id it supersedes, if any.
    pub(crate) fn begin_submission(&mut self) -> (RequestId, Option<RequestId>) {
        let superseded = match self.submission {
            SubmissionState::Submitting { request_id } => Some(request_id),
            SubmissionState::Idle => None,
        };
        self.next_request_id += 1;
        let request_id = self.next_request_id;
        self.submission = SubmissionState::Submitting { request_id };
        self.recommended_path.clear();
        self.submission_error = None;
        self.mark_dirty();
        (request_id, superseded)
    }

    fn is_current_request(&self, request_id: RequestId) -> bool {
        self.submission == SubmissionState::Submitting { request_id }
    }

    pub(crate) fn apply_recommendation(&mut self, request_id: RequestId, path: Vec<String>) {
        if !self.is_current_request(request_id) {
            return;
        }
        self.submission = SubmissionState::Idle;
        self.recommended_path = path;
        self.submission_error = None;
        self.mark_dirty();
    }

    pub(crate) fn fail_recommendation(&mut self, request_id: RequestId) {
        if !self.is_current_request(request_id) {
            return;
        }
        self.submission = SubmissionState::Idle;
        self.recommended_path.clear();
        self.submission_error = Some(SUBMISSION_ERROR_MESSAGE.to_string());
        self.mark_dirty();
    }
}
