//! JSON shapes exchanged between the front end and the server.

use serde::{Deserialize, Serialize};

/// Route of the catalog, relative to the `/api` prefix.
pub const CATALOG_PATH: &str = "/lectures";
/// Route of the recommendation endpoint, relative to the `/api` prefix.
pub const RECOMMEND_PATH: &str = "/recommend";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub known_concepts: Vec<String>,
    #[serde(default)]
    pub target_concept: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommended_concepts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
