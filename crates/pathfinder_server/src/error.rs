use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pathfinder_engine::ErrorBody;

use crate::RecommendError;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request failed validation against the catalog.
    #[error("{0}")]
    BadRequest(String),
    /// Body was refused before it reached validation, e.g. malformed json (400),
    /// wrong content type (415) or wrong shape (422).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Recommend(#[from] RecommendError),
}

impl ServerError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Rejected { status, .. } => *status,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Recommend(RecommendError::Unavailable) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Recommend(RecommendError::Upstream(_)) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_variant() {
        assert_eq!(
            ServerError::bad_request("unknown concept: Z").status(),
            StatusCode::BAD_REQUEST
        );
        let rejected = ServerError::Rejected {
            status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
            message: "expected json".into(),
        };
        assert_eq!(rejected.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(
            ServerError::from(RecommendError::Unavailable).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
