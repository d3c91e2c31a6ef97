use std::collections::HashSet;

use serde_json::Value;

use crate::{CatalogEntry, RecommendResponse};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed json: {0}")]
    Json(String),
    #[error("catalog must be a json array")]
    NotAnArray,
    #[error("catalog record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("catalog record {index}: duplicate id {id:?}")]
    DuplicateId { index: usize, id: String },
    #[error("recommendation response: {0}")]
    Recommendation(String),
}

/// Decode a catalog body into records, keeping the order received.
///
/// Every element must be an object with non-empty string `id` and `title`;
/// both are stored trimmed. Other fields are ignored. Ids must be unique.
pub fn decode_catalog(bytes: &[u8]) -> Result<Vec<CatalogEntry>, DecodeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|err| DecodeError::Json(err.to_string()))?;
    let Value::Array(items) = value else {
        return Err(DecodeError::NotAnArray);
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut entries = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let entry = decode_record(index, item)?;
        if !seen.insert(entry.id.clone()) {
            return Err(DecodeError::DuplicateId {
                index,
                id: entry.id,
            });
        }
        entries.push(entry);
    }
    Ok(entries)
}

fn decode_record(index: usize, item: &Value) -> Result<CatalogEntry, DecodeError> {
    let Some(object) = item.as_object() else {
        return Err(DecodeError::InvalidRecord {
            index,
            reason: "not an object".into(),
        });
    };
    let field = |name: &str| -> Result<String, DecodeError> {
        match object.get(name) {
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Some(Value::String(_)) => Err(DecodeError::InvalidRecord {
                index,
                reason: format!("`{name}` is empty"),
            }),
            Some(_) => Err(DecodeError::InvalidRecord {
                index,
                reason: format!("`{name}` is not a string"),
            }),
            None => Err(DecodeError::InvalidRecord {
                index,
                reason: format!("missing `{name}`"),
            }),
        }
    };
    Ok(CatalogEntry {
        id: field("id")?,
        title: field("title")?,
    })
}

/// Decode a recommendation body into the ordered list of concept ids.
pub fn decode_recommendation(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    serde_json::from_slice::<RecommendResponse>(bytes)
        .map(|response| response.recommended_concepts)
        .map_err(|err| DecodeError::Recommendation(err.to_string()))
}
