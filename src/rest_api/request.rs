//! REST request bodies and query parameters

use serde::Deserialize;
use serde_json::Value;

use crate::revision::Author;

/// Body for `POST /documents`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocumentRequest {
    pub content: Value,
    pub author: Author,
    pub message: String,
}

/// Body for `PUT /documents/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDocumentRequest {
    pub content: Value,
    pub author: Author,
    pub message: String,
}

/// Body for `POST /documents/{id}/promote`
#[derive(Debug, Clone, Deserialize)]
pub struct PromoteRequest {
    pub from: String,
    pub to: String,
    pub author: Author,
    pub message: String,
}

/// Query parameters for `GET /documents`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Page size
    pub size: Option<usize>,
    /// Rows to skip
    #[serde(default)]
    pub from: usize,
}

/// Query parameter selecting a state (defaults to `master` downstream)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StateParam {
    pub state: Option<String>,
}

/// Query parameters for `GET /documents/{id}/history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    /// Comma-separated state names
    #[serde(default)]
    pub states: String,
}

impl HistoryParams {
    /// Split the `states` parameter into names, dropping empties.
    pub fn state_names(&self) -> Vec<String> {
        self.states
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_deserializes() {
        let request: CreateDocumentRequest = serde_json::from_value(json!({
            "content": {"title": "Hello"},
            "author": {"name": "Ada", "email": "ada@example.com"},
            "message": "init"
        }))
        .unwrap();
        assert_eq!(request.content["title"], "Hello");
        assert_eq!(request.author.name, "Ada");
    }

    #[test]
    fn test_create_request_requires_author() {
        let result: Result<CreateDocumentRequest, _> = serde_json::from_value(json!({
            "content": {},
            "message": "init"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_history_params_split() {
        let params = HistoryParams {
            states: "master, published,,draft".to_string(),
        };
        assert_eq!(params.state_names(), vec!["master", "published", "draft"]);

        let empty = HistoryParams::default();
        assert!(empty.state_names().is_empty());
    }
}
