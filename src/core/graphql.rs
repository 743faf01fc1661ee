// SPDX-License-Identifier: GPL-3.0-only

//! Minimal GraphQL-over-HTTP transport.
//!
//! Everything above this module talks to a [`QueryClient`]; the reqwest-backed
//! [`GraphQlClient`] is only the default implementation of it.

use std::{future::Future, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("server reported errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("response carried no data")]
    MissingData,

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything able to run a GraphQL document and hand back its `data` object.
pub trait QueryClient: Clone + Send + Sync + 'static {
    fn execute(
        &self,
        query: &'static str,
        variables: Value,
    ) -> impl Future<Output = Result<Value, QueryError>> + Send;
}

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Response envelope, `{"data": ..., "errors": [...]}`
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorMessage {
    message: String,
}

impl GraphQlResponse {
    /// Any reported error fails the whole query, even if partial data came along
    fn into_data(self) -> Result<Value, QueryError> {
        if !self.errors.is_empty() {
            return Err(QueryError::GraphQl(
                self.errors.into_iter().map(|e| e.message).collect(),
            ));
        }

        self.data
            .filter(|data| !data.is_null())
            .ok_or(QueryError::MissingData)
    }
}

#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: Arc<str>,
}

impl GraphQlClient {
    pub fn new(http: reqwest::Client, endpoint: &str) -> Self {
        GraphQlClient {
            http,
            endpoint: Arc::from(endpoint),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QueryClient for GraphQlClient {
    async fn execute(&self, query: &'static str, variables: Value) -> Result<Value, QueryError> {
        tracing::debug!(endpoint = %self.endpoint, %variables, "executing query");

        let response = self
            .http
            .post(&*self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QueryError::Status(status));
        }

        let envelope: GraphQlResponse = response.json().await?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::{GraphQlResponse, QueryError};

    fn envelope(value: serde_json::Value) -> GraphQlResponse {
        serde_json::from_value(value).expect("decode envelope")
    }

    #[test]
    fn data_is_returned_when_no_errors() {
        let data = envelope(serde_json::json!({ "data": { "pokemons": [] } }))
            .into_data()
            .expect("data present");
        assert_eq!(data, serde_json::json!({ "pokemons": [] }));
    }

    #[test]
    fn reported_errors_fail_the_query_even_with_data() {
        let result = envelope(serde_json::json!({
            "data": { "pokemon": null },
            "errors": [{ "message": "boom" }, { "message": "again" }]
        }))
        .into_data();

        match result {
            Err(QueryError::GraphQl(messages)) => assert_eq!(messages, vec!["boom", "again"]),
            other => panic!("expected GraphQL error, got {other:?}"),
        }
    }

    #[test]
    fn null_data_is_missing() {
        let result = envelope(serde_json::json!({ "data": null })).into_data();
        assert!(matches!(result, Err(QueryError::MissingData)));

        let result = envelope(serde_json::json!({})).into_data();
        assert!(matches!(result, Err(QueryError::MissingData)));
    }

    #[test]
    fn error_messages_are_joined_for_display() {
        let err = QueryError::GraphQl(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "server reported errors: a; b");
    }
}
