use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::RepositoryConfig;
use crate::error::GraphError;

/// Result format requested from the endpoint.
const RESULT_FORMAT: &str = "json";

/// One term of a binding row.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BindingValue {
    pub value: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// One result row: variable name to term.
pub type Binding = HashMap<String, BindingValue>;

/// Ordered result rows of a SELECT query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResult {
    pub results: QueryBindings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryBindings {
    pub bindings: Vec<Binding>,
}

impl QueryResult {
    pub fn from_bindings(bindings: Vec<Binding>) -> Self {
        Self {
            results: QueryBindings { bindings },
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.results.bindings
    }
}

/// A graph store that answers SPARQL SELECT queries.
#[async_trait]
pub trait GraphRepository: Send + Sync {
    async fn execute(&self, query: &str) -> Result<QueryResult, GraphError>;
}

/// Repository reached over the SPARQL HTTP protocol.
pub struct HttpRepository {
    client: reqwest::Client,
    endpoint_url: String,
}

impl HttpRepository {
    pub fn new(config: &RepositoryConfig) -> Result<Self, GraphError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GraphError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, config.endpoint_url.clone()))
    }

    pub fn with_client(client: reqwest::Client, endpoint_url: String) -> Self {
        Self {
            client,
            endpoint_url,
        }
    }
}

#[async_trait]
impl GraphRepository for HttpRepository {
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint_url))]
    async fn execute(&self, query: &str) -> Result<QueryResult, GraphError> {
        let response = self
            .client
            .post(&self.endpoint_url)
            .form(&[("query", query), ("format", RESULT_FORMAT)])
            .send()
            .await
            .map_err(|e| {
                warn!("Repository request failed: {}", e);
                GraphError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            warn!(status = status.as_u16(), "Repository rejected query");
            return Err(GraphError::Repository {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| GraphError::Transport(e.to_string()))?;
        let result: QueryResult = serde_json::from_slice(&body).map_err(|e| {
            GraphError::MalformedPayload(format!("unexpected result shape: {e}"))
        })?;

        debug!(bindings = result.bindings().len(), "Query answered");
        Ok(result)
    }
}
