use serde::Deserialize;

/// Connection settings for the graph-query repository.
#[derive(Debug, Deserialize, Clone)]
pub struct RepositoryConfig {
    /// SPARQL query endpoint. Default: "http://localhost:8080/bigdata/sparql".
    #[serde(default = "default_endpoint_url")]
    pub endpoint_url: String,
    /// Root under which sharded object paths are built.
    /// Default: "http://localhost:8080/fedora/rest".
    #[serde(default = "default_repository_root")]
    pub repository_root: String,
    /// Timeout applied to every outbound call, in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint_url() -> String {
    "http://localhost:8080/bigdata/sparql".into()
}
fn default_repository_root() -> String {
    "http://localhost:8080/fedora/rest".into()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            endpoint_url: default_endpoint_url(),
            repository_root: default_repository_root(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
