use std::net::SocketAddr;

use graph::RepositoryConfig;
use reqwest::Client;
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use badge_server::config::{
    AppConfig, CorsConfig, IssuerConfig, OrganizationConfig, ServerConfig,
};
use badge_server::state::AppState;

pub const REPOSITORY_ROOT: &str = "http://localhost:8080/fedora/rest";
pub const SPARQL_PATH: &str = "/sparql";

pub mod routes {
    pub const ISSUER: &str = "/Issuer";
    pub const BADGE_CLASSES: &str = "/BadgeClass/";
    pub const ASSERTIONS: &str = "/Assertion/";

    pub fn badge_class(slug: &str) -> String {
        format!("/BadgeClass/{slug}")
    }

    pub fn assertion(uuid: &str) -> String {
        format!("/Assertion/{uuid}")
    }

    pub fn criteria(badge: &str) -> String {
        format!("/Criteria/{badge}")
    }

    pub fn badge_image(badge: &str) -> String {
        format!("/BadgeImage/{badge}.png")
    }

    pub fn assertion_image(uid: &str) -> String {
        format!("/AssertionImage/{uid}.png")
    }
}

/// A running test server backed by a mock SPARQL endpoint.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub repository: MockServer,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub content_type: Option<String>,
    /// Raw response body.
    pub bytes: Vec<u8>,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let content_type = res
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = res.bytes().await.expect("Failed to read body").to_vec();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        Self {
            status,
            content_type,
            bytes,
            text,
            body,
        }
    }
}

/// A SPARQL JSON results document with the given rows.
pub fn sparql_results(rows: Value) -> Value {
    json!({
        "head": {"vars": []},
        "results": {"bindings": rows}
    })
}

/// One binding row of literal terms.
pub fn row(pairs: &[(&str, &str)]) -> Value {
    let mut map = serde_json::Map::new();
    for (var, value) in pairs {
        map.insert(
            var.to_string(),
            json!({"type": "literal", "value": value}),
        );
    }
    Value::Object(map)
}

impl TestApp {
    pub async fn spawn() -> Self {
        let repository = MockServer::start().await;

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig {
                    allow_origins: vec![],
                    max_age: 3600,
                },
            },
            organization: OrganizationConfig {
                url: "http://badges.example.org/".to_string(),
            },
            issuer: IssuerConfig {
                name: "Example Library".to_string(),
                url: "http://library.example.org/".to_string(),
            },
            repository: RepositoryConfig {
                endpoint_url: format!("{}{SPARQL_PATH}", repository.uri()),
                repository_root: REPOSITORY_ROOT.to_string(),
                timeout_secs: 2,
            },
        };

        let state = AppState::new(app_config).expect("Failed to build app state");
        let app = badge_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            repository,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Answer every repository query with these rows.
    pub async fn repository_answers(&self, rows: Value) {
        Mock::given(method("POST"))
            .and(path(SPARQL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(sparql_results(rows)))
            .mount(&self.repository)
            .await;
    }

    /// Fail every repository query with this status.
    pub async fn repository_fails(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(SPARQL_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.repository)
            .await;
    }

    /// Form bodies of every query the repository received.
    pub async fn received_queries(&self) -> Vec<String> {
        self.repository
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|req| String::from_utf8_lossy(&req.body).into_owned())
            .collect()
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_accepting(&self, path: &str, accept: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Accept", accept)
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }
}
