use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn issuer_comes_from_configuration() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::ISSUER).await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.body,
        json!({"name": "Example Library", "url": "http://library.example.org/"})
    );
    assert!(app.received_queries().await.is_empty());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/Issuer"].is_object());
}
