use serde_json::json;

use crate::common::{TestApp, row, routes};

mod badge_class_lookup {
    use super::*;

    #[tokio::test]
    async fn json_suffix_returns_pretty_sorted_json() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[
            ("uri", "http://localhost:8080/fedora/rest/badges/camp"),
            ("jsonString", "\"name\":\"CampBadge\""),
        ])]))
        .await;

        let res = app.get(&routes::badge_class("CampBadge.json")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "{\n    \"name\": \"CampBadge\"\n}");
        assert_eq!(res.content_type.as_deref(), Some("application/json"));

        let queries = app.received_queries().await;
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("alternativeName"));
        assert!(queries[0].contains("CampBadge"));
        assert!(queries[0].contains("format=json"));
    }

    #[tokio::test]
    async fn keys_are_sorted() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[("jsonString", "\"z\":1,\"a\":2")])]))
            .await;

        let res = app.get(&routes::badge_class("Camp")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.text, "{\n    \"a\": 2,\n    \"z\": 1\n}");
    }

    #[tokio::test]
    async fn html_is_preformatted() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[("jsonString", "\"name\":\"CampBadge\"")])]))
            .await;

        let res = app
            .get_accepting(&routes::badge_class("CampBadge"), "text/html")
            .await;

        assert_eq!(res.status, 200);
        assert!(res.content_type.unwrap().starts_with("text/html"));
        assert!(res.text.starts_with("<pre>"));
        assert!(res.text.contains("CampBadge"));
    }

    #[tokio::test]
    async fn rdf_xml_is_served() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[("jsonString", "\"name\":\"CampBadge\"")])]))
            .await;

        let res = app
            .get_accepting(&routes::badge_class("CampBadge"), "application/rdf+xml")
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"name": "CampBadge"}));
    }

    #[tokio::test]
    async fn json_suffix_overrides_accept() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[("jsonString", "\"name\":\"CampBadge\"")])]))
            .await;

        let res = app
            .get_accepting(&routes::badge_class("CampBadge.json"), "image/png")
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "CampBadge");
    }

    #[tokio::test]
    async fn unsupported_accept_is_406() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[("jsonString", "\"name\":\"CampBadge\"")])]))
            .await;

        let res = app
            .get_accepting(&routes::badge_class("CampBadge"), "image/png")
            .await;

        assert_eq!(res.status, 406);
        assert_eq!(res.body["code"], "UNSUPPORTED_REPRESENTATION");
    }
}

mod badge_class_failures {
    use super::*;

    #[tokio::test]
    async fn no_bindings_is_404() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([])).await;

        let res = app.get(&routes::badge_class("Missing")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn repository_error_is_503() {
        let app = TestApp::spawn().await;
        app.repository_fails(500).await;

        let res = app.get(&routes::badge_class("CampBadge")).await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["code"], "REPOSITORY_ERROR");
    }

    #[tokio::test]
    async fn malformed_payload_is_reported() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[("jsonString", "\"name\":")])]))
            .await;

        let res = app.get(&routes::badge_class("CampBadge")).await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["code"], "MALFORMED_PAYLOAD");
    }

    #[tokio::test]
    async fn several_matches_are_ambiguous() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([
            row(&[("jsonString", "\"name\":\"A\"")]),
            row(&[("jsonString", "\"name\":\"B\"")]),
        ]))
        .await;

        let res = app.get(&routes::badge_class("CampBadge")).await;

        assert_eq!(res.status, 503);
        assert_eq!(res.body["code"], "AMBIGUOUS_RESULT");
    }

    #[tokio::test]
    async fn unsafe_slug_never_reaches_repository() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([])).await;

        let res = app.get(&routes::badge_class("Camp%22Badge")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "INVALID_IDENTIFIER");
        assert!(app.received_queries().await.is_empty());
    }
}

mod badge_class_listing {
    use super::*;

    #[tokio::test]
    async fn lists_slugs_and_names() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([
            row(&[("altName", "CampBadge"), ("name", "Camp Badge")]),
            row(&[("altName", "Projects"), ("name", "Projects")]),
        ]))
        .await;

        let res = app.get(routes::BADGE_CLASSES).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!([
                {"altName": "CampBadge", "name": "Camp Badge"},
                {"altName": "Projects", "name": "Projects"}
            ])
        );
    }

    #[tokio::test]
    async fn repository_error_is_502() {
        let app = TestApp::spawn().await;
        app.repository_fails(500).await;

        let res = app.get(routes::BADGE_CLASSES).await;

        assert_eq!(res.status, 502);
    }
}

mod criteria {
    use super::*;

    #[tokio::test]
    async fn criteria_are_derived_from_badge_class() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([row(&[(
            "jsonString",
            "\"name\":\"Camp Badge\",\"educationalUse\":[\"Attend camp\",\"Build a robot\"]",
        )])]))
        .await;

        let res = app.get(&routes::criteria("CampBadge")).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!({
                "name": "Criteria for Camp Badge",
                "educationalUse": ["Attend camp", "Build a robot"]
            })
        );
    }

    #[tokio::test]
    async fn missing_badge_is_404() {
        let app = TestApp::spawn().await;
        app.repository_answers(json!([])).await;

        let res = app.get(&routes::criteria("Missing")).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn repository_error_is_503() {
        let app = TestApp::spawn().await;
        app.repository_fails(502).await;

        let res = app.get(&routes::criteria("CampBadge")).await;

        assert_eq!(res.status, 503);
    }
}
