// End-to-end tests driving the router in-process

#[cfg(test)]
mod tests {
    use crate::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::Router;
    use barter_engine::EngineConfig;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_app(AppState::new(EngineConfig::default()).unwrap())
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn post_intent(app: &Router, actor: &str, offer: &str, want: &str) -> u64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/intents",
            Some(json!({"actor": actor, "offer": offer, "want": want})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_u64().unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["message"].as_str().unwrap().starts_with("API up"));

        post_intent(&app, "alice", "apples", "bread").await;
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["intents"], 1);
        assert_eq!(body["open_intents"], 1);
        assert_eq!(body["settlements"], 0);
    }

    #[tokio::test]
    async fn test_create_intent_view() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/intents",
            Some(json!({
                "actor": " alice ",
                "offer": "apples",
                "want": "bread",
                "deadline": "2099-12-31"
            })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["actor"], "alice");
        assert_eq!(body["status"], "open");
        assert_eq!(body["is_open"], true);
        assert_eq!(body["version"], 0);
        assert!(body["deadline"].as_str().unwrap().starts_with("2099-12-31T23:59:59"));
    }

    #[tokio::test]
    async fn test_create_intent_rejections() {
        let app = app();
        for payload in [
            json!({"actor": "alice", "offer": "apples", "want": "apples"}),
            json!({"actor": "", "offer": "apples", "want": "bread"}),
            json!({"actor": "alice", "offer": "apples", "want": "bread", "deadline": "soon"}),
        ] {
            let (status, body) = send(&app, Method::POST, "/intents", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "invalid_argument");
        }

        let (_, body) = send(&app, Method::GET, "/intents", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_invalid_arguments() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/intents",
            Some(json!({"actor": "alice", "offer": "apples"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");
        assert!(body["message"].as_str().unwrap().contains("want"));
        assert_eq!(body["intents"], json!([]));

        let (status, body) = send(&app, Method::POST, "/settle", Some(json!({"chain": "nope"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");

        let (status, body) = send(&app, Method::POST, "/intents", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_argument");

        let (_, intents) = send(&app, Method::GET, "/intents", None).await;
        assert_eq!(intents, json!([]));
    }

    #[tokio::test]
    async fn test_full_flow() {
        let app = app();
        let a = post_intent(&app, "alice", "apples", "bread").await;
        let b = post_intent(&app, "bob", "bread", "apples").await;

        let (status, body) = send(&app, Method::POST, &format!("/solve/{}", a), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chain"], json!([a, b]));

        let (status, settlement) = send(
            &app,
            Method::POST,
            "/settle",
            Some(json!({"chain": [a, b]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(settlement["chain"], json!([a, b]));
        assert_eq!(settlement["digest"].as_str().unwrap().len(), 64);

        let (_, intents) = send(&app, Method::GET, "/intents", None).await;
        let statuses: Vec<&str> = intents
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["status"].as_str().unwrap())
            .collect();
        assert_eq!(statuses, vec!["closed", "closed"]);

        let (_, settlements) = send(&app, Method::GET, "/settlements", None).await;
        assert_eq!(settlements.as_array().unwrap().len(), 1);

        let id = settlement["id"].as_u64().unwrap();
        let (status, fetched) = send(&app, Method::GET, &format!("/settlements/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["chain"], json!([a, b]));

        // Settling again is stale, not a hard error
        let (status, body) = send(
            &app,
            Method::POST,
            "/settle",
            Some(json!({"chain": [a, b]})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "stale_chain");
        assert_eq!(body["intents"], json!([a, b]));
    }

    #[tokio::test]
    async fn test_no_chain_distinct_from_unknown_intent() {
        let app = app();
        let a = post_intent(&app, "alice", "apples", "bread").await;

        let (status, body) = send(&app, Method::POST, &format!("/solve/{}", a), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no_chain_found");

        let (status, body) = send(&app, Method::POST, "/solve/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_cancel_flow() {
        let app = app();
        let a = post_intent(&app, "alice", "apples", "bread").await;
        let b = post_intent(&app, "bob", "bread", "cheese").await;
        let c = post_intent(&app, "carol", "cheese", "apples").await;

        let (_, solved) = send(&app, Method::POST, &format!("/solve/{}", a), None).await;
        assert_eq!(solved["chain"], json!([a, b, c]));

        let (status, body) = send(&app, Method::DELETE, &format!("/intents/{}", b), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, Method::DELETE, &format!("/intents/{}", b), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "invalid_state");

        let (status, body) = send(&app, Method::DELETE, "/intents/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["intents"], json!([42]));

        let (status, body) = send(
            &app,
            Method::POST,
            "/settle",
            Some(json!({"chain": solved["chain"]})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["intents"], json!([b]));

        let (_, intent) = send(&app, Method::GET, &format!("/intents/{}", a), None).await;
        assert_eq!(intent["status"], "open");
    }

    #[tokio::test]
    async fn test_invalid_chain() {
        let app = app();
        let a = post_intent(&app, "alice", "apples", "bread").await;

        let (status, body) = send(&app, Method::POST, "/settle", Some(json!({"chain": [a]}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_chain");

        let (status, _) = send(&app, Method::GET, "/settlements/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
