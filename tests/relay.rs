//! End-to-end tests for the slides deployment (slide and image relay).

use axum::{body::Body, http::Request};
use genai_proxy::config::Deployment;
use genai_proxy::GatewayServer;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

const COMPLETION: &str = r#"{"id":"chatcmpl-1","choices":[{"message":{"role":"assistant","content":"Title: Intro\nContent: - a\nImage: a cat"}}],"usage":{"total_tokens":42}}"#;
const IMAGE: &str = r#"{"created":1700000000,"data":[{"url":"https://example.com/img.png"}]}"#;

#[tokio::test]
async fn test_slides_relay_raw_json() {
    let upstream = common::start_mock_upstream(200, COMPLETION).await;
    let gateway = common::start_gateway(common::test_config(upstream.base_url(), Deployment::Slides)).await;

    let res = common::client()
        .post(gateway.url("/api/generate-slides"))
        .json(&json!({"text": "Photosynthesis basics", "language": "Spanish"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::from_str::<Value>(COMPLETION).unwrap());

    let calls = upstream.calls();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.path, "/v1/chat/completions");
    assert_eq!(call.authorization.as_deref(), Some("Bearer sk-test-key"));
    assert_eq!(call.body["model"], "gpt-4");
    assert_eq!(call.body["max_tokens"], 700);
    assert!(call.body.get("n").is_none());
    assert_eq!(
        call.body["messages"][0],
        json!({"role": "system", "content": "You are an expert presentation creator."})
    );
    let prompt = call.body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.starts_with("Create slides in Spanish from this text: Photosynthesis basics."));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_slides_interpolate_any_field_value() {
    let upstream = common::start_mock_upstream(200, COMPLETION).await;
    let gateway = common::start_gateway(common::test_config(upstream.base_url(), Deployment::Slides)).await;
    let client = common::client();

    for body in [
        json!({"text": "x", "language": null}),
        json!({"text": 42, "language": ["en", "fr"]}),
        json!({}),
    ] {
        let res = client.post(gateway.url("/api/generate-slides")).json(&body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "body {}", body);
    }

    let calls = upstream.calls();
    assert_eq!(calls.len(), 3);
    let prompt = |i: usize| calls[i].body["messages"][1]["content"].as_str().unwrap().to_string();
    assert!(prompt(0).starts_with("Create slides in null from this text: x."));
    assert!(prompt(1).starts_with(r#"Create slides in ["en","fr"] from this text: 42."#));
    assert!(prompt(2).starts_with("Create slides in  from this text: ."));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_slides_relays_upstream_error_body() {
    const RAW: &str = r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#;
    let upstream = common::start_mock_upstream(401, RAW).await;
    let gateway = common::start_gateway(common::test_config(upstream.base_url(), Deployment::Slides)).await;

    let res = common::client()
        .post(gateway.url("/api/generate-slides"))
        .json(&json!({"text": "x", "language": "English"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::from_str::<Value>(RAW).unwrap());

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_slides_transport_failure() {
    let dead = common::closed_addr().await;
    let gateway = common::start_gateway(common::test_config(format!("http://{}", dead), Deployment::Slides)).await;

    let res = common::client()
        .post(gateway.url("/api/generate-slides"))
        .json(&json!({"text": "x", "language": "English"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Server error"}));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_image_relay() {
    let upstream = common::start_mock_upstream(200, IMAGE).await;
    let gateway = common::start_gateway(common::test_config(upstream.base_url(), Deployment::Slides)).await;
    let client = common::client();

    let res = client
        .post(gateway.url("/api/generate-image"))
        .json(&json!({"prompt": "a lighthouse at dusk"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::from_str::<Value>(IMAGE).unwrap());

    let res = client
        .post(gateway.url("/api/generate-image"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let calls = upstream.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].path, "/v1/images/generations");
    assert_eq!(
        calls[0].body,
        json!({"prompt": "a lighthouse at dusk", "n": 1, "size": "512x512"})
    );
    assert_eq!(calls[1].body, json!({"n": 1, "size": "512x512"}));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_image_forwards_prompt_value_unchanged() {
    let upstream = common::start_mock_upstream(200, IMAGE).await;
    let gateway = common::start_gateway(common::test_config(upstream.base_url(), Deployment::Slides)).await;
    let client = common::client();

    for body in [json!({"prompt": 42}), json!({"prompt": null})] {
        let res = client.post(gateway.url("/api/generate-image")).json(&body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "body {}", body);
    }

    let calls = upstream.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].body, json!({"prompt": 42, "n": 1, "size": "512x512"}));
    assert_eq!(calls[1].body, json!({"prompt": null, "n": 1, "size": "512x512"}));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_image_non_json_body_fails() {
    let upstream = common::start_mock_upstream(502, "Bad Gateway").await;
    let gateway = common::start_gateway(common::test_config(upstream.base_url(), Deployment::Slides)).await;

    let res = common::client()
        .post(gateway.url("/api/generate-image"))
        .json(&json!({"prompt": "p"}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"error": "Image generation failed"}));

    gateway.shutdown.trigger();
}

#[tokio::test]
async fn test_deployment_route_sets_are_disjoint() {
    let slides = GatewayServer::new(common::test_config("http://127.0.0.1:9".into(), Deployment::Slides));
    let res = slides
        .router()
        .oneshot(
            Request::post("/api/summarize")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"text":"irrelevant"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);

    let summarizer = GatewayServer::new(common::test_config("http://127.0.0.1:9".into(), Deployment::Summarizer));
    let res = summarizer
        .router()
        .oneshot(
            Request::post("/api/generate-image")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"prompt":"p"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 404);

    let res = slides
        .router()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
}
