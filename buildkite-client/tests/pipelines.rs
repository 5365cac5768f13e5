//! Pipeline endpoint tests against a mock Buildkite API

use buildkite_client::{BuildkiteClient, ClientError};
use buildkite_core::domain::pipeline::Step;
use buildkite_core::dto::pipeline::PipelineRequest;
use serde_json::json;
use std::collections::HashMap;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "bkua_test_token";

fn client(server: &MockServer) -> BuildkiteClient {
    BuildkiteClient::new(server.uri(), "acme", TOKEN)
}

fn deploy_request() -> PipelineRequest {
    PipelineRequest {
        name: "Deploy".to_string(),
        repository: "git@github.com:acme/deploy.git".to_string(),
        default_branch: "main".to_string(),
        env: HashMap::from([("RAILS_ENV".to_string(), "production".to_string())]),
        provider_settings: HashMap::from([("build_tags".to_string(), true)]),
        steps: vec![
            Step {
                step_type: "script".to_string(),
                name: ":hammer: build".to_string(),
                command: "make build".to_string(),
                agent_query_rules: vec!["queue=build".to_string()],
                ..Default::default()
            },
            Step {
                step_type: "waiter".to_string(),
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn deploy_response() -> serde_json::Value {
    json!({
        "id": "0c9e2b1a-6c35-4f47-9a7c-6f8b1d2f3e4a",
        "url": "https://api.buildkite.com/v2/organizations/acme/pipelines/deploy",
        "web_url": "https://buildkite.com/acme/deploy",
        "name": "Deploy",
        "slug": "deploy",
        "repository": "git@github.com:acme/deploy.git",
        "default_branch": "main",
        "env": { "RAILS_ENV": "production" },
        "provider": {
            "id": "github",
            "settings": { "build_tags": true, "trigger_mode": "code" },
            "webhook_url": "https://webhook.buildkite.com/deliver/abc"
        },
        "builds_url": "https://api.buildkite.com/v2/organizations/acme/pipelines/deploy/builds",
        "badge_url": "https://badge.buildkite.com/abc.svg",
        "created_at": "2018-04-11T09:12:45.000Z",
        "steps": [
            {
                "type": "script",
                "name": ":hammer: build",
                "command": "make build",
                "agent_query_rules": ["queue=build"]
            },
            { "type": "waiter" }
        ]
    })
}

#[tokio::test]
async fn test_create_pipeline_posts_full_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/pipelines"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({
            "name": "Deploy",
            "repository": "git@github.com:acme/deploy.git",
            "default_branch": "main",
            "env": { "RAILS_ENV": "production" },
            "provider_settings": { "build_tags": true },
            "steps": [
                {
                    "type": "script",
                    "name": ":hammer: build",
                    "command": "make build",
                    "env": {},
                    "agent_query_rules": ["queue=build"]
                },
                { "type": "waiter", "env": {} }
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(deploy_response()))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = client(&server)
        .create_pipeline(&deploy_request())
        .await
        .unwrap();

    assert_eq!(pipeline.slug, "deploy");
    assert_eq!(pipeline.provider.id, "github");
    assert_eq!(pipeline.steps.len(), 2);
    assert_eq!(pipeline.steps[1].step_type, "waiter");
}

#[tokio::test]
async fn test_get_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/pipelines/deploy"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(deploy_response()))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = client(&server).get_pipeline("deploy").await.unwrap();

    assert_eq!(pipeline.name, "Deploy");
    assert_eq!(pipeline.badge_url, "https://badge.buildkite.com/abc.svg");
}

#[tokio::test]
async fn test_get_missing_pipeline_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/pipelines/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "No pipeline found" })))
        .mount(&server)
        .await;

    let err = client(&server).get_pipeline("gone").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(matches!(err, ClientError::NotFound(ref p) if p == "/organizations/acme/pipelines/gone"));
}

#[tokio::test]
async fn test_update_pipeline_patches_by_slug() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/organizations/acme/pipelines/deploy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deploy_response()))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = client(&server)
        .update_pipeline("deploy", &deploy_request())
        .await
        .unwrap();

    assert_eq!(pipeline.slug, "deploy");
}

#[tokio::test]
async fn test_delete_pipeline() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/organizations/acme/pipelines/deploy"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_pipeline("deploy").await.unwrap();
}

#[tokio::test]
async fn test_api_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/organizations/acme/pipelines"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_pipeline(&deploy_request())
        .await
        .unwrap_err();

    match err {
        ClientError::ApiError { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Validation Failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/pipelines/deploy"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client(&server).get_pipeline("deploy").await.unwrap_err();

    assert!(matches!(err, ClientError::ParseError(_)));
}

#[tokio::test]
async fn test_slug_is_a_single_encoded_path_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organizations/acme/pipelines/deploy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(deploy_response()))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).get_pipeline("deploy?x").await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound(ref p) if p == "/organizations/acme/pipelines/deploy%3Fx"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url.query(), None);
}
