mod common;

use axum::{
    body::Body,
    http::{self, header, Request, StatusCode},
};
use common::{app, default_test_config};
use daemonset_name_webhook::{
    admission_response::PatchType,
    admission_review::AdmissionReview,
    config::RejectionMode,
    mutation::{PatchOp, PatchOperation},
};
use http_body_util::BodyExt;
use rstest::*;
use tower::ServiceExt;

fn mutate_request(payload: &str) -> Request<Body> {
    Request::builder()
        .method(http::Method::POST)
        .header(header::CONTENT_TYPE, "application/json")
        .uri("/mutate-pod")
        .body(Body::from(payload.to_owned()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

#[tokio::test]
#[rstest]
#[case::bound_to_node(
    include_str!("data/pod_bound_to_node.json"),
    "0df28fbd-5f5f-11e8-bc74-36e6bb280816",
    "node-exporter-worker-01",
)]
#[case::pinned_by_node_affinity(
    include_str!("data/pod_with_node_affinity.json"),
    "c1b5d3a4-9f0e-4d8a-8a8e-1b2c3d4e5f60",
    "job-node-2",
)]
async fn test_mutate_pod(
    #[case] payload: &str,
    #[case] expected_uid: &str,
    #[case] expected_name: &str,
) {
    let app = app(default_test_config());

    let response = app.oneshot(mutate_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );

    let review: AdmissionReview = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(review.kind.as_deref(), Some("AdmissionReview"));
    assert_eq!(review.api_version.as_deref(), Some("admission.k8s.io/v1"));

    let request = review.request.expect("request should be echoed");
    assert_eq!(request.uid, expected_uid);

    let admission_response = review.response.expect("response should be set");
    assert_eq!(admission_response.uid, expected_uid);
    assert!(admission_response.allowed);
    assert_eq!(admission_response.patch_type, Some(PatchType::JSONPatch));
    assert!(admission_response.status.is_none());

    let patch: Vec<PatchOperation> =
        serde_json::from_slice(&admission_response.patch_bytes().unwrap().unwrap()).unwrap();
    assert_eq!(
        patch,
        vec![PatchOperation {
            op: PatchOp::Replace,
            path: "/metadata/name".to_owned(),
            value: expected_name.to_owned(),
        }]
    );
}

#[tokio::test]
#[rstest]
#[case::not_scheduled(include_str!("data/pod_not_scheduled.json"), "node not assigned")]
#[case::without_generate_name(
    include_str!("data/pod_without_generate_name.json"),
    "GenerateName is empty"
)]
#[case::not_a_pod(include_str!("data/deployment.json"), "unexpected resource type")]
#[case::invalid_json("{\"request\": ", "error decoding request")]
#[case::no_request("{}", "error decoding request")]
async fn test_rejections(#[case] payload: &str, #[case] expected_message: &str) {
    let app = app(default_test_config());

    let response = app.oneshot(mutate_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(
        message.starts_with(expected_message),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn test_invalid_pod_name_is_rejected() {
    let node_name = format!("Worker_{}", "a".repeat(260));
    let payload = include_str!("data/pod_bound_to_node.json").replace("worker_01", &node_name);
    let app = app(default_test_config());

    let response = app.oneshot(mutate_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(message.starts_with("invalid pod name: "));
    assert!(message.contains("must be no more than 253 characters"));
    assert!(message.contains("a lowercase RFC 1123 subdomain"));
}

#[tokio::test]
#[rstest]
#[case::not_scheduled(include_str!("data/pod_not_scheduled.json"), "9a6e6c0f-2b0d-4c57-9d3b-0e7f3a1c2b44", "node not assigned")]
#[case::not_a_pod(include_str!("data/deployment.json"), "e3f0c1d2-4b5a-4c6d-8e7f-9a0b1c2d3e4f", "unexpected resource type: apps/v1, Resource=deployments")]
async fn test_rejections_as_admission_responses(
    #[case] payload: &str,
    #[case] expected_uid: &str,
    #[case] expected_message: &str,
) {
    let mut config = default_test_config();
    config.rejection_mode = RejectionMode::AdmissionDeny;
    let app = app(config);

    let response = app.oneshot(mutate_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let review: AdmissionReview = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let admission_response = review.response.expect("response should be set");
    assert_eq!(admission_response.uid, expected_uid);
    assert!(!admission_response.allowed);
    assert!(admission_response.patch.is_none());

    let status = admission_response.status.expect("status should be set");
    assert_eq!(status.message.as_deref(), Some(expected_message));
    assert_eq!(status.code, Some(400));
}

#[tokio::test]
async fn test_resource_without_group_is_denied() {
    let payload = include_str!("data/deployment.json").replace(
        r#""resource": { "group": "apps", "version": "v1", "resource": "deployments" }"#,
        r#""resource": { "version": "v1", "resource": "configmaps" }"#,
    );
    let mut config = default_test_config();
    config.rejection_mode = RejectionMode::AdmissionDeny;
    let app = app(config);

    let response = app.oneshot(mutate_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let review: AdmissionReview = serde_json::from_slice(&body_bytes(response).await).unwrap();
    let admission_response = review.response.expect("response should be set");
    assert!(!admission_response.allowed);
    assert_eq!(
        admission_response.status.and_then(|status| status.message).as_deref(),
        Some("unexpected resource type: /v1, Resource=configmaps")
    );
}

#[tokio::test]
async fn test_undecodable_requests_stay_transport_errors() {
    let mut config = default_test_config();
    config.rejection_mode = RejectionMode::AdmissionDeny;
    let app = app(config);

    let response = app.oneshot(mutate_request("not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_same_request_same_answer() {
    let payload = include_str!("data/pod_bound_to_node.json");

    let first = app(default_test_config())
        .oneshot(mutate_request(payload))
        .await
        .unwrap();
    let second = app(default_test_config())
        .oneshot(mutate_request(payload))
        .await
        .unwrap();

    assert_eq!(body_bytes(first).await, body_bytes(second).await);
}

#[tokio::test]
async fn test_readiness() {
    let app = app(default_test_config());

    let request = Request::builder()
        .uri("/readiness")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[rstest]
#[case::wrong_method(http::Method::GET, "/mutate-pod", StatusCode::METHOD_NOT_ALLOWED)]
#[case::unknown_path(http::Method::POST, "/validate", StatusCode::NOT_FOUND)]
async fn test_routing(
    #[case] method: http::Method,
    #[case] uri: &str,
    #[case] expected_status: StatusCode,
) {
    let app = app(default_test_config());

    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), expected_status);
}
