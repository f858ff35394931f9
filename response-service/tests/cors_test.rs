mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
};
use common::{body_bytes, offline_router, send, UNREACHABLE_UPSTREAM};

const API_ROUTES: [&str; 4] = [
    "/db-status",
    "/save-response",
    "/responses",
    "/v1/chat/completions",
];

fn assert_cors(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_METHODS],
        "GET,POST,OPTIONS"
    );
}

#[tokio::test]
async fn preflight_on_every_api_route_is_empty_204() {
    let router = offline_router(UNREACHABLE_UPSTREAM).await;

    for route in API_ROUTES {
        let response = send(
            &router,
            Request::builder()
                .method(Method::OPTIONS)
                .uri(route)
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "route {}", route);
        assert_cors(&response);
        assert!(body_bytes(response).await.is_empty(), "route {}", route);
    }
}

#[tokio::test]
async fn preflight_on_static_paths_is_empty_204() {
    let router = offline_router(UNREACHABLE_UPSTREAM).await;

    for route in ["/", "/index.html", "/assets/missing.js"] {
        let response = send(
            &router,
            Request::builder()
                .method(Method::OPTIONS)
                .uri(route)
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NO_CONTENT, "route {}", route);
        assert_cors(&response);
        assert!(body_bytes(response).await.is_empty(), "route {}", route);
    }
}

#[tokio::test]
async fn validation_errors_carry_cors_headers() {
    let router = offline_router(UNREACHABLE_UPSTREAM).await;

    let response = send(
        &router,
        Request::builder()
            .method(Method::POST)
            .uri("/save-response")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_cors(&response);
}

#[tokio::test]
async fn not_found_and_wrong_method_carry_cors_headers() {
    let router = offline_router(UNREACHABLE_UPSTREAM).await;

    let missing = send(
        &router,
        Request::builder()
            .uri("/does-not-exist.js")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_cors(&missing);

    let post_to_missing = send(
        &router,
        Request::builder()
            .method(Method::POST)
            .uri("/does-not-exist.js")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(post_to_missing.status(), StatusCode::NOT_FOUND);
    assert_cors(&post_to_missing);

    let wrong_method = send(
        &router,
        Request::builder()
            .method(Method::GET)
            .uri("/save-response")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(wrong_method.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_cors(&wrong_method);
}

#[tokio::test]
async fn upstream_failures_carry_cors_headers() {
    let router = offline_router(UNREACHABLE_UPSTREAM).await;

    let response = send(
        &router,
        Request::builder()
            .method(Method::POST)
            .uri("/v1/chat/completions")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_cors(&response);
}

#[tokio::test]
async fn every_response_gets_a_request_id() {
    let router = offline_router(UNREACHABLE_UPSTREAM).await;

    let response = send(
        &router,
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/responses")
            .header("x-request-id", "req-42")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.headers()["x-request-id"], "req-42");
}
