//! Contract tests for API key authentication and capability checks

#[macro_use]
#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use helpers::*;
use venuebook::middleware::auth::API_KEY_HEADER;
use venuebook::middleware::request_id::REQUEST_ID_HEADER;

const PROTECTED_ROUTES: [&str; 7] = [
    "/analytics/dashboard",
    "/analytics/revenue",
    "/analytics/revenue/total",
    "/analytics/revenue/by-method",
    "/analytics/bookings/summary",
    "/reports/monthly",
    "/reports/printable",
];

#[actix_web::test]
async fn test_missing_api_key_is_unauthorized() {
    let app = init_test_app!(InMemoryReportRepository::default());

    for uri in PROTECTED_ROUTES {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], "UNAUTHORIZED");
    }
}

#[actix_web::test]
async fn test_unknown_api_key_is_unauthorized() {
    let app = init_test_app!(InMemoryReportRepository::default());

    let req = test::TestRequest::get()
        .uri("/analytics/dashboard")
        .insert_header((API_KEY_HEADER, "not-a-real-key"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_customer_is_forbidden() {
    let app = init_test_app!(InMemoryReportRepository::default());

    for uri in PROTECTED_ROUTES {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((API_KEY_HEADER, CUSTOMER_API_KEY))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["kind"], "FORBIDDEN");
    }
}

#[actix_web::test]
async fn test_admin_is_allowed() {
    let app = init_test_app!(InMemoryReportRepository::default());

    for uri in PROTECTED_ROUTES {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((API_KEY_HEADER, ADMIN_API_KEY))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }
}

#[actix_web::test]
async fn test_probes_need_no_key() {
    let app = init_test_app!(InMemoryReportRepository::default());

    for uri in ["/health", "/ready"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }
}

#[actix_web::test]
async fn test_request_id_is_echoed() {
    let app = init_test_app!(InMemoryReportRepository::default());

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header((REQUEST_ID_HEADER, "trace-abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let echoed = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok());
    assert_eq!(echoed, Some("trace-abc-123"));
}

#[actix_web::test]
async fn test_request_id_is_generated_on_rejection() {
    let app = init_test_app!(InMemoryReportRepository::default());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/analytics/dashboard").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
}

#[actix_web::test]
async fn test_rate_limit_error_body() {
    let app = init_test_app!(InMemoryReportRepository::default(), 2);

    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/analytics/bookings/summary")
            .insert_header((API_KEY_HEADER, ADMIN_API_KEY))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri("/analytics/bookings/summary")
        .insert_header((API_KEY_HEADER, ADMIN_API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 429);
    assert_eq!(body["error"]["kind"], "RATE_LIMITED");
    assert_eq!(
        body["error"]["message"],
        "Rate limit exceeded: Maximum 2 requests per minute"
    );

    // Probes stay reachable once the quota is spent
    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_rotating_forwarded_for_shares_quota() {
    let app = init_test_app!(InMemoryReportRepository::default(), 1);
    let peer: std::net::SocketAddr = "203.0.113.20:51000".parse().unwrap();

    let mut statuses = Vec::new();
    for i in 0..20 {
        let req = test::TestRequest::get()
            .uri("/analytics/revenue/total")
            .peer_addr(peer)
            .insert_header((API_KEY_HEADER, ADMIN_API_KEY))
            .insert_header(("X-Forwarded-For", format!("10.20.30.{}", i)))
            .to_request();
        statuses.push(test::call_service(&app, req).await.status());
    }

    assert_eq!(statuses[0], StatusCode::OK);
    assert!(statuses[1..].iter().all(|s| *s == StatusCode::TOO_MANY_REQUESTS));
}

#[actix_web::test]
async fn test_unknown_route_is_json_not_found() {
    let app = init_test_app!(InMemoryReportRepository::default());

    let req = test::TestRequest::get()
        .uri("/analytics/forecast")
        .insert_header((API_KEY_HEADER, ADMIN_API_KEY))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 404);
    assert_eq!(body["error"]["kind"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Not found: No route for /analytics/forecast");
}
