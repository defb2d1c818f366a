// tests/e2e_events_http.rs
mod support;

use audit_console::domain::{event::PURGE_EVENT_TYPE, scope::EntityId};
use axum::http::{StatusCode, header};
use std::sync::Arc;
use support::{
    ADMIN_TOKEN, EXTERNAL_ADMIN_TOKEN, EventBuilder, InMemoryEventRepo, USER_TOKEN, admin_user,
    body_text, events_in, extract_token, get, make_test_router, post_form,
};
use tower::ServiceExt;

const EVENTS: &str = "/admin/tools/events";

#[tokio::test]
async fn health_reports_ok() {
    let app = make_test_router(Arc::new(InMemoryEventRepo::new()));
    let resp = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn missing_or_bad_token_is_unauthorized() {
    let app = make_test_router(Arc::new(InMemoryEventRepo::new()));
    let resp = app.clone().oneshot(get(EVENTS, None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = app.oneshot(get(EVENTS, Some("nope"))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_cookie_is_accepted() {
    let app = make_test_router(Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 2))));
    let req = axum::http::Request::builder()
        .uri(EVENTS)
        .header(header::COOKIE, format!("lang=en; session={ADMIN_TOKEN}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_admin_gets_forbidden_page_without_rows() {
    let repo = Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 3)));
    let app = make_test_router(Arc::clone(&repo));
    let resp = app.oneshot(get(EVENTS, Some(USER_TOKEN))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let html = body_text(resp).await;
    assert!(html.contains("403"));
    assert!(!html.contains("event-row"));
    assert_eq!(repo.list_calls(), 0);
}

#[tokio::test]
async fn listing_escapes_stored_values() {
    let repo = Arc::new(InMemoryEventRepo::with_events(vec![
        EventBuilder::new(1)
            .description("<script>document.cookie</script>")
            .ip("<b>10.0.0.1</b>")
            .build(),
    ]));
    let app = make_test_router(repo);
    let resp = app.oneshot(get(EVENTS, Some(ADMIN_TOKEN))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(!html.contains("<script>document.cookie"));
    assert!(!html.contains("<b>10.0.0.1</b>"));
    assert!(html.contains("List of security events"));
}

#[tokio::test]
async fn empty_state_message_depends_on_filters() {
    let app = make_test_router(Arc::new(InMemoryEventRepo::new()));
    let resp = app.clone().oneshot(get(EVENTS, Some(ADMIN_TOKEN))).await.unwrap();
    let html = body_text(resp).await;
    assert!(html.contains("No security event has been recorded."));
    assert!(!html.contains("action=purge"));

    let resp = app
        .oneshot(get(&format!("{EVENTS}?search_user=ghost"), Some(ADMIN_TOKEN)))
        .await
        .unwrap();
    let html = body_text(resp).await;
    assert!(html.contains("No security event has been found for this search criteria."));
}

#[tokio::test]
async fn next_link_appears_only_with_more_rows() {
    let app = make_test_router(Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 30))));
    let html = body_text(app.clone().oneshot(get(EVENTS, Some(ADMIN_TOKEN))).await.unwrap()).await;
    assert_eq!(html.matches("class=\"event-row\"").count(), 25);
    assert!(html.contains("rel=\"next\""));
    assert!(!html.contains("rel=\"prev\""));

    let html = body_text(
        app.oneshot(get(&format!("{EVENTS}?page=1"), Some(ADMIN_TOKEN)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(html.matches("class=\"event-row\"").count(), 5);
    assert!(!html.contains("rel=\"next\""));
    assert!(html.contains("rel=\"prev\""));
}

#[tokio::test]
async fn purge_round_trip_redirects_and_leaves_one_record() {
    let repo = Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 4)).with_user(admin_user()));
    let app = make_test_router(Arc::clone(&repo));

    let html = body_text(
        app.clone()
            .oneshot(get(&format!("{EVENTS}?action=purge"), Some(ADMIN_TOKEN)))
            .await
            .unwrap(),
    )
    .await;
    assert!(html.contains("confirm-dialog"));
    let token = extract_token(&html).expect("token in confirmation dialog");
    // nothing deleted by asking
    assert_eq!(repo.events_in(EntityId(1)).len(), 4);

    let resp = app
        .oneshot(post_form(
            EVENTS,
            ADMIN_TOKEN,
            &[("action", "confirm_purge"), ("confirm", "yes"), ("token", &token)],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), EVENTS);

    let remaining = repo.events_in(EntityId(1));
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].event_type, PURGE_EVENT_TYPE);
    assert_eq!(remaining[0].ip, "203.0.113.7");
}

#[tokio::test]
async fn forged_confirmation_is_forbidden() {
    let repo = Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 4)));
    let app = make_test_router(Arc::clone(&repo));
    let resp = app
        .oneshot(post_form(
            EVENTS,
            ADMIN_TOKEN,
            &[("action", "confirm_purge"), ("confirm", "yes"), ("token", "forged.value")],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(repo.events_in(EntityId(1)).len(), 4);
}

#[tokio::test]
async fn external_admin_never_sees_purge_dialog() {
    let repo = Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 2)));
    let app = make_test_router(Arc::clone(&repo));
    let resp = app
        .oneshot(get(&format!("{EVENTS}?action=purge"), Some(EXTERNAL_ADMIN_TOKEN)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(!html.contains("confirm-dialog"));
    assert!(!html.contains("action=purge"));
}

#[tokio::test]
async fn failed_purge_shows_error_banner_and_keeps_rows() {
    let repo = Arc::new(InMemoryEventRepo::with_events(events_in(1, 1, 3)));
    repo.fail_insert();
    let app = make_test_router(Arc::clone(&repo));

    let html = body_text(
        app.clone()
            .oneshot(get(&format!("{EVENTS}?action=purge"), Some(ADMIN_TOKEN)))
            .await
            .unwrap(),
    )
    .await;
    let token = extract_token(&html).unwrap();

    let resp = app
        .oneshot(post_form(
            EVENTS,
            ADMIN_TOKEN,
            &[("action", "confirm_purge"), ("confirm", "yes"), ("token", &token)],
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("rolled back"));
    assert_eq!(html.matches("class=\"event-row\"").count(), 3);
}

#[tokio::test]
async fn storage_failure_renders_generic_error_page() {
    let repo = Arc::new(InMemoryEventRepo::new());
    repo.fail_list();
    let app = make_test_router(repo);
    let resp = app.oneshot(get(EVENTS, Some(ADMIN_TOKEN))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(resp).await;
    assert!(html.contains("database error"));
    assert!(!html.contains("connection reset"));
}
