// tests/support/helpers.rs
use super::mocks::{DummyTokenManager, FixedClock, InMemoryEventRepo};
use audit_console::application::{
    ports::{
        forgery::AntiForgery, localization::Translator, security::TokenManager, time::Clock,
    },
    queries::events::ListingSettings,
    services::ApplicationServices,
};
use audit_console::domain::event::EventRepository;
use audit_console::infrastructure::{
    localization::CatalogTranslator, security::forgery::HmacAntiForgery,
};
use audit_console::presentation::http::{routes::build_router, state::HttpState};
use axum::body::{self, Body};
use axum::http::Request;
use std::sync::Arc;

pub const CSRF_SECRET: &[u8] = b"integration-test-secret-0123456789";

pub fn anti_forgery() -> Arc<HmacAntiForgery> {
    Arc::new(HmacAntiForgery::new(
        CSRF_SECRET.to_vec(),
        chrono::Duration::hours(1),
        Arc::new(FixedClock),
    ))
}

pub fn build_services(repo: Arc<InMemoryEventRepo>, settings: ListingSettings) -> Arc<ApplicationServices> {
    let event_repo: Arc<dyn EventRepository> = repo;
    let token_manager: Arc<dyn TokenManager> = Arc::new(DummyTokenManager);
    let anti_forgery: Arc<dyn AntiForgery> = anti_forgery();
    let translator: Arc<dyn Translator> = Arc::new(CatalogTranslator::english());
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);

    Arc::new(ApplicationServices::new(
        event_repo,
        token_manager,
        anti_forgery,
        translator,
        clock,
        settings,
    ))
}

pub fn build_test_state(repo: Arc<InMemoryEventRepo>) -> HttpState {
    HttpState::new(build_services(repo, ListingSettings::default()), &[])
}

pub fn make_test_router(repo: Arc<InMemoryEventRepo>) -> axum::Router {
    build_router(build_test_state(repo))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn post_form(uri: &str, token: &str, form: &[(&str, &str)]) -> Request<Body> {
    let body = serde_urlencoded::to_string(form).expect("encode form");
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/x-www-form-urlencoded")
        .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
        .header("user-agent", "integration-test")
        .body(Body::from(body))
        .expect("request")
}

pub async fn body_text(resp: axum::response::Response) -> String {
    let bytes = body::to_bytes(resp.into_body(), 4 * 1024 * 1024)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

/// Pulls the anti-forgery token out of the rendered confirmation dialog.
pub fn extract_token(html: &str) -> Option<String> {
    let marker = r#"name="token" value=""#;
    let start = html.find(marker)? + marker.len();
    let end = html[start..].find('"')?;
    Some(html[start..start + end].to_string())
}
