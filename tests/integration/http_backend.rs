use std::sync::Arc;
use std::time::Duration;

use tendernav::gateway::{HttpMenuGateway, ACTING_USER_HEADER};
use tendernav::menu::{default_structure, reorder, EditingSession, MenuCache, MenuOrigin};
use tendernav::notice::{Notice, NoticeLevel};
use tendernav::permission::{HttpPermissionSource, LoadStatus, PermissionStore};
use tendernav::route::{RouteTable, RouteVisit};
use tendernav::types::ActingUser;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cache(server: &MockServer) -> MenuCache {
    let gateway =
        HttpMenuGateway::new(server.uri(), "hq", Some("t0k".to_string()), Duration::from_secs(5))
            .unwrap();
    MenuCache::new(Arc::new(gateway), "hq")
}

#[tokio::test]
async fn first_run_serves_default_and_saves_wholesale() {
    let server = MockServer::start().await;
    let moved = reorder(&default_structure(), "finance", "tender");
    Mock::given(method("GET"))
        .and(path("/installations/hq/menu"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/installations/hq/menu"))
        .and(header(ACTING_USER_HEADER, "alice"))
        .and(header("authorization", "Bearer t0k"))
        .and(body_json(&moved))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/installations/hq/menu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&moved))
        .mount(&server)
        .await;

    let cache = cache(&server);
    let mut session = EditingSession::open(&cache).await;
    assert_eq!(session.origin(), MenuOrigin::Default);

    session.reorder("finance", "tender");
    session.save(&cache, &ActingUser::new("alice")).await.unwrap();

    let reloaded = cache.current().await;
    assert_eq!(reloaded.origin, MenuOrigin::Persisted);
    assert_eq!(reloaded.tree, moved);
}

#[tokio::test]
async fn backend_outage_on_save_is_retryable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let cache = cache(&server);
    let mut session = EditingSession::open(&cache).await;
    session.reorder("mis", "dashboard");
    let err = session
        .save(&cache, &ActingUser::new("alice"))
        .await
        .unwrap_err();

    let notice = Notice::from_error(&err);
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.retryable);
    assert!(session.has_changes());
    assert_eq!(cache.generation(), 0);
}

#[tokio::test]
async fn unreachable_backend_falls_back_to_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let loaded = cache(&server).current().await;
    assert_eq!(loaded.origin, MenuOrigin::DefaultAfterError);
    assert_eq!(loaded.tree, default_structure());
}

#[tokio::test]
async fn remote_permissions_gate_routes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/permissions"))
        .and(header("authorization", "Bearer t0k"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "permissions": ["tender", "mis"] })),
        )
        .mount(&server)
        .await;

    let source =
        HttpPermissionSource::new(server.uri(), Some("t0k".to_string()), Duration::from_secs(5))
            .unwrap();
    let store = PermissionStore::new(Arc::new(source));
    let routes = RouteTable::builtin();

    assert_eq!(
        routes.visit("/tenders", &store),
        RouteVisit::Unauthorized("/tenders".to_string())
    );
    assert_eq!(store.load().await, LoadStatus::Loaded);
    assert_eq!(
        routes.visit("/tenders", &store),
        RouteVisit::Rendered("/tenders".to_string())
    );
    assert_eq!(
        routes.visit("/finance/mis/", &store),
        RouteVisit::Rendered("/finance/mis/".to_string())
    );
    assert_eq!(
        routes.visit("/finance", &store),
        RouteVisit::Unauthorized("/finance".to_string())
    );
    assert_eq!(
        routes.visit("/nowhere", &store),
        RouteVisit::NotFound("/nowhere".to_string())
    );
}
