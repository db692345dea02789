use std::sync::Arc;

use tempfile::TempDir;
use tendernav::menu::{visible_menu, EditingSession, MenuCache, MenuOrigin};
use tendernav::permission::{PermissionStore, StaticPermissionSource};
use tendernav::types::ActingUser;

use crate::integration::support::{ids, CountingGateway};

#[tokio::test]
async fn readers_share_one_fetch_until_a_save() {
    let temp_dir = TempDir::new().unwrap();
    let gateway = CountingGateway::open(temp_dir.path());
    let cache = MenuCache::new(gateway.clone(), "hq");

    cache.current().await;
    cache.current().await;
    EditingSession::open(&cache).await;
    assert_eq!(gateway.fetch_count(), 1);

    let mut session = EditingSession::open(&cache).await;
    session.reorder("settings", "dashboard");
    session.save(&cache, &ActingUser::new("alice")).await.unwrap();

    let loaded = cache.current().await;
    assert_eq!(gateway.fetch_count(), 2);
    assert_eq!(loaded.origin, MenuOrigin::Persisted);
    assert_eq!(ids(&loaded.tree)[0], "settings");
}

#[tokio::test]
async fn subscribers_see_each_save() {
    let temp_dir = TempDir::new().unwrap();
    let gateway = CountingGateway::open(temp_dir.path());
    let cache = MenuCache::new(gateway, "hq");
    let mut watcher = cache.subscribe();
    let actor = ActingUser::new("alice");

    let mut stale = EditingSession::open(&cache).await;
    let mut session = EditingSession::open(&cache).await;
    session.reorder("mis", "tender");
    session.save(&cache, &actor).await.unwrap();

    assert!(watcher.has_changed().unwrap());
    assert_eq!(*watcher.borrow_and_update(), 1);

    // An older session keeps its snapshot; its save replaces the structure wholesale.
    assert_eq!(ids(stale.working_tree())[1], "tender");
    stale.reorder("users", "dashboard");
    stale.save(&cache, &actor).await.unwrap();
    assert_eq!(*watcher.borrow_and_update(), 2);

    let current = cache.current().await;
    assert_eq!(ids(&current.tree)[0], "users");
    assert_eq!(ids(&current.tree)[2], "tender");
}

#[tokio::test]
async fn sidebar_reflects_saved_structure_for_each_viewer() {
    let temp_dir = TempDir::new().unwrap();
    let gateway = CountingGateway::open(temp_dir.path());
    let cache = MenuCache::new(gateway, "hq");

    let mut session = EditingSession::open(&cache).await;
    session.reorder("finance", "tender");
    session.save(&cache, &ActingUser::new("alice")).await.unwrap();

    let viewer = PermissionStore::new(Arc::new(StaticPermissionSource::new(vec![
        "finance", "tender",
    ])));
    viewer.load().await;

    let sidebar = visible_menu(&cache.current().await.tree, &viewer);
    assert_eq!(ids(&sidebar), vec!["dashboard", "finance", "tender"]);
    let finance = &sidebar[1];
    assert_eq!(ids(&finance.sub_items), vec!["finance-requests"]);
    let tender = &sidebar[2];
    assert_eq!(ids(&tender.sub_items), vec!["tender-list", "tender-create"]);
}

#[tokio::test]
async fn unloaded_permissions_show_only_open_items() {
    let temp_dir = TempDir::new().unwrap();
    let gateway = CountingGateway::open(temp_dir.path());
    let cache = MenuCache::new(gateway, "hq");

    let viewer = PermissionStore::new(Arc::new(StaticPermissionSource::new(vec!["settings"])));
    let sidebar = visible_menu(&cache.current().await.tree, &viewer);
    assert_eq!(ids(&sidebar), vec!["dashboard"]);
}
