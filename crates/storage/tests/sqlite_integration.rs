use storage::repository::StateStore;
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn sqlite_round_trips_state_values() {
    let store = SqliteStore::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    store
        .set("solved_words", r#"["One Bee:jogging"]"#)
        .await
        .unwrap();
    store
        .set("starred_words", r#"["Three Bee:zephyr"]"#)
        .await
        .unwrap();
    store.set("best_streak", "4").await.unwrap();
    store.set("theme", "dark").await.unwrap();
    store.set("consent", "true").await.unwrap();

    assert_eq!(
        store.get("solved_words").await.unwrap(),
        Some(r#"["One Bee:jogging"]"#.to_owned())
    );
    assert_eq!(
        store.get("starred_words").await.unwrap(),
        Some(r#"["Three Bee:zephyr"]"#.to_owned())
    );
    assert_eq!(store.get("best_streak").await.unwrap(), Some("4".to_owned()));
    assert_eq!(store.get("theme").await.unwrap(), Some("dark".to_owned()));
    assert_eq!(store.get("consent").await.unwrap(), Some("true".to_owned()));
    assert_eq!(store.get("avatar").await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_set_replaces_and_remove_deletes() {
    let store = SqliteStore::connect("sqlite:file:memdb_replace?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    store.set("theme", "light").await.unwrap();
    store.set("theme", "dark").await.unwrap();
    assert_eq!(store.get("theme").await.unwrap(), Some("dark".to_owned()));

    store.remove("theme").await.unwrap();
    assert_eq!(store.get("theme").await.unwrap(), None);

    // Deleting again is a no-op, not an error.
    store.remove("theme").await.unwrap();
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.migrate().await.expect("second migrate");

    store.set("consent", "true").await.unwrap();
    assert_eq!(
        store.get("consent").await.unwrap(),
        Some("true".to_owned())
    );
}
