use storage::repository::CredentialStore;
use storage::sqlite::SqliteStore;
use vocab_core::model::{UserId, UserProfile};

fn profile() -> UserProfile {
    UserProfile::new(UserId::new(7), "minh", "minh@example.com")
}

#[tokio::test]
async fn sqlite_roundtrips_token_and_profile() {
    let store = SqliteStore::open("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("open");

    store.set_token("jwt-xyz").await.unwrap();
    store.set_user(&profile()).await.unwrap();

    assert_eq!(store.token().await.unwrap().as_deref(), Some("jwt-xyz"));
    assert_eq!(store.user().await.unwrap(), Some(profile()));
}

#[tokio::test]
async fn sqlite_set_token_replaces_previous() {
    let store = SqliteStore::open("sqlite:file:memdb_replace?mode=memory&cache=shared")
        .await
        .expect("open");

    store.set_token("first").await.unwrap();
    store.set_token("second").await.unwrap();

    assert_eq!(store.token().await.unwrap().as_deref(), Some("second"));
}

#[tokio::test]
async fn sqlite_clear_removes_both_keys() {
    let store = SqliteStore::open("sqlite:file:memdb_clear?mode=memory&cache=shared")
        .await
        .expect("open");

    store.set_token("jwt-xyz").await.unwrap();
    store.set_user(&profile()).await.unwrap();

    store.clear().await.unwrap();

    assert_eq!(store.token().await.unwrap(), None);
    assert_eq!(store.user().await.unwrap(), None);
}

#[tokio::test]
async fn sqlite_purges_malformed_profile() {
    let store = SqliteStore::open("sqlite:file:memdb_malformed?mode=memory&cache=shared")
        .await
        .expect("open");

    sqlx::query("INSERT INTO credentials (key, value, updated_at) VALUES ('user_profile', '{broken', '2023-11-14T22:13:20Z')")
        .execute(store.pool())
        .await
        .unwrap();

    assert_eq!(store.user().await.unwrap(), None);

    let row = sqlx::query("SELECT value FROM credentials WHERE key = 'user_profile'")
        .fetch_optional(store.pool())
        .await
        .unwrap();
    assert!(row.is_none(), "malformed entry should be purged");
}

#[tokio::test]
async fn sqlite_migration_is_idempotent() {
    let store = SqliteStore::open("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("open");
    store.migrate().await.expect("second migrate");
}
