//! Tests for the file-backed store and favourites persistence.

use stay_engine::store::{Favorites, FileStore, KeyValueStore, MemoryStore, UserScope};
use stay_engine::StayError;

#[test]
fn missing_file_opens_as_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    assert_eq!(store.get(&UserScope::new("u"), "favorites").unwrap(), None);
}

#[test]
fn favorites_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let user = UserScope::new("alice@example.com");

    {
        let mut favs = Favorites::new(FileStore::open(&path).unwrap());
        favs.add(&user, "venue-a").unwrap();
        favs.add(&user, "venue-b").unwrap();
    }

    let favs = Favorites::new(FileStore::open(&path).unwrap());
    assert_eq!(
        favs.list(&user).unwrap(),
        vec!["venue-a".to_string(), "venue-b".to_string()]
    );
    assert!(favs.list(&UserScope::new("bob")).unwrap().is_empty());
}

#[test]
fn corrupt_store_file_is_a_payload_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "[not a store").unwrap();

    assert!(matches!(FileStore::open(&path), Err(StayError::Payload(_))));
}

#[test]
fn unwritable_path_is_a_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    // Parent directory does not exist.
    let mut store = FileStore::open(dir.path().join("missing-dir").join("store.json")).unwrap();
    let err = store
        .set(&UserScope::new("u"), "favorites", "[]".to_string())
        .unwrap_err();
    assert!(matches!(err, StayError::Storage(_)));
}

#[test]
fn failed_write_leaves_memory_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let user = UserScope::new("u");
    let mut store = FileStore::open(dir.path().join("missing-dir").join("store.json")).unwrap();

    assert!(store.set(&user, "favorites", "[\"v\"]".to_string()).is_err());
    assert_eq!(store.get(&user, "favorites").unwrap(), None);

    let mut favs = Favorites::new(store);
    assert!(matches!(favs.add(&user, "venue-a"), Err(StayError::Storage(_))));
    assert!(!favs.contains(&user, "venue-a").unwrap());
    assert!(favs.list(&user).unwrap().is_empty());
}

#[test]
fn failed_remove_keeps_existing_entry() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("sub");
    std::fs::create_dir(&sub).unwrap();
    let path = sub.join("store.json");
    let user = UserScope::new("u");

    let mut favs = Favorites::new(FileStore::open(&path).unwrap());
    favs.add(&user, "venue-a").unwrap();

    // Pull the directory out from under the store so the next write fails.
    std::fs::remove_dir_all(&sub).unwrap();
    assert!(favs.remove(&user, "venue-a").is_err());
    assert_eq!(favs.list(&user).unwrap(), vec!["venue-a".to_string()]);
}

#[test]
fn writes_leave_no_temp_file_behind() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    let mut favs = Favorites::new(FileStore::open(&path).unwrap());
    favs.add(&UserScope::new("u"), "venue-a").unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("store.json")]);
}

// ── Favourites over the in-memory store ─────────────────────────────────────

#[test]
fn scopes_do_not_leak() {
    let alice = UserScope::new("alice");
    let bob = UserScope::new("bob");
    let mut favs = Favorites::new(MemoryStore::new());

    favs.add(&alice, "venue-1").unwrap();

    assert_eq!(favs.list(&alice).unwrap(), vec!["venue-1".to_string()]);
    assert!(favs.list(&bob).unwrap().is_empty());
}

#[test]
fn add_is_idempotent_and_toggle_flips() {
    let user = UserScope::new("u");
    let mut favs = Favorites::new(MemoryStore::new());

    favs.add(&user, "v").unwrap();
    favs.add(&user, "v").unwrap();
    assert_eq!(favs.list(&user).unwrap().len(), 1);

    assert!(!favs.toggle(&user, "v").unwrap());
    assert!(favs.toggle(&user, "v").unwrap());
    assert!(favs.contains(&user, "v").unwrap());
}
