use super::*;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("foody-store-{}.json", uuid::Uuid::new_v4()))
}

// =============================================================================
// MemoryStore
// =============================================================================

#[test]
fn memory_store_set_get_remove() {
    let store = MemoryStore::new();
    assert!(store.is_empty());
    store.set(TOKEN_KEY, "abc");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));
    store.set(TOKEN_KEY, "def");
    assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("def"));
    store.remove(TOKEN_KEY);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert!(store.is_empty());
}

#[test]
fn memory_store_with_entries_seeds_values() {
    let store = MemoryStore::with_entries(&[(TOKEN_KEY, "abc"), (LOGGED_IN_KEY, "true")]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(LOGGED_IN_KEY).as_deref(), Some("true"));
}

#[test]
fn memory_store_remove_missing_is_noop() {
    let store = MemoryStore::new();
    store.remove("nope");
    assert!(store.is_empty());
}

// =============================================================================
// FileStore
// =============================================================================

#[test]
fn file_store_missing_file_reads_empty() {
    let store = FileStore::open(temp_path());
    assert_eq!(store.get(TOKEN_KEY), None);
}

#[test]
fn file_store_persists_across_reopen() {
    let path = temp_path();
    {
        let store = FileStore::open(&path);
        store.set(TOKEN_KEY, "abc");
        store.set(ROLE_KEY, "ROLE_USER");
    }
    let reopened = FileStore::open(&path);
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc"));
    assert_eq!(reopened.get(ROLE_KEY).as_deref(), Some("ROLE_USER"));
    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_remove_is_persisted() {
    let path = temp_path();
    let store = FileStore::open(&path);
    store.set(TOKEN_KEY, "abc");
    store.remove(TOKEN_KEY);
    assert_eq!(FileStore::open(&path).get(TOKEN_KEY), None);
    let _ = std::fs::remove_file(path);
}

#[test]
fn file_store_corrupt_file_reads_empty() {
    let path = temp_path();
    std::fs::write(&path, "{not json").unwrap();
    let store = FileStore::open(&path);
    assert_eq!(store.get(TOKEN_KEY), None);
    assert_eq!(store.path(), path.as_path());
    let _ = std::fs::remove_file(path);
}
