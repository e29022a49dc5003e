use super::*;
use crate::util::storage::MemoryStorage;

struct FailingStorage;

impl KeyValueStore for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Access("SecurityError".to_owned()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Access("QuotaExceededError".to_owned()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Memory store whose writes to one key always fail.
struct StuckKey {
    inner: MemoryStorage,
    key: &'static str,
}

impl KeyValueStore for StuckKey {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.key {
            return Err(StorageError::Access("QuotaExceededError".to_owned()));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        if key == self.key {
            return Err(StorageError::Access("SecurityError".to_owned()));
        }
        self.inner.remove_item(key)
    }
}

fn reader(store: &MemoryStorage) -> StorageSessionReader<&MemoryStorage> {
    StorageSessionReader::new(store, &GuardConfig::default())
}

// =============================================================
// read()
// =============================================================

#[test]
fn empty_storage_is_logged_out_non_admin() {
    let store = MemoryStorage::new();
    assert_eq!(reader(&store).read(), SessionState { logged_in: false, is_admin: false });
}

#[test]
fn token_present_means_logged_in() {
    let store = MemoryStorage::with_items([("jwt", "eyJhbGciOi")]);
    assert_eq!(reader(&store).read(), SessionState { logged_in: true, is_admin: false });
}

#[test]
fn empty_token_is_not_a_session() {
    let store = MemoryStorage::with_items([("jwt", "")]);
    assert!(!reader(&store).read().logged_in);
}

#[test]
fn exact_sentinel_means_admin() {
    let store = MemoryStorage::with_items([("jwt", "t"), ("role", "admin")]);
    assert_eq!(reader(&store).read(), SessionState { logged_in: true, is_admin: true });
}

#[test]
fn sentinel_comparison_is_case_sensitive() {
    let store = MemoryStorage::with_items([("jwt", "t"), ("role", "Admin")]);
    assert!(!reader(&store).read().is_admin);
}

#[test]
fn sentinel_with_trailing_space_is_not_admin() {
    let store = MemoryStorage::with_items([("jwt", "t"), ("role", "admin ")]);
    assert!(!reader(&store).read().is_admin);
}

#[test]
fn admin_flag_is_independent_of_token() {
    let store = MemoryStorage::with_items([("role", "admin")]);
    assert_eq!(reader(&store).read(), SessionState { logged_in: false, is_admin: true });
}

#[test]
fn read_is_idempotent_without_mutation() {
    let store = MemoryStorage::with_items([("jwt", "t"), ("role", "customer")]);
    let reader = reader(&store);
    assert_eq!(reader.read(), reader.read());
}

#[test]
fn read_observes_storage_changes_between_calls() {
    let store = MemoryStorage::new();
    let reader = reader(&store);
    assert!(!reader.read().logged_in);

    store.set_item("jwt", "t").unwrap();
    assert!(reader.read().logged_in);
}

#[test]
fn read_uses_configured_keys_and_sentinel() {
    let config = GuardConfig {
        token_key: "access_token".to_owned(),
        role_key: "user_role".to_owned(),
        admin_sentinel: "theatre-admin".to_owned(),
        ..GuardConfig::default()
    };
    let store = MemoryStorage::with_items([("jwt", "t"), ("role", "admin")]);
    assert_eq!(StorageSessionReader::new(&store, &config).read(), SessionState::default());

    store.set_item("access_token", "t").unwrap();
    store.set_item("user_role", "theatre-admin").unwrap();
    assert_eq!(
        StorageSessionReader::new(&store, &config).read(),
        SessionState { logged_in: true, is_admin: true }
    );
}

#[test]
fn storage_failure_degrades_to_defaults() {
    let reader = StorageSessionReader::new(FailingStorage, &GuardConfig::default());
    assert_eq!(reader.read(), SessionState::default());
}

#[test]
fn is_admin_marker_requires_exact_match() {
    assert!(is_admin_marker("admin", "admin"));
    assert!(!is_admin_marker("ADMIN", "admin"));
    assert!(!is_admin_marker(" admin", "admin"));
    assert!(!is_admin_marker("", "admin"));
}

// =============================================================
// persist_login / clear_session
// =============================================================

#[test]
fn persist_login_writes_token_and_role() {
    let store = MemoryStorage::new();
    let config = GuardConfig::default();
    persist_login(&store, &config, "tok", Some("admin")).unwrap();

    assert_eq!(store.get_item("jwt"), Ok(Some("tok".to_owned())));
    assert_eq!(reader(&store).read(), SessionState { logged_in: true, is_admin: true });
}

#[test]
fn persist_login_without_role_clears_stale_marker() {
    let store = MemoryStorage::with_items([("role", "admin")]);
    persist_login(&store, &GuardConfig::default(), "tok", None).unwrap();

    assert_eq!(store.get_item("role"), Ok(None));
    assert_eq!(reader(&store).read(), SessionState { logged_in: true, is_admin: false });
}

#[test]
fn clear_session_removes_token_and_role() {
    let store = MemoryStorage::with_items([("jwt", "tok"), ("role", "admin"), ("theme", "dark")]);
    clear_session(&store, &GuardConfig::default()).unwrap();

    assert_eq!(reader(&store).read(), SessionState::default());
    assert_eq!(store.get_item("theme"), Ok(Some("dark".to_owned())));
}

#[test]
fn writer_surfaces_storage_errors() {
    let config = GuardConfig::default();
    assert!(persist_login(&FailingStorage, &config, "tok", None).is_err());
    assert_eq!(clear_session(&FailingStorage, &config), Err(StorageError::Unavailable));
}

#[test]
fn stale_admin_marker_that_cannot_be_cleared_blocks_token_write() {
    let store = StuckKey { inner: MemoryStorage::with_items([("role", "admin")]), key: "role" };
    let config = GuardConfig::default();

    assert!(persist_login(&store, &config, "tok", None).is_err());
    assert_eq!(store.get_item("jwt"), Ok(None));
    assert!(!StorageSessionReader::new(&store, &config).read().logged_in);
}

#[test]
fn failed_role_write_leaves_no_token() {
    let store = StuckKey { inner: MemoryStorage::new(), key: "role" };
    assert!(persist_login(&store, &GuardConfig::default(), "tok", Some("customer")).is_err());
    assert_eq!(store.get_item("jwt"), Ok(None));
}
