use booking::Session;
use booking::model::AuthResponse;

use super::*;

fn scratch(name: &str) -> FileStore {
    let path = std::env::temp_dir().join(format!("hotel-cli-{}-{name}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    FileStore::new(path)
}

#[test]
fn missing_file_reads_empty() {
    let store = scratch("missing");
    assert_eq!(store.get("token"), None);
}

#[test]
fn values_survive_a_new_handle() {
    let store = scratch("reopen");
    store.set("token", "abc");
    let reopened = FileStore::new(store.path());
    assert_eq!(reopened.get("token").as_deref(), Some("abc"));
    store.remove("token");
    assert!(!store.path().exists());
}

#[test]
fn malformed_file_reads_empty() {
    let store = scratch("malformed");
    fs::write(store.path(), "not json").unwrap();
    assert_eq!(store.get("token"), None);
    let _ = fs::remove_file(store.path());
}

#[test]
fn session_round_trips_through_the_file() {
    let store = scratch("session");
    let mut session = Session::default();
    session.login(
        &store,
        AuthResponse { token: "tok".to_owned(), name: Some("Ana".to_owned()), role: Some("ADMIN".to_owned()) },
    );
    let restored = Session::load(&store);
    assert_eq!(restored.token(), Some("tok"));
    assert_eq!(restored.role(), Some(booking::Role::Admin));
    session.logout(&store);
    assert_eq!(Session::load(&store).token(), None);
}
