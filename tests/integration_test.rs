use std::fs;

use scriptkeeper::config::Config;
use scriptkeeper::history::NO_MESSAGE;
use scriptkeeper::{FileStore, Outcome, Session, StoreError};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> FileStore {
    FileStore::from_config(&Config::with_root(dir.path()))
}

#[test]
fn two_saves_of_same_file_are_both_recorded() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store.save(Some("print('hi')"), "a.py", "first").unwrap();
    store.save(Some("print('bye')"), "a.py", "second").unwrap();

    let history = store.list_history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].update_message, "first");
    assert_eq!(history[0].file_size, 11);
    assert_eq!(history[1].update_message, "second");
    assert_eq!(history[1].file_size, 12);
    assert!(history.iter().all(|e| e.filename == "a.py"));
    assert!(history[0].recorded_time().is_some());
    assert!(history[0].timestamp <= history[1].timestamp);
}

#[test]
fn n_saves_append_n_entries_in_order() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    for i in 0..5 {
        store
            .save(Some("x".repeat(i).as_str()), &format!("f{i}.py"), &format!("rev {i}"))
            .unwrap();
    }

    let history = store.list_history().unwrap();
    let messages: Vec<_> = history.iter().map(|e| e.update_message.as_str()).collect();
    assert_eq!(messages, ["rev 0", "rev 1", "rev 2", "rev 3", "rev 4"]);
    let sizes: Vec<_> = history.iter().map(|e| e.file_size).collect();
    assert_eq!(sizes, [0, 1, 2, 3, 4]);
}

#[test]
fn history_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    store_in(&dir).save(Some("a"), "a.py", "").unwrap();

    let reopened = store_in(&dir);
    reopened.save(Some("b"), "b.py", "kept").unwrap();

    let history = reopened.list_history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].update_message, NO_MESSAGE);
    assert_eq!(history[1].update_message, "kept");
}

#[test]
fn absent_content_appends_nothing() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(Some("a"), "a.py", "").unwrap();

    let outcome = Outcome::from_save(store.save(None, "a.py", "oops"));
    assert!(!outcome.ok);
    assert_eq!(store.list_history().unwrap().len(), 1);
}

#[test]
fn clear_then_list_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.save(Some("a"), "a.py", "").unwrap();

    store.clear_history().unwrap();
    assert!(store.list_history().unwrap().is_empty());
    assert!(!store.history_path().exists());
}

#[test]
fn corrupt_log_policy_follows_config() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::with_root(dir.path());
    fs::write(config.history_path(), "not json at all").unwrap();

    let lenient = FileStore::from_config(&config);
    assert!(lenient.list_history().unwrap().is_empty());

    config.strict_history = true;
    let strict = FileStore::from_config(&config);
    assert!(matches!(strict.list_history(), Err(StoreError::CorruptLog { .. })));
}

#[test]
fn session_edit_save_and_browse() {
    let dir = TempDir::new().unwrap();
    let mut session = Session::open(store_in(&dir), "handler.py").unwrap();

    session.edit("def handler():\n    pass\n");
    assert!(session.save("handler.py", "add handler").ok);
    session.create("util.py").unwrap();

    assert_eq!(session.store().list_scripts().unwrap(), vec!["handler.py", "util.py"]);
    assert_eq!(session.selected_file, "util.py");
    assert_eq!(session.stats().unwrap().total_updates, 1);
}
