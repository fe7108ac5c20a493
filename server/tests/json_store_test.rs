use requestnonsense_server::models::request_entry::RequestEntry;
use requestnonsense_server::store::{JsonFileStore, QueueStore};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("queue.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("queue.json"));

        let first = vec![
            RequestEntry::new("a", "alice", 1.0),
            RequestEntry::new("b", "bob", 2.0),
        ];
        store.save(&first).unwrap();

        let second = vec![RequestEntry::new("c", "carol", 3.0).elevated().activated()];
        store.save(&second).unwrap();

        assert_eq!(store.load().unwrap(), second);
    }

    #[test]
    fn test_file_holds_entry_tuples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");
        let store = JsonFileStore::new(&path);

        store
            .save(&[RequestEntry::new("Band - Song", "alice", 1.0).elevated()])
            .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"[[true,false,1.0,"Band - Song","alice"]]"#);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("queue.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonFileStore::new(&path).load().is_err());
    }
}
