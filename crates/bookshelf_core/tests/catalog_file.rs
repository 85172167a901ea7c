use bookshelf_core::{
    Book, BookStatus, BookStorage, JsonBookFile, Library, LibraryConfig, MemoryReporter,
    RepoError, Timestamp, UNASSIGNED_ID,
};
use log::Level;
use std::fs;

#[test]
fn save_then_load_roundtrip_preserves_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let file = JsonBookFile::new(dir.path().join("library.json"));

    let mut lent = Book::new(1, "Мастер и Маргарита", "Михаил Булгаков", 1967);
    lent.status = BookStatus::CheckedOut;
    let mut gone = Book::new(2, "Dune", "Frank Herbert", 1965);
    gone.mark_deleted(Timestamp::parse("2024-March-05 09:30").unwrap());
    let books = vec![lent, gone];

    file.save(&books).unwrap();
    let loaded = file.load().unwrap();

    // Timestamps round-trip along with the descriptive fields.
    assert_eq!(loaded, books);
}

#[test]
fn saved_file_is_pretty_and_keeps_non_ascii_unescaped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("library.json");
    let file = JsonBookFile::new(&path);

    file.save(&[Book::new(1, "Война и мир", "Лев Толстой", 1869)])
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("Война и мир"));
    assert!(!text.contains("\\u"));
    assert!(text.contains("\n        \"id\": 1,"));
    for key in ["id", "title", "author", "year", "status", "created_at", "deleted_at"] {
        assert!(text.contains(&format!("\"{key}\"")), "missing key {key}");
    }
}

#[test]
fn load_distinguishes_missing_from_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let file = JsonBookFile::new(&path);

    assert!(matches!(file.load().unwrap_err(), RepoError::Missing(_)));

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        file.load().unwrap_err(),
        RepoError::Malformed { .. }
    ));

    fs::write(&path, "  \n").unwrap();
    assert!(matches!(
        file.load().unwrap_err(),
        RepoError::Malformed { .. }
    ));
}

#[test]
fn load_rejects_missing_keys_and_duplicates_but_keeps_null_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    let file = JsonBookFile::new(&path);

    fs::write(&path, r#"[{"id": 1, "title": "A", "author": "X", "year": 2000}]"#).unwrap();
    assert!(matches!(file.load().unwrap_err(), RepoError::Malformed { .. }));

    fs::write(
        &path,
        r#"[
            {"id": null, "title": "A", "author": "X", "year": 2000, "status": "available"},
            {"id": null, "title": "B", "author": "Y", "year": 2001, "status": "available"}
        ]"#,
    )
    .unwrap();
    let books = file.load().unwrap();
    assert!(books.iter().all(|book| book.id == UNASSIGNED_ID));

    fs::write(
        &path,
        r#"[
            {"id": 1, "title": "A", "author": "X", "year": 2000, "status": "available"},
            {"id": 1, "title": "B", "author": "Y", "year": 2001, "status": "available"}
        ]"#,
    )
    .unwrap();
    let err = file.load().unwrap_err();
    assert!(err.to_string().contains("duplicate book id 1"), "{err}");
}

#[test]
fn legacy_records_without_timestamps_and_old_status_names_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.json");
    fs::write(
        &path,
        r#"[
            {"id": 1, "title": "A", "author": "X", "year": 2000, "status": "в наличии"},
            {"id": 2, "title": "B", "author": "Y", "year": 2001, "status": "выдана",
             "created_at": "2023-December-31 23:59", "deleted_at": null}
        ]"#,
    )
    .unwrap();

    let books = JsonBookFile::new(&path).load().unwrap();

    assert_eq!(books[0].status, BookStatus::Available);
    assert_eq!(books[1].status, BookStatus::CheckedOut);
    assert_eq!(books[1].created_at.to_string(), "2023-December-31 23:59");
    assert!(books.iter().all(Book::is_active));
}

#[test]
fn library_recovers_from_corrupt_catalog_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(&config.library_file, "[{\"id\": 1,").unwrap();

    let mut library = Library::open(&config, MemoryReporter::new());

    assert!(library.is_empty());
    assert!(library
        .reporter()
        .entries()
        .iter()
        .any(|(level, message)| *level == Level::Warn && message.contains("starting empty")));
    assert_eq!(library.add("Fresh", "Start", 2024).unwrap(), 1);
}

#[test]
fn reload_restores_books_timestamps_and_deleted_sequence() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());

    let (records, deleted) = {
        let mut library = Library::open(&config, MemoryReporter::new());
        library.add("A", "X", 2000).unwrap();
        library.add("B", "Y", 2001).unwrap();
        library.add("C", "Z", 2002).unwrap();
        library.set_status(3, BookStatus::CheckedOut).unwrap();
        library.remove(1).unwrap();
        (
            library.records().to_vec(),
            library.deleted_records().to_vec(),
        )
    };

    let mut reopened = Library::open(&config, MemoryReporter::new());

    assert_eq!(reopened.records(), records.as_slice());
    // Deletion state survives a reload instead of being reset.
    assert_eq!(reopened.deleted_records(), deleted.as_slice());
    assert!(reopened.find_by_id(1).is_none());
    assert_eq!(reopened.find_by_id(3).unwrap().status, BookStatus::CheckedOut);
    assert_eq!(reopened.add("D", "W", 2003).unwrap(), 4);

    reopened.remove(2).unwrap();
    let deleted_file = JsonBookFile::new(&config.deleted_file).load().unwrap();
    let ids: Vec<_> = deleted_file.iter().map(|book| book.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn lookup_uses_ids_not_positions() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(
        &config.library_file,
        r#"[
            {"id": 7, "title": "Seven", "author": "X", "year": 2000, "status": "available"},
            {"id": 2, "title": "Two", "author": "Y", "year": 2001, "status": "available"}
        ]"#,
    )
    .unwrap();

    let mut library = Library::open(&config, MemoryReporter::new());

    assert_eq!(library.find_by_id(7).unwrap().title, "Seven");
    assert_eq!(library.find_by_id(2).unwrap().title, "Two");
    assert!(library.find_by_id(1).is_none());
    assert_eq!(library.next_id(), 8);

    assert!(library.remove(2).unwrap());
    assert_eq!(library.records()[1].title, "Two");
    assert!(library.records()[1].is_deleted());
    assert!(library.records()[0].is_active());
}

#[test]
fn null_ids_get_fresh_ids_and_survive_the_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    fs::write(
        &config.library_file,
        r#"[
            {"id": 1, "title": "One", "author": "X", "year": 2000, "status": "available"},
            {"id": null, "title": "Nameless", "author": "Y", "year": 2001, "status": "available"},
            {"id": 2, "title": "Two", "author": "Z", "year": 2002, "status": "available"}
        ]"#,
    )
    .unwrap();

    let mut library = Library::open(&config, MemoryReporter::new());

    assert_eq!(library.len(), 3);
    assert_eq!(library.find_by_id(3).unwrap().title, "Nameless");
    assert_eq!(
        library.reporter().take_messages(),
        vec!["Book 'Nameless' had no id; assigned id 3."]
    );
    assert_eq!(library.add("Four", "W", 2003).unwrap(), 4);

    let saved = JsonBookFile::new(&config.library_file).load().unwrap();
    let rows: Vec<_> = saved
        .iter()
        .map(|book| (book.id, book.title.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![(1, "One"), (3, "Nameless"), (2, "Two"), (4, "Four")]
    );
}

#[test]
fn unreadable_catalog_is_backed_up_before_the_next_save() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::in_dir(dir.path());
    let original = r#"[{"id": 1, "title": "Kept", "author": "X", "year": 2000}]"#;
    fs::write(&config.library_file, original).unwrap();

    let mut library = Library::open(&config, MemoryReporter::new());
    library.add("Fresh", "Start", 2024).unwrap();

    let backups: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("library.json.bak-"))
        })
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(fs::read_to_string(&backups[0]).unwrap(), original);

    let messages = library.reporter().take_messages();
    assert!(messages
        .iter()
        .any(|message| message.starts_with("Unreadable catalog kept at ")));
    assert_eq!(JsonBookFile::new(&config.library_file).load().unwrap().len(), 1);
}
