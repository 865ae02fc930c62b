use blog_core::db::migrations::latest_version;
use blog_core::db::open_db_in_memory;
use blog_core::{
    Author, AuthorListQuery, AuthorRepository, AuthorService, RepoError, SqliteAuthorRepository,
    ValidationError,
};
use rusqlite::Connection;

fn validation_error(err: RepoError) -> ValidationError {
    match err {
        RepoError::Validation(err) => err,
        other => panic!("expected validation error, got: {other}"),
    }
}

#[test]
fn create_author_assigns_id_and_created_at() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let author = service
        .create_author("Jane Doe", Some("5551234567".to_string()))
        .unwrap();

    assert!(author.id().is_some());
    assert_eq!(author.name(), "Jane Doe");
    assert_eq!(author.phone_number(), Some("5551234567"));
    assert!(author.created_at().unwrap() > 0);
    assert_eq!(author.updated_at(), None);
}

#[test]
fn second_author_with_same_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    service
        .create_author("Jane Doe", Some("5551234567".to_string()))
        .unwrap();
    let err = service
        .create_author("Jane Doe", Some("5559876543".to_string()))
        .unwrap_err();

    let err = validation_error(err);
    assert_eq!(err, ValidationError::DuplicateName);
    assert_eq!(err.to_string(), "Duplicate name.");

    let all = service.list_authors(&AuthorListQuery::default()).unwrap();
    assert_eq!(all.len(), 1);
}

#[test]
fn name_uniqueness_is_case_sensitive() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    service.create_author("Jane Doe", None).unwrap();
    service.create_author("jane doe", None).unwrap();
}

#[test]
fn create_rejects_empty_name_and_bad_phone_numbers() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let err = validation_error(service.create_author("", None).unwrap_err());
    assert_eq!(err.to_string(), "Name cannot be empty.");

    let err = validation_error(
        service
            .create_author("A", Some("555123456x".to_string()))
            .unwrap_err(),
    );
    assert_eq!(err.to_string(), "Phone number must contain only numbers.");

    let err = validation_error(
        service
            .create_author("A", Some("55512345678".to_string()))
            .unwrap_err(),
    );
    assert_eq!(err.to_string(), "Phone number must be exactly 10 digits.");

    assert!(service.list_authors(&AuthorListQuery::default()).unwrap().is_empty());
}

#[test]
fn rename_to_another_authors_name_fails_and_keeps_row() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    service.create_author("Jane Doe", None).unwrap();
    let john = service.create_author("John Roe", None).unwrap();
    let john_id = john.id().unwrap();

    let err = validation_error(service.set_name(john_id, "Jane Doe").unwrap_err());
    assert_eq!(err, ValidationError::DuplicateName);

    let stored = service.get_author(john_id).unwrap().unwrap();
    assert_eq!(stored.name(), "John Roe");
}

#[test]
fn successful_mutation_refreshes_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let author = service.create_author("Jane Doe", None).unwrap();
    let id = author.id().unwrap();

    let renamed = service.set_name(id, "Jane Smith").unwrap();
    assert_eq!(renamed.name(), "Jane Smith");
    assert!(renamed.updated_at().is_some());
    assert_eq!(renamed.created_at(), author.created_at());

    let numbered = service
        .set_phone_number(id, Some("0123456789".to_string()))
        .unwrap();
    assert_eq!(numbered.phone_number(), Some("0123456789"));

    let cleared = service.set_phone_number(id, None).unwrap();
    assert_eq!(cleared.phone_number(), None);
}

#[test]
fn find_by_name_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let id = repo
        .create_author(&Author::new("Jane Doe", None).unwrap())
        .unwrap();
    let found = repo.find_author_by_name("Jane Doe").unwrap().unwrap();
    assert_eq!(found.id(), Some(id));
    assert!(repo.find_author_by_name("Jane").unwrap().is_none());

    repo.delete_author(id).unwrap();
    assert!(repo.get_author(id).unwrap().is_none());

    let err = repo.delete_author(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "author", id: missing } if missing == id));
}

#[test]
fn repository_unique_index_reports_duplicate_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let author = Author::new("Jane Doe", None).unwrap();
    repo.create_author(&author).unwrap();

    let err = repo.create_author(&author).unwrap_err();
    assert_eq!(validation_error(err), ValidationError::DuplicateName);
}

#[test]
fn update_requires_persisted_author() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let err = repo
        .update_author(&Author::new("Jane Doe", None).unwrap())
        .unwrap_err();
    assert!(matches!(err, RepoError::NotPersisted("author")));
}

#[test]
fn list_pagination_is_ordered_by_id() {
    let conn = open_db_in_memory().unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    for name in ["a", "b", "c"] {
        service.create_author(name, None).unwrap();
    }

    let page = service
        .list_authors(&AuthorListQuery {
            limit: Some(2),
            offset: 1,
        })
        .unwrap();
    let names: Vec<_> = page.iter().map(Author::name).collect();
    assert_eq!(names, ["b", "c"]);

    let tail = service
        .list_authors(&AuthorListQuery {
            limit: None,
            offset: 2,
        })
        .unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].name(), "c");
}

#[test]
fn read_path_rejects_invalid_persisted_phone_number() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Jane Doe', '12');",
        [],
    )
    .unwrap();
    let repo = SqliteAuthorRepository::try_new(&conn).unwrap();

    let err = repo.find_author_by_name("Jane Doe").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn name_held_by_invalid_stored_row_is_still_a_duplicate() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO authors (name, phone_number) VALUES ('Jane Doe', '12');",
        [],
    )
    .unwrap();
    let service = AuthorService::new(SqliteAuthorRepository::try_new(&conn).unwrap());

    let err = service.create_author("Jane Doe", None).unwrap_err();
    assert_eq!(validation_error(err), ValidationError::DuplicateName);

    let other = service.create_author("John Roe", None).unwrap();
    let err = service.set_name(other.id().unwrap(), "Jane Doe").unwrap_err();
    assert_eq!(validation_error(err), ValidationError::DuplicateName);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteAuthorRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_missing_authors_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE authors (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAuthorRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "authors",
            column: "phone_number"
        })
    ));
}

#[test]
fn repository_rejects_connection_without_authors_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAuthorRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("authors"))));
}
