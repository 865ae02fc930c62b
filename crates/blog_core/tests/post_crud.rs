use blog_core::db::open_db_in_memory;
use blog_core::{
    Category, NewPost, PostListQuery, PostRepository, PostService, RepoError, SqlitePostRepository,
    ValidationError,
};

fn long_content() -> String {
    "x".repeat(300)
}

fn new_post(title: &str, category: Option<&str>) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: Some(long_content()),
        summary: Some("short summary".to_string()),
        category: category.map(str::to_string),
    }
}

#[test]
fn create_post_roundtrips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let post = service
        .create_post(&new_post("Top 10 Secrets", Some("Non-Fiction")))
        .unwrap();

    let id = post.id().unwrap();
    let loaded = service.get_post(id).unwrap().unwrap();
    assert_eq!(loaded, post);
    assert_eq!(loaded.title(), "Top 10 Secrets");
    assert_eq!(loaded.content().map(str::len), Some(300));
    assert_eq!(loaded.summary(), Some("short summary"));
    assert_eq!(loaded.category(), Some(Category::NonFiction));
    assert!(loaded.created_at().is_some());
    assert_eq!(loaded.updated_at(), None);
}

#[test]
fn create_stops_at_first_invalid_field() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let request = NewPost {
        title: "hello world".to_string(),
        content: Some("too short".to_string()),
        summary: None,
        category: Some("Drama".to_string()),
    };
    let err = service.create_post(&request).unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::TitleMissingClickbait)
    );

    let request = NewPost {
        title: "Guess what".to_string(),
        ..request
    };
    let err = service.create_post(&request).unwrap_err();
    assert_eq!(
        err.as_validation(),
        Some(&ValidationError::ContentTooShort { actual: 9 })
    );

    assert!(service
        .list_posts(&PostListQuery::default())
        .unwrap()
        .is_empty());
}

#[test]
fn title_only_post_is_accepted() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    let post = service
        .create_post(&NewPost {
            title: "You Won't Believe This".to_string(),
            ..NewPost::default()
        })
        .unwrap();
    assert_eq!(post.content(), None);
    assert_eq!(post.category(), None);
}

#[test]
fn field_updates_validate_and_refresh_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());
    let id = service
        .create_post(&new_post("Top picks", Some("Fiction")))
        .unwrap()
        .id()
        .unwrap();

    let err = service.set_category(id, Some("Drama")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Category must be one of ['Fiction', 'Non-Fiction']"
    );
    let err = service.set_summary(id, Some("s".repeat(251))).unwrap_err();
    assert_eq!(err.to_string(), "Summary must be 250 characters or less.");
    let err = service.set_title(id, "plain title").unwrap_err();
    assert_eq!(err.as_validation(), Some(&ValidationError::TitleMissingClickbait));

    let unchanged = service.get_post(id).unwrap().unwrap();
    assert_eq!(unchanged.title(), "Top picks");
    assert_eq!(unchanged.category(), Some(Category::Fiction));
    assert_eq!(unchanged.updated_at(), None);

    let updated = service.set_title(id, "The secret life of crabs").unwrap();
    assert_eq!(updated.title(), "The secret life of crabs");
    assert!(updated.updated_at().is_some());

    let updated = service.set_summary(id, Some("s".repeat(250))).unwrap();
    assert_eq!(updated.summary().map(str::len), Some(250));

    let updated = service.set_content(id, None).unwrap();
    assert_eq!(updated.content(), None);

    let updated = service.set_category(id, Some("Non-Fiction")).unwrap();
    assert_eq!(updated.category(), Some(Category::NonFiction));
}

#[test]
fn list_filters_by_category() {
    let conn = open_db_in_memory().unwrap();
    let service = PostService::new(SqlitePostRepository::try_new(&conn).unwrap());

    service.create_post(&new_post("Top one", Some("Fiction"))).unwrap();
    let second = service
        .create_post(&new_post("Top two", Some("Non-Fiction")))
        .unwrap();
    service.create_post(&new_post("Top three", None)).unwrap();

    let result = service
        .list_posts(&PostListQuery {
            category: Some(Category::NonFiction),
            ..PostListQuery::default()
        })
        .unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id(), second.id());

    let page = service
        .list_posts(&PostListQuery {
            limit: Some(1),
            offset: 2,
            ..PostListQuery::default()
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].title(), "Top three");
}

#[test]
fn delete_removes_post() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();
    let service = PostService::new(repo);

    let id = service
        .create_post(&new_post("Guess who", None))
        .unwrap()
        .id()
        .unwrap();
    service.delete_post(id).unwrap();
    assert!(service.get_post(id).unwrap().is_none());

    let err = service.set_title(id, "Top again").unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "post", .. }));
}

#[test]
fn read_path_rejects_unknown_category() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO posts (title, category) VALUES ('Top story', 'Drama');",
        [],
    )
    .unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let err = repo.list_posts(&PostListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}
