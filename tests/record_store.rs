use books_api::error::{AppError, ConfigError};
use books_api::{connect_in_memory, Book, Record, RecordStore};

books_api::record! {
    #[derive(Clone, Debug, Default, PartialEq)]
    pub struct ShelfItem {
        pub id: i64 => pk("id"),
        pub label: String => col("label"),
        pub position: i64 => col("position"),
        pub highlighted: bool => transient,
        pub tags: Vec<String> => transient,
    }
}

books_api::record! {
    #[derive(Clone, Debug, Default)]
    pub struct Measurement {
        pub id: i64 => pk("id"),
        pub value: f64 => col("value"),
    }
}

books_api::record! {
    #[derive(Clone, Debug, Default)]
    pub struct LogLine {
        pub text: String => col("text"),
    }
}

async fn store() -> RecordStore {
    let pool = connect_in_memory().await.unwrap();
    let store = RecordStore::new(pool);
    store.create_table::<Book>().await.unwrap();
    store
}

fn dune() -> Book {
    Book::new("Dune", "978-0441013593", "Herbert", 1965)
}

#[tokio::test]
async fn insert_assigns_key_and_round_trips() {
    let store = store().await;
    let mut book = dune();
    assert_eq!(book.id, 0);
    store.insert(&mut book).await.unwrap();
    assert_eq!(book.id, 1);

    let loaded = store.load_by_primary_key::<Book>(book.id).await.unwrap();
    assert_eq!(loaded, Some(book));
}

#[tokio::test]
async fn keys_are_assigned_in_sequence() {
    let store = store().await;
    let mut first = dune();
    let mut second = Book::new("Emma", "978-0141439587", "Austen", 1815);
    store.insert(&mut first).await.unwrap();
    store.insert(&mut second).await.unwrap();
    assert_eq!((first.id, second.id), (1, 2));

    let all = store.load_all::<Book>().await.unwrap();
    assert_eq!(all, vec![first, second]);
}

#[tokio::test]
async fn create_table_is_idempotent() {
    let store = store().await;
    let mut book = dune();
    store.insert(&mut book).await.unwrap();

    store.create_table::<Book>().await.unwrap();
    store.create_table::<Book>().await.unwrap();

    let all = store.load_all::<Book>().await.unwrap();
    assert_eq!(all, vec![book]);
}

#[tokio::test]
async fn update_then_load_reflects_new_values() {
    let store = store().await;
    let mut book = dune();
    store.insert(&mut book).await.unwrap();
    let id = book.id;

    book.title = "Dune (remastered)".into();
    book.publishing_year = 2005;
    store.update(&book).await.unwrap();

    let loaded = store.load_by_primary_key::<Book>(id).await.unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.title, "Dune (remastered)");
    assert_eq!(loaded.publishing_year, 2005);
    assert_eq!(loaded.author, "Herbert");
}

#[tokio::test]
async fn delete_then_load_is_absent() {
    let store = store().await;
    let mut book = dune();
    store.insert(&mut book).await.unwrap();

    store.delete(&book).await.unwrap();
    assert_eq!(store.load_by_primary_key::<Book>(book.id).await.unwrap(), None);

    let sentinel = store.load_by_primary_key_or_empty::<Book>(book.id).await.unwrap();
    assert!(sentinel.is_empty());
    assert_eq!(sentinel, Book::default());
}

#[tokio::test]
async fn missing_keys_are_not_errors() {
    let store = store().await;
    assert_eq!(store.load_by_primary_key::<Book>(42).await.unwrap(), None);

    let mut ghost = dune();
    ghost.id = 42;
    store.update(&ghost).await.unwrap();
    store.delete_by_primary_key::<Book>(42).await.unwrap();
    assert!(store.load_all::<Book>().await.unwrap().is_empty());
}

#[tokio::test]
async fn transient_fields_are_not_persisted() {
    let pool = connect_in_memory().await.unwrap();
    let store = RecordStore::new(pool.clone());
    store.create_table::<ShelfItem>().await.unwrap();

    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('shelfitem')")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(columns, ["id", "label", "position"]);

    let mut item = ShelfItem {
        label: "top".into(),
        position: 1,
        highlighted: true,
        tags: vec!["staff pick".into()],
        ..Default::default()
    };
    store.insert(&mut item).await.unwrap();
    item.highlighted = true;
    item.position = 2;
    store.update(&item).await.unwrap();

    let loaded = store.load_by_primary_key::<ShelfItem>(item.id).await.unwrap().unwrap();
    assert_eq!(loaded.position, 2);
    assert!(!loaded.highlighted);
    assert!(loaded.tags.is_empty());
}

#[tokio::test]
async fn rows_are_scanned_by_column_name() {
    let pool = connect_in_memory().await.unwrap();
    sqlx::query(
        "CREATE TABLE book (publishing_year INTEGER, author TEXT, isbn TEXT, title TEXT, id INTEGER PRIMARY KEY AUTOINCREMENT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    let store = RecordStore::new(pool);
    store.create_table::<Book>().await.unwrap();

    let mut book = dune();
    store.insert(&mut book).await.unwrap();
    let loaded = store.load_all::<Book>().await.unwrap();
    assert_eq!(loaded, vec![book]);
}

#[tokio::test]
async fn null_columns_load_as_zero_values() {
    let pool = connect_in_memory().await.unwrap();
    let store = RecordStore::new(pool.clone());
    store.create_table::<Book>().await.unwrap();
    sqlx::query("INSERT INTO book (title) VALUES ('Untitled')")
        .execute(&pool)
        .await
        .unwrap();

    let book = store.load_by_primary_key::<Book>(1).await.unwrap().unwrap();
    assert_eq!(book.title, "Untitled");
    assert_eq!(book.author, "");
    assert_eq!(book.publishing_year, 0);
}

#[tokio::test]
async fn unsupported_column_type_fails_at_table_creation() {
    let store = store().await;
    let err = store.create_table::<Measurement>().await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Config(ConfigError::UnsupportedType { field: "value", .. })
    ));
}

#[tokio::test]
async fn keyless_type_cannot_be_inserted_or_looked_up() {
    let store = store().await;
    store.create_table::<LogLine>().await.unwrap();

    let mut line = LogLine { text: "hello".into() };
    let err = store.insert(&mut line).await.unwrap_err();
    assert!(matches!(err, AppError::Config(ConfigError::MissingPrimaryKey("LogLine"))));

    let err = store.load_by_primary_key::<LogLine>(1).await.unwrap_err();
    assert!(matches!(err, AppError::Config(ConfigError::MissingPrimaryKey(_))));
}
