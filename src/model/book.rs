use crate::record;
use serde::{Deserialize, Serialize};

record! {
    /// A book. `id` is 0 until the first successful insert assigns it.
    #[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Book {
        pub id: i64 => pk("id"),
        pub title: String => col("title"),
        pub isbn: String => col("isbn"),
        pub author: String => col("author"),
        #[serde(rename = "publishingYear")]
        pub publishing_year: i64 => col("publishing_year"),
    }
}

impl Book {
    pub fn new(title: &str, isbn: &str, author: &str, publishing_year: i64) -> Self {
        Book {
            id: 0,
            title: title.to_string(),
            isbn: isbn.to_string(),
            author: author.to_string(),
            publishing_year,
        }
    }

    /// Copies every non-key field from `other`; `self.id` is kept.
    pub fn update_fields(&mut self, other: Book) {
        self.title = other.title;
        self.isbn = other.isbn;
        self.author = other.author;
        self.publishing_year = other.publishing_year;
    }
}
