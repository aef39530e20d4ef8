use crate::domain::{Book, BookId, NewBook};
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{PgPool, Row, postgres::PgRow};

/// Maps a `books` row to a Book
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: BookId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        publication_year: row.try_get("publication_year")?,
        isbn: row.try_get("isbn")?,
        borrowed: row.try_get("borrowed")?,
    })
}

/// PostgreSQL implementation of BookRepository
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepositoryTrait for BookRepository {
    async fn find_all(&self) -> Result<Vec<Book>> {
        let mut rows = sqlx::query(
            r#"
            SELECT id, title, author, publication_year, isbn, borrowed
            FROM books
            ORDER BY id
            "#,
        )
        .fetch(&self.pool);

        let mut books = Vec::new();
        while let Some(row) = rows.try_next().await? {
            books.push(map_row_to_book(&row)?);
        }
        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, author, publication_year, isbn, borrowed
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn exists_by_id(&self, id: BookId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, book: NewBook) -> Result<Book> {
        let row = sqlx::query(
            r#"
            INSERT INTO books (title, author, publication_year, isbn, borrowed)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, title, author, publication_year, isbn, borrowed
            "#,
        )
        .bind(book.title())
        .bind(book.author())
        .bind(book.publication_year())
        .bind(book.isbn())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_book(&row)
    }

    /// `borrowed` is left alone so a concurrent borrow is never overwritten.
    async fn update(&self, id: BookId, details: &NewBook) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, publication_year = $4, isbn = $5
            WHERE id = $1
            RETURNING id, title, author, publication_year, isbn, borrowed
            "#,
        )
        .bind(id.value())
        .bind(details.title())
        .bind(details.author())
        .bind(details.publication_year())
        .bind(details.isbn())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn delete_by_id(&self, id: BookId) -> Result<bool> {
        let done = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }
}
