use crate::domain::{Book, BookId, BorrowingRecord, BorrowingRecordId, NewBorrowingRecord, PatronId};
use crate::ports::borrowing_record_repository::{
    BorrowingRecordRepository as BorrowingRecordRepositoryTrait, Result,
};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{PgPool, Row, postgres::PgRow};

fn map_row_to_borrowing_record(row: &PgRow) -> Result<BorrowingRecord> {
    Ok(BorrowingRecord {
        id: BorrowingRecordId::new(row.try_get("id")?),
        book_id: BookId::new(row.try_get("book_id")?),
        patron_id: PatronId::new(row.try_get("patron_id")?),
        borrowing_date: row.try_get("borrowing_date")?,
        return_date: row.try_get("return_date")?,
    })
}

/// PostgreSQL implementation of BorrowingRecordRepository
///
/// Borrow and return commits run in one transaction each. The book flag is
/// changed with a conditional UPDATE, so a request that lost a race writes
/// nothing and rolls back.
pub struct BorrowingRecordRepository {
    pool: PgPool,
}

impl BorrowingRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BorrowingRecordRepositoryTrait for BorrowingRecordRepository {
    async fn find_all(&self) -> Result<Vec<BorrowingRecord>> {
        let mut rows = sqlx::query(
            r#"
            SELECT id, book_id, patron_id, borrowing_date, return_date
            FROM borrowing_records
            ORDER BY id
            "#,
        )
        .fetch(&self.pool);

        let mut records = Vec::new();
        while let Some(row) = rows.try_next().await? {
            records.push(map_row_to_borrowing_record(&row)?);
        }
        Ok(records)
    }

    async fn exists_by_book_id(&self, book_id: BookId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrowing_records WHERE book_id = $1)",
        )
        .bind(book_id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_patron_id(&self, patron_id: PatronId) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrowing_records WHERE patron_id = $1)",
        )
        .bind(patron_id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn find_latest_open(
        &self,
        book_id: BookId,
        patron_id: PatronId,
    ) -> Result<Option<BorrowingRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, book_id, patron_id, borrowing_date, return_date
            FROM borrowing_records
            WHERE book_id = $1 AND patron_id = $2 AND return_date IS NULL
            ORDER BY borrowing_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(book_id.value())
        .bind(patron_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_borrowing_record).transpose()
    }

    async fn commit_borrow(
        &self,
        book: &Book,
        record: NewBorrowingRecord,
    ) -> Result<Option<BorrowingRecord>> {
        let mut tx = self.pool.begin().await?;

        let flipped = sqlx::query(
            r#"
            UPDATE books SET borrowed = TRUE
            WHERE id = $1 AND borrowed = FALSE
            "#,
        )
        .bind(book.id.value())
        .execute(&mut *tx)
        .await?;
        if flipped.rows_affected() == 0 {
            // dropping the transaction rolls it back
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            INSERT INTO borrowing_records (book_id, patron_id, borrowing_date, return_date)
            VALUES ($1, $2, $3, NULL)
            RETURNING id, book_id, patron_id, borrowing_date, return_date
            "#,
        )
        .bind(record.book_id.value())
        .bind(record.patron_id.value())
        .bind(record.borrowing_date)
        .fetch_one(&mut *tx)
        .await?;
        let record = map_row_to_borrowing_record(&row)?;

        tx.commit().await?;
        Ok(Some(record))
    }

    async fn commit_return(
        &self,
        book: &Book,
        record: &BorrowingRecord,
    ) -> Result<Option<BorrowingRecord>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE borrowing_records
            SET return_date = $2
            WHERE id = $1 AND return_date IS NULL
            RETURNING id, book_id, patron_id, borrowing_date, return_date
            "#,
        )
        .bind(record.id.value())
        .bind(record.return_date)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let closed = map_row_to_borrowing_record(&row)?;

        let flipped = sqlx::query(
            r#"
            UPDATE books SET borrowed = FALSE
            WHERE id = $1 AND borrowed = TRUE
            "#,
        )
        .bind(book.id.value())
        .execute(&mut *tx)
        .await?;
        if flipped.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(closed))
    }
}
