use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::CopyQuery;
use kernel::interface::update::CopyModifier;
use kernel::prelude::entity::{BookCopy, BookId, CopyId, IsAvailable};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresCopyRepository;

#[async_trait::async_trait]
impl CopyQuery for PostgresCopyRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        PgCopyInternal::find_by_id(con, id).await
    }

    async fn lock_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        PgCopyInternal::lock_by_id(con, id).await
    }

    async fn find_by_book_id(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        PgCopyInternal::find_by_book_id(con, book_id).await
    }
}

#[async_trait::async_trait]
impl CopyModifier for PostgresCopyRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        PgCopyInternal::create(con, copy).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        PgCopyInternal::update(con, copy).await
    }
}

#[derive(sqlx::FromRow)]
struct CopyRow {
    id: Uuid,
    book_id: Uuid,
    available: bool,
}

impl From<CopyRow> for BookCopy {
    fn from(value: CopyRow) -> Self {
        BookCopy::new(
            CopyId::new(value.id),
            BookId::new(value.book_id),
            IsAvailable::new(value.available),
        )
    }
}

pub(in crate::database) struct PgCopyInternal;

impl PgCopyInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        let row = sqlx::query_as::<_, CopyRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, available
            FROM copies
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(BookCopy::from))
    }

    async fn lock_by_id(
        con: &mut PgConnection,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        let row = sqlx::query_as::<_, CopyRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, available
            FROM copies
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(BookCopy::from))
    }

    async fn find_by_book_id(
        con: &mut PgConnection,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        let rows = sqlx::query_as::<_, CopyRow>(
            // language=postgresql
            r#"
            SELECT id, book_id, available
            FROM copies
            WHERE book_id = $1
            ORDER BY id
            "#,
        )
        .bind(book_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(BookCopy::from).collect())
    }

    async fn create(con: &mut PgConnection, copy: &BookCopy) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO copies (id, book_id, available)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(copy.id().as_ref())
        .bind(copy.book_id().as_ref())
        .bind(copy.available().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, copy: &BookCopy) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE copies
            SET available = $2
            WHERE id = $1
            "#,
        )
        .bind(copy.id().as_ref())
        .bind(copy.available().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::{BookQuery, CopyQuery};
    use kernel::interface::update::{BookModifier, CopyModifier};
    use kernel::prelude::entity::{BookCopy, BookId, CopyId, IsAvailable};
    use kernel::KernelError;

    use crate::database::postgres::book::test::book;
    use crate::database::postgres::{
        PostgresBookRepository, PostgresCopyRepository, PostgresDatabase,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let book_id = BookId::new(Uuid::new_v4());
        PostgresBookRepository
            .create(&mut con, &book(&book_id))
            .await?;

        let id = CopyId::new(Uuid::new_v4());
        let mut copy = BookCopy::new(id.clone(), book_id.clone(), IsAvailable::default());
        PostgresCopyRepository.create(&mut con, &copy).await?;

        let found = PostgresCopyRepository.lock_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(copy.clone()));

        copy.check_out();
        PostgresCopyRepository.update(&mut con, &copy).await?;
        let found = PostgresCopyRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(copy.clone()));

        let copies = PostgresCopyRepository
            .find_by_book_id(&mut con, &book_id)
            .await?;
        assert_eq!(copies, vec![copy]);

        PostgresBookRepository.delete(&mut con, &book_id).await?;
        assert!(PostgresBookRepository
            .find_by_id(&mut con, &book_id)
            .await?
            .is_none());
        let found = PostgresCopyRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        con.roll_back().await
    }
}
