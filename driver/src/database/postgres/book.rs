use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{
    Book, BookAmount, BookAuthor, BookId, BookInfo, BookLocation, BookPublisher, BookSubject,
    BookTitle, Isbn,
};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;
    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::find_by_id(con, id).await
    }

    async fn lock_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        PgBookInternal::lock_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::update(con, book).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::delete(con, book_id).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    title: String,
    author: String,
    publisher: String,
    subject: String,
    isbn: String,
    info: String,
    location: String,
    amount: i32,
}

impl From<BookRow> for Book {
    fn from(value: BookRow) -> Self {
        Book::new(
            BookId::new(value.id),
            BookTitle::new(value.title),
            BookAuthor::new(value.author),
            BookPublisher::new(value.publisher),
            BookSubject::new(value.subject),
            Isbn::new(value.isbn),
            BookInfo::new(value.info),
            BookLocation::new(value.location),
            BookAmount::new(value.amount),
        )
    }
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, publisher, subject, isbn, info, location, amount
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn lock_by_id(
        con: &mut PgConnection,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        let row = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, title, author, publisher, subject, isbn, info, location, amount
            FROM books
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Book::from))
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, publisher, subject, isbn, info, location, amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.publisher().as_ref())
        .bind(book.subject().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.info().as_ref())
        .bind(book.location().as_ref())
        .bind(book.amount().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE books
            SET title = $2, author = $3, publisher = $4, subject = $5,
                isbn = $6, info = $7, location = $8, amount = $9
            WHERE id = $1
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.title().as_ref())
        .bind(book.author().as_ref())
        .bind(book.publisher().as_ref())
        .bind(book.subject().as_ref())
        .bind(book.isbn().as_ref())
        .bind(book.info().as_ref())
        .bind(book.location().as_ref())
        .bind(book.amount().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    // copies and their rents go with the book through ON DELETE CASCADE
    async fn delete(con: &mut PgConnection, book_id: &BookId) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = $1
            "#,
        )
        .bind(book_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
pub(in crate::database) mod test {
    use std::time::Duration;

    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::BookQuery;
    use kernel::interface::update::BookModifier;
    use kernel::prelude::entity::{
        Book, BookAmount, BookAuthor, BookId, BookInfo, BookLocation, BookPublisher, BookSubject,
        BookTitle, Isbn,
    };
    use kernel::KernelError;

    use crate::database::postgres::{PostgresBookRepository, PostgresDatabase};

    pub fn book(id: &BookId) -> Book {
        Book::new(
            id.clone(),
            BookTitle::new("test"),
            BookAuthor::new("author"),
            BookPublisher::new("publisher"),
            BookSubject::new("subject"),
            Isbn::new(Uuid::new_v4().to_string()),
            BookInfo::new("info"),
            BookLocation::new("A-1-1"),
            BookAmount::new(0),
        )
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;
        let id = BookId::new(Uuid::new_v4());

        let book = book(&id);
        PostgresBookRepository.create(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let mut book = book;
        book.substitute(|b| {
            *b.title = BookTitle::new("test2");
            *b.amount = BookAmount::new(3);
        });
        PostgresBookRepository.update(&mut con, &book).await?;

        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert_eq!(found, Some(book.clone()));

        let locked = PostgresBookRepository.lock_by_id(&mut con, &id).await?;
        assert_eq!(locked, Some(book));

        PostgresBookRepository.delete(&mut con, &id).await?;
        let found = PostgresBookRepository.find_by_id(&mut con, &id).await?;
        assert!(found.is_none());

        con.roll_back().await
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn locked_book_blocks_other_lockers() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let id = BookId::new(Uuid::new_v4());

        let mut con = db.transact().await?;
        PostgresBookRepository.create(&mut con, &book(&id)).await?;
        con.commit().await?;

        let mut holder = db.transact().await?;
        let locked = PostgresBookRepository.lock_by_id(&mut holder, &id).await?;
        assert!(locked.is_some());

        let mut waiter = db.transact().await?;
        let blocked = tokio::time::timeout(
            Duration::from_millis(300),
            PostgresBookRepository.lock_by_id(&mut waiter, &id),
        )
        .await;
        assert!(blocked.is_err());
        drop(waiter);
        holder.roll_back().await?;

        let mut con = db.transact().await?;
        let locked = PostgresBookRepository.lock_by_id(&mut con, &id).await?;
        assert!(locked.is_some());
        PostgresBookRepository.delete(&mut con, &id).await?;
        con.commit().await
    }

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn isbn_may_repeat() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let first = book(&BookId::new(Uuid::new_v4()));
        let mut second = book(&BookId::new(Uuid::new_v4()));
        second.substitute(|b| *b.isbn = first.isbn().clone());
        PostgresBookRepository.create(&mut con, &first).await?;
        PostgresBookRepository.create(&mut con, &second).await?;

        let found = PostgresBookRepository
            .find_by_id(&mut con, second.id())
            .await?;
        assert_eq!(found.map(|b| b.isbn().clone()), Some(first.isbn().clone()));

        con.roll_back().await
    }
}
