use sqlx::PgConnection;
use time::OffsetDateTime;
use uuid::Uuid;

use kernel::interface::query::RentQuery;
use kernel::interface::update::RentModifier;
use kernel::prelude::entity::{BookId, CopyId, DueAt, IsReturned, Rent, RentId, RentedAt, UserId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresRentRepository;

#[async_trait::async_trait]
impl RentQuery for PostgresRentRepository {
    type Transaction = PostgresTransaction;

    async fn find_open_by_copy_id(
        &self,
        con: &mut PostgresTransaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Option<Rent>, KernelError> {
        PgRentInternal::find_open_by_copy_id(con, copy_id).await
    }

    async fn find_open_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        PgRentInternal::find_open_by_user_id(con, user_id).await
    }

    async fn find_by_copy_id(
        &self,
        con: &mut PostgresTransaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        PgRentInternal::find_by_copy_id(con, copy_id).await
    }

    async fn find_by_user_id(
        &self,
        con: &mut PostgresTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        PgRentInternal::find_by_user_id(con, user_id).await
    }
}

#[async_trait::async_trait]
impl RentModifier for PostgresRentRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        rent: &Rent,
    ) -> error_stack::Result<(), KernelError> {
        PgRentInternal::create(con, rent).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        rent: &Rent,
    ) -> error_stack::Result<(), KernelError> {
        PgRentInternal::update(con, rent).await
    }
}

#[derive(sqlx::FromRow)]
struct RentRow {
    id: Uuid,
    user_id: Uuid,
    copy_id: Uuid,
    book_id: Uuid,
    rented_at: OffsetDateTime,
    due_at: OffsetDateTime,
    returned: bool,
}

impl From<RentRow> for Rent {
    fn from(value: RentRow) -> Self {
        Rent::new(
            RentId::new(value.id),
            UserId::new(value.user_id),
            CopyId::new(value.copy_id),
            BookId::new(value.book_id),
            RentedAt::new(value.rented_at),
            DueAt::new(value.due_at),
            IsReturned::new(value.returned),
        )
    }
}

pub(in crate::database) struct PgRentInternal;

impl PgRentInternal {
    async fn find_open_by_copy_id(
        con: &mut PgConnection,
        copy_id: &CopyId,
    ) -> error_stack::Result<Option<Rent>, KernelError> {
        let row = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, copy_id, book_id, rented_at, due_at, returned
            FROM rents
            WHERE copy_id = $1 AND NOT returned
            FOR UPDATE
            "#,
        )
        .bind(copy_id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        Ok(row.map(Rent::from))
    }

    async fn find_open_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        let rows = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, copy_id, book_id, rented_at, due_at, returned
            FROM rents
            WHERE user_id = $1 AND NOT returned
            ORDER BY rented_at DESC
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rent::from).collect())
    }

    async fn find_by_copy_id(
        con: &mut PgConnection,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        let rows = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, copy_id, book_id, rented_at, due_at, returned
            FROM rents
            WHERE copy_id = $1
            ORDER BY rented_at DESC
            "#,
        )
        .bind(copy_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rent::from).collect())
    }

    async fn find_by_user_id(
        con: &mut PgConnection,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        let rows = sqlx::query_as::<_, RentRow>(
            // language=postgresql
            r#"
            SELECT id, user_id, copy_id, book_id, rented_at, due_at, returned
            FROM rents
            WHERE user_id = $1
            ORDER BY rented_at DESC
            "#,
        )
        .bind(user_id.as_ref())
        .fetch_all(con)
        .await
        .convert_error()?;
        Ok(rows.into_iter().map(Rent::from).collect())
    }

    async fn create(con: &mut PgConnection, rent: &Rent) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            INSERT INTO rents (id, user_id, copy_id, book_id, rented_at, due_at, returned)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rent.id().as_ref())
        .bind(rent.user_id().as_ref())
        .bind(rent.copy_id().as_ref())
        .bind(rent.book_id().as_ref())
        .bind(rent.rented_at().as_ref())
        .bind(rent.due_at().as_ref())
        .bind(rent.returned().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    // only the returned flag ever changes after a rent is opened
    async fn update(con: &mut PgConnection, rent: &Rent) -> error_stack::Result<(), KernelError> {
        // language=postgresql
        sqlx::query(
            r#"
            UPDATE rents
            SET returned = $2
            WHERE id = $1
            "#,
        )
        .bind(rent.id().as_ref())
        .bind(rent.returned().as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::RentQuery;
    use kernel::interface::update::{BookModifier, CopyModifier, RentModifier, UserModifier};
    use kernel::prelude::entity::{BookCopy, BookId, CopyId, IsAvailable, Rent, RentId, UserId};
    use kernel::KernelError;

    use crate::database::postgres::book::test::book;
    use crate::database::postgres::user::test::user;
    use crate::database::postgres::{
        PostgresBookRepository, PostgresCopyRepository, PostgresDatabase, PostgresRentRepository,
        PostgresUserRepository,
    };

    #[test_with::env(POSTGRES_TEST)]
    #[tokio::test]
    async fn test() -> error_stack::Result<(), KernelError> {
        let db = PostgresDatabase::new().await?;
        db.migrate().await?;
        let mut con = db.transact().await?;

        let book_id = BookId::new(Uuid::new_v4());
        let copy_id = CopyId::new(Uuid::new_v4());
        let user_id = UserId::new(Uuid::new_v4());
        PostgresBookRepository
            .create(&mut con, &book(&book_id))
            .await?;
        let copy = BookCopy::new(copy_id.clone(), book_id.clone(), IsAvailable::default());
        PostgresCopyRepository.create(&mut con, &copy).await?;
        PostgresUserRepository
            .create(&mut con, &user(&user_id))
            .await?;

        // postgres keeps microseconds
        let now = OffsetDateTime::now_utc().replace_millisecond(0).unwrap();
        let mut first = Rent::open(
            RentId::new(Uuid::new_v4()),
            user_id.clone(),
            copy_id.clone(),
            book_id.clone(),
            now - Duration::days(30),
        );
        first.close();
        PostgresRentRepository.create(&mut con, &first).await?;

        let second = Rent::open(
            RentId::new(Uuid::new_v4()),
            user_id.clone(),
            copy_id.clone(),
            book_id.clone(),
            now,
        );
        PostgresRentRepository.create(&mut con, &second).await?;

        let open = PostgresRentRepository
            .find_open_by_copy_id(&mut con, &copy_id)
            .await?;
        assert_eq!(open, Some(second.clone()));

        let open = PostgresRentRepository
            .find_open_by_user_id(&mut con, &user_id)
            .await?;
        assert_eq!(open, vec![second.clone()]);

        let all = PostgresRentRepository
            .find_by_user_id(&mut con, &user_id)
            .await?;
        assert_eq!(all, vec![second.clone(), first.clone()]);

        let mut second = second;
        second.close();
        PostgresRentRepository.update(&mut con, &second).await?;
        let all = PostgresRentRepository
            .find_by_copy_id(&mut con, &copy_id)
            .await?;
        assert_eq!(all, vec![second, first]);

        PostgresUserRepository.delete(&mut con, &user_id).await?;
        let all = PostgresRentRepository
            .find_by_copy_id(&mut con, &copy_id)
            .await?;
        assert!(all.is_empty());

        con.roll_back().await
    }
}
