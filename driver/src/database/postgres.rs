use std::ops::{Deref, DerefMut};

use error_stack::{Report, ResultExt};
use sqlx::{Error, PgConnection, Pool, Postgres};

use kernel::interface::clock::DependOnClock;
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookQuery, DependOnCopyQuery, DependOnRentQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnCopyModifier, DependOnRentModifier, DependOnUserModifier,
};
use kernel::KernelError;

use crate::clock::SystemClock;
use crate::env;
use crate::error::ConvertError;

pub use self::{book::*, copy::*, rent::*, user::*};

mod book;
mod copy;
mod rent;
mod user;

static POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
}

impl PostgresDatabase {
    pub async fn new() -> error_stack::Result<Self, KernelError> {
        let url = env(POSTGRES_URL)?;
        let pool = Pool::connect(&url).await.convert_error()?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> error_stack::Result<(), KernelError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable("Failed to run migrations")
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for PostgresDatabase {
    type Transaction = PostgresTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let transaction = self.pool.begin().await.convert_error()?;
        Ok(PostgresTransaction(transaction))
    }
}

pub struct PostgresTransaction(sqlx::Transaction<'static, Postgres>);

#[async_trait::async_trait]
impl Transaction for PostgresTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        self.0.commit().await.convert_error()
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        self.0.rollback().await.convert_error()
    }
}

impl Deref for PostgresTransaction {
    type Target = PgConnection;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for PostgresTransaction {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> ConvertError for Result<T, Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            let context = match &error {
                Error::PoolTimedOut => KernelError::Timeout,
                // serialization_failure, deadlock_detected
                Error::Database(e) if matches!(e.code().as_deref(), Some("40001" | "40P01")) => {
                    KernelError::Concurrency
                }
                _ => KernelError::Internal,
            };
            Report::from(error).change_context(context)
        })
    }
}

impl DependOnClock for PostgresDatabase {
    type Clock = SystemClock;
    fn clock(&self) -> &Self::Clock {
        &SystemClock
    }
}

impl DependOnBookQuery for PostgresDatabase {
    type BookQuery = PostgresBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &PostgresBookRepository
    }
}

impl DependOnBookModifier for PostgresDatabase {
    type BookModifier = PostgresBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &PostgresBookRepository
    }
}

impl DependOnCopyQuery for PostgresDatabase {
    type CopyQuery = PostgresCopyRepository;
    fn copy_query(&self) -> &Self::CopyQuery {
        &PostgresCopyRepository
    }
}

impl DependOnCopyModifier for PostgresDatabase {
    type CopyModifier = PostgresCopyRepository;
    fn copy_modifier(&self) -> &Self::CopyModifier {
        &PostgresCopyRepository
    }
}

impl DependOnUserQuery for PostgresDatabase {
    type UserQuery = PostgresUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &PostgresUserRepository
    }
}

impl DependOnUserModifier for PostgresDatabase {
    type UserModifier = PostgresUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &PostgresUserRepository
    }
}

impl DependOnRentQuery for PostgresDatabase {
    type RentQuery = PostgresRentRepository;
    fn rent_query(&self) -> &Self::RentQuery {
        &PostgresRentRepository
    }
}

impl DependOnRentModifier for PostgresDatabase {
    type RentModifier = PostgresRentRepository;
    fn rent_modifier(&self) -> &Self::RentModifier {
        &PostgresRentRepository
    }
}
