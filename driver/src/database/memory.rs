use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use error_stack::Report;
use tokio::sync::{Mutex, OwnedMutexGuard};

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookQuery, DependOnCopyQuery, DependOnRentQuery, DependOnUserQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnCopyModifier, DependOnRentModifier, DependOnUserModifier,
};
use kernel::prelude::entity::{Book, BookCopy, BookId, CopyId, Rent, RentId, User, UserId};
use kernel::KernelError;

use crate::clock::SystemClock;

pub use self::{book::*, copy::*, rent::*, user::*};

mod book;
mod copy;
mod rent;
mod user;

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct Tables {
    books: HashMap<BookId, Book>,
    copies: HashMap<CopyId, BookCopy>,
    users: HashMap<UserId, User>,
    rents: HashMap<RentId, Rent>,
}

/// Process-local store with the same transactional behaviour as [`PostgresDatabase`](crate::database::PostgresDatabase).
///
/// A transaction holds the whole store until it ends, so transactions run one
/// after another. Writes go to a private copy of the tables that replaces the
/// shared one on commit. Clones share the same tables.
#[derive(Debug, Clone)]
pub struct InMemoryDatabase<C = SystemClock> {
    tables: Arc<Mutex<Tables>>,
    commit_failure: Arc<AtomicBool>,
    clock: C,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for InMemoryDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> InMemoryDatabase<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            commit_failure: Arc::new(AtomicBool::new(false)),
            clock,
        }
    }

    /// Makes the next commit fail and discard its writes.
    pub fn fail_next_commit(&self) {
        self.commit_failure.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl<C: Clock> DatabaseConnection for InMemoryDatabase<C> {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let staged = guard.clone();
        Ok(InMemoryTransaction {
            guard,
            staged,
            commit_failure: Arc::clone(&self.commit_failure),
        })
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    staged: Tables,
    commit_failure: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(self) -> error_stack::Result<(), KernelError> {
        let Self {
            mut guard,
            staged,
            commit_failure,
        } = self;
        if commit_failure.swap(false, Ordering::SeqCst) {
            tracing::debug!("Dropping staged writes on injected commit failure");
            return Err(Report::new(KernelError::Internal).attach_printable("Commit failed"));
        }
        *guard = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl<C: Clock> DependOnClock for InMemoryDatabase<C> {
    type Clock = C;
    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}

impl<C: Clock> DependOnBookQuery for InMemoryDatabase<C> {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl<C: Clock> DependOnBookModifier for InMemoryDatabase<C> {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl<C: Clock> DependOnCopyQuery for InMemoryDatabase<C> {
    type CopyQuery = InMemoryCopyRepository;
    fn copy_query(&self) -> &Self::CopyQuery {
        &InMemoryCopyRepository
    }
}

impl<C: Clock> DependOnCopyModifier for InMemoryDatabase<C> {
    type CopyModifier = InMemoryCopyRepository;
    fn copy_modifier(&self) -> &Self::CopyModifier {
        &InMemoryCopyRepository
    }
}

impl<C: Clock> DependOnUserQuery for InMemoryDatabase<C> {
    type UserQuery = InMemoryUserRepository;
    fn user_query(&self) -> &Self::UserQuery {
        &InMemoryUserRepository
    }
}

impl<C: Clock> DependOnUserModifier for InMemoryDatabase<C> {
    type UserModifier = InMemoryUserRepository;
    fn user_modifier(&self) -> &Self::UserModifier {
        &InMemoryUserRepository
    }
}

impl<C: Clock> DependOnRentQuery for InMemoryDatabase<C> {
    type RentQuery = InMemoryRentRepository;
    fn rent_query(&self) -> &Self::RentQuery {
        &InMemoryRentRepository
    }
}

impl<C: Clock> DependOnRentModifier for InMemoryDatabase<C> {
    type RentModifier = InMemoryRentRepository;
    fn rent_modifier(&self) -> &Self::RentModifier {
        &InMemoryRentRepository
    }
}
