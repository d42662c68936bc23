use std::collections::HashSet;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;
    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        Ok(con.staged.books.get(id).cloned())
    }

    // the transaction already owns the whole store
    async fn lock_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &BookId,
    ) -> error_stack::Result<Option<Book>, KernelError> {
        self.find_by_id(con, id).await
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.books.insert(book.id().clone(), book.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.staged.books.get_mut(book.id()) {
            *stored = book.clone();
        }
        Ok(())
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<(), KernelError> {
        let tables = &mut con.staged;
        tables.books.remove(book_id);
        let mut removed = HashSet::new();
        tables.copies.retain(|id, copy| {
            let keep = copy.book_id() != book_id;
            if !keep {
                removed.insert(id.clone());
            }
            keep
        });
        tables
            .rents
            .retain(|_, rent| !removed.contains(rent.copy_id()));
        Ok(())
    }
}
