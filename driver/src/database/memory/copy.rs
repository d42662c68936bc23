use kernel::interface::query::CopyQuery;
use kernel::interface::update::CopyModifier;
use kernel::prelude::entity::{BookCopy, BookId, CopyId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryCopyRepository;

#[async_trait::async_trait]
impl CopyQuery for InMemoryCopyRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        Ok(con.staged.copies.get(id).cloned())
    }

    // the transaction already owns the whole store
    async fn lock_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError> {
        self.find_by_id(con, id).await
    }

    async fn find_by_book_id(
        &self,
        con: &mut InMemoryTransaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError> {
        let mut copies = con
            .staged
            .copies
            .values()
            .filter(|copy| copy.book_id() == book_id)
            .cloned()
            .collect::<Vec<_>>();
        copies.sort_by(|a, b| a.id().as_ref().cmp(b.id().as_ref()));
        Ok(copies)
    }
}

#[async_trait::async_trait]
impl CopyModifier for InMemoryCopyRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.copies.insert(copy.id().clone(), copy.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.staged.copies.get_mut(copy.id()) {
            *stored = copy.clone();
        }
        Ok(())
    }
}
