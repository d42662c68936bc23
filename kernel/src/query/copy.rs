use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookCopy, BookId, CopyId};
use crate::KernelError;

#[async_trait::async_trait]
pub trait CopyQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError>;

    /// Same as [`CopyQuery::find_by_id`] but holds the row until the transaction ends,
    /// so concurrent writers of the copy wait for it.
    async fn lock_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &CopyId,
    ) -> error_stack::Result<Option<BookCopy>, KernelError>;

    async fn find_by_book_id(
        &self,
        con: &mut Self::Transaction,
        book_id: &BookId,
    ) -> error_stack::Result<Vec<BookCopy>, KernelError>;
}

pub trait DependOnCopyQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type CopyQuery: CopyQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn copy_query(&self) -> &Self::CopyQuery;
}
