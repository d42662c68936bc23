use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::BookCopy;
use crate::KernelError;

#[async_trait::async_trait]
pub trait CopyModifier: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn create(
        &self,
        con: &mut Self::Transaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError>;
    async fn update(
        &self,
        con: &mut Self::Transaction,
        copy: &BookCopy,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnCopyModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type CopyModifier: CopyModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn copy_modifier(&self) -> &Self::CopyModifier;
}
