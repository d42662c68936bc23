use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{CopyId, Rent, UserId};
use crate::KernelError;

/// Read side of the rent ledger. Listing methods return rents newest first.
#[async_trait::async_trait]
pub trait RentQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_open_by_copy_id(
        &self,
        con: &mut Self::Transaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Option<Rent>, KernelError>;

    async fn find_open_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError>;

    async fn find_by_copy_id(
        &self,
        con: &mut Self::Transaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rent>, KernelError>;

    async fn find_by_user_id(
        &self,
        con: &mut Self::Transaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError>;
}

pub trait DependOnRentQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type RentQuery: RentQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn rent_query(&self) -> &Self::RentQuery;
}
