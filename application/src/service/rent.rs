use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection};
use kernel::interface::query::{DependOnRentQuery, RentQuery};
use kernel::prelude::entity::{CopyId, UserId};
use kernel::KernelError;

use crate::transfer::{GetOverdueRentsDto, GetRentsFromCopyIdDto, GetRentsFromUserIdDto, RentDto};

#[async_trait::async_trait]
pub trait GetRentService: 'static + Sync + Send + DependOnRentQuery + DependOnClock {
    async fn get_rents_from_user(
        &self,
        dto: GetRentsFromUserIdDto,
    ) -> error_stack::Result<Vec<RentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let rents = self
            .rent_query()
            .find_by_user_id(&mut connection, &user_id)
            .await?;

        Ok(rents.into_iter().map(RentDto::from).collect())
    }

    async fn get_rents_from_copy(
        &self,
        dto: GetRentsFromCopyIdDto,
    ) -> error_stack::Result<Vec<RentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let copy_id = CopyId::new(dto.copy_id);
        let rents = self
            .rent_query()
            .find_by_copy_id(&mut connection, &copy_id)
            .await?;

        Ok(rents.into_iter().map(RentDto::from).collect())
    }

    /// Open rents of the user whose due time has already passed.
    async fn get_overdue_rents(
        &self,
        dto: GetOverdueRentsDto,
    ) -> error_stack::Result<Vec<RentDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let user_id = UserId::new(dto.user_id);
        let now = self.clock().now();
        let rents = self
            .rent_query()
            .find_open_by_user_id(&mut connection, &user_id)
            .await?;

        Ok(rents
            .into_iter()
            .filter(|rent| rent.is_overdue(&now))
            .map(RentDto::from)
            .collect())
    }
}

impl<T> GetRentService for T where T: DependOnRentQuery + DependOnClock {}
