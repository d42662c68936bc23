use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::clock::{Clock, DependOnClock};
use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    CopyQuery, DependOnCopyQuery, DependOnRentQuery, DependOnUserQuery, RentQuery, UserQuery,
};
use kernel::interface::update::{
    CopyModifier, DependOnCopyModifier, DependOnRentModifier, DependOnUserModifier, RentModifier,
    UserModifier,
};
use kernel::prelude::entity::{CopyId, Rent, RentId, UserId};
use kernel::{LendingError, Resource};

use crate::transfer::{BorrowCopyDto, RentDto, ReturnCopyDto};

#[async_trait::async_trait]
pub trait BorrowCopyService:
    'static
    + Sync
    + Send
    + DependOnClock
    + DependOnCopyQuery
    + DependOnCopyModifier
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnRentQuery
    + DependOnRentModifier
{
    /// Lends the copy to the user.
    ///
    /// The copy flag, the user's rent count and the new rent are written in one
    /// transaction. The copy row is locked before the user row.
    async fn borrow_copy(&self, dto: BorrowCopyDto) -> error_stack::Result<RentDto, LendingError> {
        let mut connection = self
            .database_connection()
            .transact()
            .await
            .change_context(LendingError::BorrowFailed)?;

        let copy_id = CopyId::new(dto.copy_id);
        let user_id = UserId::new(dto.user_id);

        let result: error_stack::Result<Rent, LendingError> = async {
            let mut copy = self
                .copy_query()
                .lock_by_id(&mut connection, &copy_id)
                .await
                .change_context(LendingError::BorrowFailed)?
                .ok_or_else(|| Report::new(LendingError::NotFound(Resource::Copy)))?;
            if !copy.can_borrow() {
                return Err(Report::new(LendingError::CopyUnavailable));
            }

            let mut user = self
                .user_query()
                .lock_by_id(&mut connection, &user_id)
                .await
                .change_context(LendingError::BorrowFailed)?
                .ok_or_else(|| Report::new(LendingError::NotFound(Resource::User)))?;

            let now = self.clock().now();
            let open_rents = self
                .rent_query()
                .find_open_by_user_id(&mut connection, &user_id)
                .await
                .change_context(LendingError::BorrowFailed)?;
            user.check_eligibility(&open_rents, &now)
                .map_err(|reason| Report::new(LendingError::BorrowerIneligible(reason)))?;

            let rent = Rent::open(
                RentId::new(Uuid::new_v4()),
                user_id.clone(),
                copy_id.clone(),
                copy.book_id().clone(),
                now,
            );
            copy.check_out();
            user.start_rent();

            self.copy_modifier()
                .update(&mut connection, &copy)
                .await
                .change_context(LendingError::BorrowFailed)?;
            self.user_modifier()
                .update(&mut connection, &user)
                .await
                .change_context(LendingError::BorrowFailed)?;
            self.rent_modifier()
                .create(&mut connection, &rent)
                .await
                .change_context(LendingError::BorrowFailed)?;
            Ok(rent)
        }
        .await;

        match result {
            Ok(rent) => {
                connection
                    .commit()
                    .await
                    .change_context(LendingError::BorrowFailed)
                    .inspect_err(|report| tracing::error!("Failed to commit rent: {report:?}"))?;
                tracing::info!(
                    copy_id = %dto.copy_id,
                    user_id = %dto.user_id,
                    "Copy borrowed"
                );
                Ok(RentDto::from(rent))
            }
            Err(report) => {
                abort(connection, &report).await;
                Err(report)
            }
        }
    }
}

impl<T> BorrowCopyService for T where
    T: DependOnClock
        + DependOnCopyQuery
        + DependOnCopyModifier
        + DependOnUserQuery
        + DependOnUserModifier
        + DependOnRentQuery
        + DependOnRentModifier
{
}

#[async_trait::async_trait]
pub trait ReturnCopyService:
    'static
    + Sync
    + Send
    + DependOnCopyQuery
    + DependOnCopyModifier
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnRentQuery
    + DependOnRentModifier
{
    /// Closes the open rent of the copy, shelves the copy and releases one rent
    /// from its holder, all in one transaction.
    async fn return_copy(&self, dto: ReturnCopyDto) -> error_stack::Result<RentDto, LendingError> {
        let mut connection = self
            .database_connection()
            .transact()
            .await
            .change_context(LendingError::ReturnFailed)?;

        let copy_id = CopyId::new(dto.copy_id);

        let result: error_stack::Result<Rent, LendingError> = async {
            let mut copy = self
                .copy_query()
                .lock_by_id(&mut connection, &copy_id)
                .await
                .change_context(LendingError::ReturnFailed)?
                .ok_or_else(|| Report::new(LendingError::NotFound(Resource::Copy)))?;

            let mut rent = self
                .rent_query()
                .find_open_by_copy_id(&mut connection, &copy_id)
                .await
                .change_context(LendingError::ReturnFailed)?
                .ok_or_else(|| Report::new(LendingError::AlreadyReturned))?;

            let mut user = self
                .user_query()
                .lock_by_id(&mut connection, rent.user_id())
                .await
                .change_context(LendingError::ReturnFailed)?
                .ok_or_else(|| Report::new(LendingError::NotFound(Resource::User)))?;

            rent.close();
            copy.check_in();
            user.finish_rent();

            self.rent_modifier()
                .update(&mut connection, &rent)
                .await
                .change_context(LendingError::ReturnFailed)?;
            self.copy_modifier()
                .update(&mut connection, &copy)
                .await
                .change_context(LendingError::ReturnFailed)?;
            self.user_modifier()
                .update(&mut connection, &user)
                .await
                .change_context(LendingError::ReturnFailed)?;
            Ok(rent)
        }
        .await;

        match result {
            Ok(rent) => {
                connection
                    .commit()
                    .await
                    .change_context(LendingError::ReturnFailed)
                    .inspect_err(|report| tracing::error!("Failed to commit return: {report:?}"))?;
                tracing::info!(copy_id = %dto.copy_id, "Copy returned");
                Ok(RentDto::from(rent))
            }
            Err(report) => {
                abort(connection, &report).await;
                Err(report)
            }
        }
    }
}

impl<T> ReturnCopyService for T where
    T: DependOnCopyQuery
        + DependOnCopyModifier
        + DependOnUserQuery
        + DependOnUserModifier
        + DependOnRentQuery
        + DependOnRentModifier
{
}

async fn abort<T: Transaction>(connection: T, report: &Report<LendingError>) {
    let context = report.current_context();
    match context {
        LendingError::NotFound(_) => tracing::debug!("{context}"),
        _ if context.is_rejection() => tracing::info!("Lending rejected: {context}"),
        _ => tracing::error!("{report:?}"),
    }
    if let Err(error) = connection.roll_back().await {
        tracing::error!("Failed to roll back: {error:?}");
    }
}
