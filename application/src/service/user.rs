use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    CopyQuery, DependOnCopyQuery, DependOnRentQuery, DependOnUserQuery, RentQuery, UserQuery,
};
use kernel::interface::update::{
    CopyModifier, DependOnCopyModifier, DependOnUserModifier, UserModifier,
};
use kernel::prelude::entity::{IsConfirmed, RentCount, User, UserId, UserName};
use kernel::KernelError;

use crate::transfer::{ConfirmUserDto, CreateUserDto, DeleteUserDto, GetUserDto, UserDto};

#[async_trait::async_trait]
pub trait GetUserService: 'static + Sync + Send + DependOnUserQuery {
    async fn get_user(&self, dto: GetUserDto) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(dto.id);
        let user = self.user_query().find_by_id(&mut connection, &id).await?;

        Ok(user.map(UserDto::from))
    }
}

impl<T> GetUserService for T where T: DependOnUserQuery {}

#[async_trait::async_trait]
pub trait CreateUserService: 'static + Sync + Send + DependOnUserModifier {
    async fn create_user(&self, dto: CreateUserDto) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let uuid = Uuid::new_v4();
        let user = User::new(
            UserId::new(uuid),
            UserName::new(dto.name),
            IsConfirmed::new(dto.confirmed),
            RentCount::default(),
        );
        self.user_modifier().create(&mut connection, &user).await?;
        connection.commit().await?;

        Ok(uuid)
    }
}

impl<T> CreateUserService for T where T: DependOnUserModifier {}

#[async_trait::async_trait]
pub trait ConfirmUserService:
    'static + Sync + Send + DependOnUserQuery + DependOnUserModifier
{
    async fn confirm_user(
        &self,
        dto: ConfirmUserDto,
    ) -> error_stack::Result<Option<UserDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(dto.id);
        let Some(mut user) = self.user_query().lock_by_id(&mut connection, &id).await? else {
            return Ok(None);
        };
        user.confirm();
        self.user_modifier().update(&mut connection, &user).await?;
        connection.commit().await?;

        Ok(Some(UserDto::from(user)))
    }
}

impl<T> ConfirmUserService for T where T: DependOnUserQuery + DependOnUserModifier {}

#[async_trait::async_trait]
pub trait DeleteUserService:
    'static
    + Sync
    + Send
    + DependOnUserQuery
    + DependOnUserModifier
    + DependOnRentQuery
    + DependOnCopyQuery
    + DependOnCopyModifier
{
    /// Deletes the user with its rents and puts the copies it still holds back on the shelf.
    async fn delete_user(&self, dto: DeleteUserDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = UserId::new(dto.id);

        // Copies are locked ahead of the user, in the same order borrow and return use.
        let held = self
            .rent_query()
            .find_open_by_user_id(&mut connection, &id)
            .await?;
        for rent in &held {
            self.copy_query()
                .lock_by_id(&mut connection, rent.copy_id())
                .await?;
        }
        if self
            .user_query()
            .lock_by_id(&mut connection, &id)
            .await?
            .is_none()
        {
            return Ok(());
        }

        let held = self
            .rent_query()
            .find_open_by_user_id(&mut connection, &id)
            .await?;
        for rent in held {
            let copy = self
                .copy_query()
                .lock_by_id(&mut connection, rent.copy_id())
                .await?;
            if let Some(mut copy) = copy {
                copy.check_in();
                self.copy_modifier().update(&mut connection, &copy).await?;
            }
        }

        self.user_modifier().delete(&mut connection, &id).await?;
        connection.commit().await?;

        tracing::info!(user_id = %dto.id, "User deleted");
        Ok(())
    }
}

impl<T> DeleteUserService for T where
    T: DependOnUserQuery
        + DependOnUserModifier
        + DependOnRentQuery
        + DependOnCopyQuery
        + DependOnCopyModifier
{
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::service::fixture::{book, database, user};
    use crate::service::{
        BorrowCopyService, ConfirmUserService, DeleteUserService, GetCopyService, GetRentService,
        GetUserService,
    };
    use crate::transfer::{
        BorrowCopyDto, ConfirmUserDto, DeleteUserDto, GetCopyDto, GetRentsFromCopyIdDto,
        GetUserDto,
    };

    #[tokio::test]
    async fn new_user_starts_without_rents() {
        let (db, _) = database();
        let id = user(&db, false).await;

        let found = db.get_user(GetUserDto { id }).await.unwrap().unwrap();
        assert_eq!(found.name, "reader");
        assert!(!found.confirmed);
        assert_eq!(found.rent_count, 0);
    }

    #[tokio::test]
    async fn confirmed_user_can_borrow() {
        let (db, _) = database();
        let (_, copies) = book(&db, 1).await;
        let id = user(&db, false).await;

        let confirmed = db.confirm_user(ConfirmUserDto { id }).await.unwrap().unwrap();
        assert!(confirmed.confirmed);

        db.borrow_copy(BorrowCopyDto {
            copy_id: copies[0],
            user_id: id,
        })
        .await
        .unwrap();

        let missing = db
            .confirm_user(ConfirmUserDto { id: Uuid::new_v4() })
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn deleting_user_shelves_held_copies() {
        let (db, _) = database();
        let (_, copies) = book(&db, 1).await;
        let id = user(&db, true).await;
        let copy_id = copies[0];
        db.borrow_copy(BorrowCopyDto {
            copy_id,
            user_id: id,
        })
        .await
        .unwrap();

        db.delete_user(DeleteUserDto { id }).await.unwrap();

        assert!(db.get_user(GetUserDto { id }).await.unwrap().is_none());
        let copy = db.get_copy(GetCopyDto { id: copy_id }).await.unwrap().unwrap();
        assert!(copy.can_borrow());
        assert!(db
            .get_rents_from_copy(GetRentsFromCopyIdDto { copy_id })
            .await
            .unwrap()
            .is_empty());

        db.delete_user(DeleteUserDto { id }).await.unwrap();
    }
}
