use uuid::Uuid;

use kernel::prelude::entity::{DestructUser, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDto {
    pub id: Uuid,
    pub name: String,
    pub confirmed: bool,
    pub rent_count: i32,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let DestructUser {
            id,
            name,
            confirmed,
            rent_count,
        } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            confirmed: confirmed.into(),
            rent_count: rent_count.into(),
        }
    }
}

pub struct GetUserDto {
    pub id: Uuid,
}

pub struct CreateUserDto {
    pub name: String,
    pub confirmed: bool,
}

pub struct ConfirmUserDto {
    pub id: Uuid,
}

pub struct DeleteUserDto {
    pub id: Uuid,
}
