use time::OffsetDateTime;
use uuid::Uuid;

use kernel::prelude::entity::{DestructRent, Rent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub copy_id: Uuid,
    pub book_id: Uuid,
    pub rented_at: OffsetDateTime,
    pub due_at: OffsetDateTime,
    pub returned: bool,
}

impl From<Rent> for RentDto {
    fn from(value: Rent) -> Self {
        let DestructRent {
            id,
            user_id,
            copy_id,
            book_id,
            rented_at,
            due_at,
            returned,
        } = value.into_destruct();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            copy_id: copy_id.into(),
            book_id: book_id.into(),
            rented_at: rented_at.into(),
            due_at: due_at.into(),
            returned: returned.into(),
        }
    }
}

pub struct BorrowCopyDto {
    pub copy_id: Uuid,
    pub user_id: Uuid,
}

pub struct ReturnCopyDto {
    pub copy_id: Uuid,
}

pub struct GetRentsFromUserIdDto {
    pub user_id: Uuid,
}

pub struct GetRentsFromCopyIdDto {
    pub copy_id: Uuid,
}

pub struct GetOverdueRentsDto {
    pub user_id: Uuid,
}
