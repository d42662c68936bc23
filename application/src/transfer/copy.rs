use uuid::Uuid;

use kernel::prelude::entity::{BookCopy, DestructBookCopy};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub available: bool,
}

impl From<BookCopy> for CopyDto {
    fn from(value: BookCopy) -> Self {
        let DestructBookCopy {
            id,
            book_id,
            available,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_id: book_id.into(),
            available: available.into(),
        }
    }
}

impl CopyDto {
    pub fn can_borrow(&self) -> bool {
        self.available
    }

    pub fn can_return(&self) -> bool {
        !self.available
    }
}

pub struct GetCopyDto {
    pub id: Uuid,
}

pub struct GetCopiesFromBookIdDto {
    pub book_id: Uuid,
}

pub struct AddCopyDto {
    pub book_id: Uuid,
}
