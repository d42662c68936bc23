mod available;
mod id;

pub use self::{available::*, id::*};
use crate::entity::BookId;
use destructure::Destructure;
use vodca::References;

/// A physical, independently rentable instance of a [`Book`](crate::entity::Book).
///
/// A copy is either on the shelf (`available`) or out on exactly one open rent.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct BookCopy {
    id: CopyId,
    book_id: BookId,
    available: IsAvailable,
}

impl BookCopy {
    pub fn new(id: CopyId, book_id: BookId, available: IsAvailable) -> Self {
        Self {
            id,
            book_id,
            available,
        }
    }

    pub fn can_borrow(&self) -> bool {
        *self.available.as_ref()
    }

    pub fn can_return(&self) -> bool {
        !self.can_borrow()
    }

    pub fn check_out(&mut self) {
        self.available = IsAvailable::new(false);
    }

    pub fn check_in(&mut self) {
        self.available = IsAvailable::new(true);
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{BookCopy, BookId, CopyId, IsAvailable};

    fn copy(available: bool) -> BookCopy {
        BookCopy::new(
            CopyId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            IsAvailable::new(available),
        )
    }

    #[test]
    fn shelved_copy_can_only_be_borrowed() {
        let copy = copy(true);
        assert!(copy.can_borrow());
        assert!(!copy.can_return());
    }

    #[test]
    fn checked_out_copy_can_only_be_returned() {
        let copy = copy(false);
        assert!(!copy.can_borrow());
        assert!(copy.can_return());
    }

    #[test]
    fn check_out_and_in_flip_availability() {
        let mut copy = copy(true);
        copy.check_out();
        assert_eq!(copy.available(), &IsAvailable::new(false));
        copy.check_in();
        assert_eq!(copy.available(), &IsAvailable::new(true));
    }
}
