mod id;
mod returned;
mod schedule;

pub use self::{id::*, returned::*, schedule::*};
use crate::entity::{BookId, CopyId, UserId};
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

/// One borrow transaction of a copy by a user.
///
/// Created open by a successful borrow and closed once by the matching return.
/// `book_id` is copied from the rented copy for reporting.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Rent {
    id: RentId,
    user_id: UserId,
    copy_id: CopyId,
    book_id: BookId,
    rented_at: RentedAt,
    due_at: DueAt,
    returned: IsReturned,
}

impl Rent {
    pub fn new(
        id: RentId,
        user_id: UserId,
        copy_id: CopyId,
        book_id: BookId,
        rented_at: RentedAt,
        due_at: DueAt,
        returned: IsReturned,
    ) -> Self {
        Self {
            id,
            user_id,
            copy_id,
            book_id,
            rented_at,
            due_at,
            returned,
        }
    }

    pub fn open(
        id: RentId,
        user_id: UserId,
        copy_id: CopyId,
        book_id: BookId,
        now: OffsetDateTime,
    ) -> Self {
        Self::new(
            id,
            user_id,
            copy_id,
            book_id,
            RentedAt::new(now),
            DueAt::new(now + RENT_PERIOD),
            IsReturned::new(false),
        )
    }

    pub fn is_open(&self) -> bool {
        !*self.returned.as_ref()
    }

    pub fn is_overdue(&self, now: &OffsetDateTime) -> bool {
        self.is_open() && self.due_at.as_ref() < now
    }

    pub fn close(&mut self) {
        self.returned = IsReturned::new(true);
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::entity::{BookId, CopyId, Rent, RentId, UserId, RENT_PERIOD};

    fn rent(now: OffsetDateTime) -> Rent {
        Rent::open(
            RentId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            CopyId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            now,
        )
    }

    #[test]
    fn opened_rent_is_due_fifteen_days_later() {
        let now = OffsetDateTime::now_utc();
        let rent = rent(now);
        assert_eq!(RENT_PERIOD, Duration::days(15));
        assert_eq!(*rent.rented_at().as_ref(), now);
        assert_eq!(*rent.due_at().as_ref(), now + Duration::days(15));
        assert!(rent.is_open());
    }

    #[test]
    fn overdue_only_while_open_and_past_due() {
        let now = OffsetDateTime::now_utc();
        let mut rent = rent(now);
        assert!(!rent.is_overdue(&(now + Duration::days(14))));
        assert!(rent.is_overdue(&(now + Duration::days(20))));

        rent.close();
        assert!(!rent.is_open());
        assert!(!rent.is_overdue(&(now + Duration::days(20))));
    }

    #[test]
    fn closing_keeps_due_time() {
        let now = OffsetDateTime::now_utc();
        let mut rent = rent(now);
        let due = rent.due_at().clone();
        rent.close();
        assert_eq!(rent.due_at(), &due);
    }
}
