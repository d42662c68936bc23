mod confirmed;
mod id;
mod name;
mod rent_count;

pub use self::{confirmed::*, id::*, name::*, rent_count::*};
use crate::entity::Rent;
use crate::IneligibleReason;
use destructure::Destructure;
use time::OffsetDateTime;
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, Destructure, References)]
pub struct User {
    id: UserId,
    name: UserName,
    confirmed: IsConfirmed,
    rent_count: RentCount,
}

impl User {
    pub fn new(id: UserId, name: UserName, confirmed: IsConfirmed, rent_count: RentCount) -> Self {
        Self {
            id,
            name,
            confirmed,
            rent_count,
        }
    }

    /// Decides whether this user may start one more rent at `now`.
    ///
    /// `open_rents` must hold every unreturned rent of the user. Checks run in the
    /// order overdue, confirmation, limit and the first failing one is reported.
    pub fn check_eligibility(
        &self,
        open_rents: &[Rent],
        now: &OffsetDateTime,
    ) -> Result<(), IneligibleReason> {
        if open_rents.iter().any(|rent| rent.is_overdue(now)) {
            return Err(IneligibleReason::Overdue);
        }
        if !*self.confirmed.as_ref() {
            return Err(IneligibleReason::NotConfirmed);
        }
        if !self.rent_count.admits_another() {
            return Err(IneligibleReason::LimitReached);
        }
        Ok(())
    }

    pub fn confirm(&mut self) {
        self.confirmed = IsConfirmed::new(true);
    }

    pub fn start_rent(&mut self) {
        self.rent_count = self.rent_count.increment();
    }

    pub fn finish_rent(&mut self) {
        self.rent_count = self.rent_count.decrement();
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use crate::entity::{
        BookId, CopyId, IsConfirmed, Rent, RentCount, RentId, User, UserId, UserName, RENT_LIMIT,
    };
    use crate::IneligibleReason;

    fn user(confirmed: bool, rent_count: i32) -> User {
        User::new(
            UserId::new(Uuid::new_v4()),
            UserName::new("reader"),
            IsConfirmed::new(confirmed),
            RentCount::new(rent_count),
        )
    }

    fn rent_for(user: &User, rented_at: OffsetDateTime) -> Rent {
        Rent::open(
            RentId::new(Uuid::new_v4()),
            user.id().clone(),
            CopyId::new(Uuid::new_v4()),
            BookId::new(Uuid::new_v4()),
            rented_at,
        )
    }

    #[test]
    fn confirmed_user_without_rents_is_eligible() {
        let user = user(true, 0);
        assert_eq!(
            user.check_eligibility(&[], &OffsetDateTime::now_utc()),
            Ok(())
        );
    }

    #[test]
    fn unconfirmed_user_is_rejected() {
        let user = user(false, 0);
        assert_eq!(
            user.check_eligibility(&[], &OffsetDateTime::now_utc()),
            Err(IneligibleReason::NotConfirmed)
        );
    }

    #[test]
    fn overdue_rent_is_reported_before_other_reasons() {
        let user = user(false, RENT_LIMIT + 1);
        let rented_at = OffsetDateTime::now_utc() - Duration::days(20);
        let rents = vec![rent_for(&user, rented_at)];
        assert_eq!(
            user.check_eligibility(&rents, &OffsetDateTime::now_utc()),
            Err(IneligibleReason::Overdue)
        );
    }

    #[test]
    fn rent_due_exactly_now_is_not_overdue() {
        let user = user(true, 1);
        let rented_at = OffsetDateTime::now_utc() - Duration::days(15);
        let rents = vec![rent_for(&user, rented_at)];
        let due = *rents[0].due_at().as_ref();
        assert_eq!(user.check_eligibility(&rents, &due), Ok(()));
        assert_eq!(
            user.check_eligibility(&rents, &(due + Duration::seconds(1))),
            Err(IneligibleReason::Overdue)
        );
    }

    #[test]
    fn limit_is_checked_before_incrementing() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(user(true, RENT_LIMIT).check_eligibility(&[], &now), Ok(()));
        assert_eq!(
            user(true, RENT_LIMIT + 1).check_eligibility(&[], &now),
            Err(IneligibleReason::LimitReached)
        );
    }

    #[test]
    fn finishing_a_rent_never_goes_negative() {
        let mut user = user(true, 0);
        user.finish_rent();
        assert_eq!(user.rent_count(), &RentCount::new(0));
        user.start_rent();
        user.start_rent();
        user.finish_rent();
        assert_eq!(user.rent_count(), &RentCount::new(1));
    }
}
