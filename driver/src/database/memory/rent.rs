use kernel::interface::query::RentQuery;
use kernel::interface::update::RentModifier;
use kernel::prelude::entity::{CopyId, Rent, UserId};
use kernel::KernelError;

use crate::database::memory::InMemoryTransaction;

pub struct InMemoryRentRepository;

impl InMemoryRentRepository {
    fn collect(con: &InMemoryTransaction, predicate: impl Fn(&Rent) -> bool) -> Vec<Rent> {
        let mut rents = con
            .staged
            .rents
            .values()
            .filter(|rent| predicate(rent))
            .cloned()
            .collect::<Vec<_>>();
        rents.sort_by(|a, b| b.rented_at().cmp(a.rented_at()));
        rents
    }
}

#[async_trait::async_trait]
impl RentQuery for InMemoryRentRepository {
    type Transaction = InMemoryTransaction;

    async fn find_open_by_copy_id(
        &self,
        con: &mut InMemoryTransaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Option<Rent>, KernelError> {
        Ok(con
            .staged
            .rents
            .values()
            .find(|rent| rent.copy_id() == copy_id && rent.is_open())
            .cloned())
    }

    async fn find_open_by_user_id(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        Ok(Self::collect(con, |rent| {
            rent.user_id() == user_id && rent.is_open()
        }))
    }

    async fn find_by_copy_id(
        &self,
        con: &mut InMemoryTransaction,
        copy_id: &CopyId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        Ok(Self::collect(con, |rent| rent.copy_id() == copy_id))
    }

    async fn find_by_user_id(
        &self,
        con: &mut InMemoryTransaction,
        user_id: &UserId,
    ) -> error_stack::Result<Vec<Rent>, KernelError> {
        Ok(Self::collect(con, |rent| rent.user_id() == user_id))
    }
}

#[async_trait::async_trait]
impl RentModifier for InMemoryRentRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        rent: &Rent,
    ) -> error_stack::Result<(), KernelError> {
        con.staged.rents.insert(rent.id().clone(), rent.clone());
        Ok(())
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        rent: &Rent,
    ) -> error_stack::Result<(), KernelError> {
        if let Some(stored) = con.staged.rents.get_mut(rent.id()) {
            *stored = rent.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use kernel::interface::database::DatabaseConnection;
    use kernel::interface::query::{CopyQuery, RentQuery};
    use kernel::interface::update::{BookModifier, CopyModifier, RentModifier};
    use kernel::prelude::entity::{
        Book, BookAmount, BookAuthor, BookCopy, BookId, BookInfo, BookLocation, BookPublisher,
        BookSubject, BookTitle, CopyId, IsAvailable, Isbn, Rent, RentId, UserId,
    };
    use kernel::KernelError;

    use crate::database::{
        InMemoryBookRepository, InMemoryCopyRepository, InMemoryDatabase, InMemoryRentRepository,
    };

    #[tokio::test]
    async fn rents_are_listed_newest_first() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;

        let user_id = UserId::new(Uuid::new_v4());
        let copy_id = CopyId::new(Uuid::new_v4());
        let book_id = BookId::new(Uuid::new_v4());
        let start = OffsetDateTime::UNIX_EPOCH;

        let mut rents = Vec::new();
        for day in [3, 1, 2] {
            let mut rent = Rent::open(
                RentId::new(Uuid::new_v4()),
                user_id.clone(),
                copy_id.clone(),
                book_id.clone(),
                start + Duration::days(day),
            );
            if day != 3 {
                rent.close();
            }
            InMemoryRentRepository.create(&mut con, &rent).await?;
            rents.push(rent);
        }

        let listed = InMemoryRentRepository
            .find_by_user_id(&mut con, &user_id)
            .await?;
        assert_eq!(listed, vec![rents[0].clone(), rents[2].clone(), rents[1].clone()]);

        let open = InMemoryRentRepository
            .find_open_by_copy_id(&mut con, &copy_id)
            .await?;
        assert_eq!(open, Some(rents[0].clone()));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_book_removes_copies_and_rents() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;

        let book_id = BookId::new(Uuid::new_v4());
        let book = Book::new(
            book_id.clone(),
            BookTitle::new("title"),
            BookAuthor::new("author"),
            BookPublisher::new("publisher"),
            BookSubject::new("subject"),
            Isbn::new("978-4-00-000000-0"),
            BookInfo::new("info"),
            BookLocation::new("A-1-1"),
            BookAmount::new(1),
        );
        let copy = BookCopy::new(
            CopyId::new(Uuid::new_v4()),
            book_id.clone(),
            IsAvailable::new(false),
        );
        let rent = Rent::open(
            RentId::new(Uuid::new_v4()),
            UserId::new(Uuid::new_v4()),
            copy.id().clone(),
            book_id.clone(),
            OffsetDateTime::UNIX_EPOCH,
        );
        InMemoryBookRepository.create(&mut con, &book).await?;
        InMemoryCopyRepository.create(&mut con, &copy).await?;
        InMemoryRentRepository.create(&mut con, &rent).await?;

        InMemoryBookRepository.delete(&mut con, &book_id).await?;

        assert!(InMemoryCopyRepository
            .find_by_book_id(&mut con, &book_id)
            .await?
            .is_empty());
        assert!(InMemoryRentRepository
            .find_by_copy_id(&mut con, copy.id())
            .await?
            .is_empty());
        Ok(())
    }
}
