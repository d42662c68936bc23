use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{
    BookQuery, CopyQuery, DependOnBookQuery, DependOnCopyQuery, DependOnRentQuery,
    DependOnUserQuery, RentQuery, UserQuery,
};
use kernel::interface::update::{
    BookModifier, CopyModifier, DependOnBookModifier, DependOnCopyModifier, DependOnUserModifier,
    UserModifier,
};
use kernel::prelude::entity::{
    Book, BookAmount, BookAuthor, BookCopy, BookId, BookInfo, BookLocation, BookPublisher,
    BookSubject, BookTitle, CopyId, IsAvailable, Isbn,
};
use kernel::KernelError;

use crate::transfer::{
    AddCopyDto, BookDto, CopyDto, CreateBookDto, DeleteBookDto, GetBookDto, GetCopiesFromBookIdDto,
    GetCopyDto,
};

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_book(&self, dto: GetBookDto) -> error_stack::Result<Option<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = BookId::new(dto.id);
        let book = self.book_query().find_by_id(&mut connection, &id).await?;

        Ok(book.map(BookDto::from))
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait CreateBookService:
    'static + Sync + Send + DependOnBookModifier + DependOnCopyModifier
{
    /// Catalogues a book together with `amount` copies, all on the shelf.
    ///
    /// `amount` is clamped into `0..=BookAmount::CREATE_LIMIT`.
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<Uuid, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let uuid = Uuid::new_v4();
        let id = BookId::new(uuid);
        let amount = dto.amount.clamp(0, BookAmount::CREATE_LIMIT);
        let book = Book::new(
            id.clone(),
            BookTitle::new(dto.title),
            BookAuthor::new(dto.author),
            BookPublisher::new(dto.publisher),
            BookSubject::new(dto.subject),
            Isbn::new(dto.isbn),
            BookInfo::new(dto.info),
            BookLocation::new(dto.location),
            BookAmount::new(amount),
        );
        self.book_modifier().create(&mut connection, &book).await?;

        for _ in 0..amount {
            let copy = BookCopy::new(
                CopyId::new(Uuid::new_v4()),
                id.clone(),
                IsAvailable::default(),
            );
            self.copy_modifier().create(&mut connection, &copy).await?;
        }
        connection.commit().await?;

        tracing::info!(book_id = %uuid, amount, "Book created");
        Ok(uuid)
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier + DependOnCopyModifier {}

#[async_trait::async_trait]
pub trait AddCopyService:
    'static + Sync + Send + DependOnBookQuery + DependOnBookModifier + DependOnCopyModifier
{
    /// Adds one shelved copy to an existing book. Returns `None` when the book is unknown.
    async fn add_copy(&self, dto: AddCopyDto) -> error_stack::Result<Option<Uuid>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let Some(mut book) = self.book_query().lock_by_id(&mut connection, &book_id).await? else {
            return Ok(None);
        };

        let uuid = Uuid::new_v4();
        let copy = BookCopy::new(CopyId::new(uuid), book_id, IsAvailable::default());
        book.substitute(|book| *book.amount = book.amount.increment());

        self.copy_modifier().create(&mut connection, &copy).await?;
        self.book_modifier().update(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(Some(uuid))
    }
}

impl<T> AddCopyService for T where
    T: DependOnBookQuery + DependOnBookModifier + DependOnCopyModifier
{
}

#[async_trait::async_trait]
pub trait DeleteBookService:
    'static
    + Sync
    + Send
    + DependOnBookQuery
    + DependOnBookModifier
    + DependOnCopyQuery
    + DependOnRentQuery
    + DependOnUserQuery
    + DependOnUserModifier
{
    /// Deletes the book with its copies and rents.
    ///
    /// Holders of copies that are still out get their rent count decreased so the
    /// count keeps matching their open rents.
    async fn delete_book(&self, dto: DeleteBookDto) -> error_stack::Result<(), KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.id);
        // book first, so no copy can be added while its holders are released
        if self
            .book_query()
            .lock_by_id(&mut connection, &book_id)
            .await?
            .is_none()
        {
            return Ok(());
        }
        let copies = self
            .copy_query()
            .find_by_book_id(&mut connection, &book_id)
            .await?;

        for copy in copies {
            let copy = self
                .copy_query()
                .lock_by_id(&mut connection, copy.id())
                .await?;
            let Some(copy) = copy.filter(BookCopy::can_return) else {
                continue;
            };
            let Some(rent) = self
                .rent_query()
                .find_open_by_copy_id(&mut connection, copy.id())
                .await?
            else {
                continue;
            };
            if let Some(mut user) = self
                .user_query()
                .lock_by_id(&mut connection, rent.user_id())
                .await?
            {
                user.finish_rent();
                self.user_modifier().update(&mut connection, &user).await?;
            }
        }

        self.book_modifier()
            .delete(&mut connection, &book_id)
            .await?;
        connection.commit().await?;

        tracing::info!(book_id = %dto.id, "Book deleted");
        Ok(())
    }
}

impl<T> DeleteBookService for T where
    T: DependOnBookQuery
        + DependOnBookModifier
        + DependOnCopyQuery
        + DependOnRentQuery
        + DependOnUserQuery
        + DependOnUserModifier
{
}

#[async_trait::async_trait]
pub trait GetCopyService: 'static + Sync + Send + DependOnCopyQuery {
    async fn get_copy(&self, dto: GetCopyDto) -> error_stack::Result<Option<CopyDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let id = CopyId::new(dto.id);
        let copy = self.copy_query().find_by_id(&mut connection, &id).await?;

        Ok(copy.map(CopyDto::from))
    }

    async fn get_copies(
        &self,
        dto: GetCopiesFromBookIdDto,
    ) -> error_stack::Result<Vec<CopyDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;

        let book_id = BookId::new(dto.book_id);
        let copies = self
            .copy_query()
            .find_by_book_id(&mut connection, &book_id)
            .await?;

        Ok(copies.into_iter().map(CopyDto::from).collect())
    }
}

impl<T> GetCopyService for T where T: DependOnCopyQuery {}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use kernel::prelude::entity::BookAmount;

    use crate::service::fixture::{book, book_dto, database, user};
    use crate::service::{
        AddCopyService, BorrowCopyService, CreateBookService, DeleteBookService, GetBookService,
        GetCopyService, GetRentService, GetUserService,
    };
    use crate::transfer::{
        AddCopyDto, BorrowCopyDto, DeleteBookDto, GetBookDto, GetCopiesFromBookIdDto, GetCopyDto,
        GetRentsFromUserIdDto, GetUserDto,
    };

    #[tokio::test]
    async fn created_book_has_shelved_copies() {
        let (db, _) = database();
        let dto = book_dto(3);
        let isbn = dto.isbn.clone();

        let id = db.create_book(dto).await.unwrap();

        let found = db.get_book(GetBookDto { id }).await.unwrap().unwrap();
        assert_eq!(found.isbn, isbn);
        assert_eq!(found.amount, 3);
        let copies = db
            .get_copies(GetCopiesFromBookIdDto { book_id: id })
            .await
            .unwrap();
        assert_eq!(copies.len(), 3);
        assert!(copies.iter().all(|copy| copy.can_borrow() && copy.book_id == id));
    }

    #[tokio::test]
    async fn negative_amount_creates_no_copies() {
        let (db, _) = database();

        let id = db.create_book(book_dto(-2)).await.unwrap();

        let found = db.get_book(GetBookDto { id }).await.unwrap().unwrap();
        assert_eq!(found.amount, 0);
        assert!(db
            .get_copies(GetCopiesFromBookIdDto { book_id: id })
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn oversized_amount_is_capped() {
        let (db, _) = database();

        let id = db.create_book(book_dto(i32::MAX)).await.unwrap();

        let found = db.get_book(GetBookDto { id }).await.unwrap().unwrap();
        assert_eq!(found.amount, BookAmount::CREATE_LIMIT);
        let copies = db
            .get_copies(GetCopiesFromBookIdDto { book_id: id })
            .await
            .unwrap();
        assert_eq!(copies.len(), BookAmount::CREATE_LIMIT as usize);
    }

    #[tokio::test]
    async fn same_isbn_can_be_catalogued_twice() {
        let (db, _) = database();
        let first = book_dto(1);
        let mut second = book_dto(1);
        second.isbn = first.isbn.clone();

        let first = db.create_book(first).await.unwrap();
        let second = db.create_book(second).await.unwrap();

        assert_ne!(first, second);
        let first = db.get_book(GetBookDto { id: first }).await.unwrap().unwrap();
        let second = db.get_book(GetBookDto { id: second }).await.unwrap().unwrap();
        assert_eq!(first.isbn, second.isbn);
    }

    #[tokio::test]
    async fn added_copy_is_counted() {
        let (db, _) = database();
        let (book_id, _) = book(&db, 1).await;

        let copy_id = db.add_copy(AddCopyDto { book_id }).await.unwrap().unwrap();

        let copy = db.get_copy(GetCopyDto { id: copy_id }).await.unwrap().unwrap();
        assert!(copy.can_borrow());
        let found = db.get_book(GetBookDto { id: book_id }).await.unwrap().unwrap();
        assert_eq!(found.amount, 2);

        let missing = db
            .add_copy(AddCopyDto {
                book_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_added_copies_are_all_counted() {
        let (db, _) = database();
        let (book_id, _) = book(&db, 1).await;

        let handles = (0..8)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.add_copy(AddCopyDto { book_id }).await })
            })
            .collect::<Vec<_>>();
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_some());
        }

        let found = db.get_book(GetBookDto { id: book_id }).await.unwrap().unwrap();
        let copies = db
            .get_copies(GetCopiesFromBookIdDto { book_id })
            .await
            .unwrap();
        assert_eq!(copies.len(), 9);
        assert_eq!(found.amount, 9);
    }

    #[tokio::test]
    async fn deleting_book_releases_its_holders() {
        let (db, _) = database();
        let (book_id, copies) = book(&db, 2).await;
        let (_, others) = book(&db, 1).await;
        let user_id = user(&db, true).await;
        for copy_id in [copies[0], others[0]] {
            db.borrow_copy(BorrowCopyDto { copy_id, user_id })
                .await
                .unwrap();
        }

        db.delete_book(DeleteBookDto { id: book_id }).await.unwrap();

        assert!(db.get_book(GetBookDto { id: book_id }).await.unwrap().is_none());
        assert!(db
            .get_copy(GetCopyDto { id: copies[0] })
            .await
            .unwrap()
            .is_none());
        let user = db.get_user(GetUserDto { id: user_id }).await.unwrap().unwrap();
        assert_eq!(user.rent_count, 1);
        let rents = db
            .get_rents_from_user(GetRentsFromUserIdDto { user_id })
            .await
            .unwrap();
        assert_eq!(rents.len(), 1);
        assert_eq!(rents[0].copy_id, others[0]);

        // deleting again is a no-op
        db.delete_book(DeleteBookDto { id: book_id }).await.unwrap();
    }
}
