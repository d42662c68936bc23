use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use driver::clock::ManualClock;
use driver::database::InMemoryDatabase;

use crate::service::{CreateBookService, CreateUserService, GetCopyService};
use crate::transfer::{CreateBookDto, CreateUserDto, GetCopiesFromBookIdDto};

pub type TestDatabase = InMemoryDatabase<ManualClock>;

pub fn start() -> OffsetDateTime {
    OffsetDateTime::UNIX_EPOCH + Duration::days(19_000)
}

pub fn database() -> (TestDatabase, ManualClock) {
    let clock = ManualClock::new(start());
    (InMemoryDatabase::with_clock(clock.clone()), clock)
}

pub fn book_dto(amount: i32) -> CreateBookDto {
    CreateBookDto {
        title: "The Rust Programming Language".to_string(),
        author: "Steve Klabnik".to_string(),
        publisher: "No Starch Press".to_string(),
        subject: "programming".to_string(),
        isbn: Uuid::new_v4().to_string(),
        info: "2nd edition".to_string(),
        location: "B-3-12".to_string(),
        amount,
    }
}

/// Catalogues a book and returns `(book_id, copy_ids)`.
pub async fn book(db: &TestDatabase, amount: i32) -> (Uuid, Vec<Uuid>) {
    let book_id = db.create_book(book_dto(amount)).await.unwrap();
    let copies = db
        .get_copies(GetCopiesFromBookIdDto { book_id })
        .await
        .unwrap()
        .into_iter()
        .map(|copy| copy.id)
        .collect();
    (book_id, copies)
}

pub async fn user(db: &TestDatabase, confirmed: bool) -> Uuid {
    db.create_user(CreateUserDto {
        name: "reader".to_string(),
        confirmed,
    })
    .await
    .unwrap()
}
