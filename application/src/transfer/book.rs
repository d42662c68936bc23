use uuid::Uuid;

use kernel::prelude::entity::{Book, DestructBook};

#[derive(Debug, Clone)]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub subject: String,
    pub isbn: String,
    pub info: String,
    pub location: String,
    pub amount: i32,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook {
            id,
            title,
            author,
            publisher,
            subject,
            isbn,
            info,
            location,
            amount,
        } = value.into_destruct();
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            publisher: publisher.into(),
            subject: subject.into(),
            isbn: isbn.into(),
            info: info.into(),
            location: location.into(),
            amount: amount.into(),
        }
    }
}

pub struct GetBookDto {
    pub id: Uuid,
}

pub struct CreateBookDto {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub subject: String,
    pub isbn: String,
    pub info: String,
    pub location: String,
    pub amount: i32,
}

pub struct DeleteBookDto {
    pub id: Uuid,
}
