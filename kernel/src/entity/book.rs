mod amount;
mod id;
mod isbn;
mod profile;
mod title;

pub use self::{amount::*, id::*, isbn::*, profile::*, title::*};
use destructure::{Destructure, Mutation};
use vodca::References;

#[derive(Debug, Clone, Eq, PartialEq, References, Destructure, Mutation)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author: BookAuthor,
    publisher: BookPublisher,
    subject: BookSubject,
    isbn: Isbn,
    info: BookInfo,
    location: BookLocation,
    amount: BookAmount,
}

impl Book {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: BookId,
        title: BookTitle,
        author: BookAuthor,
        publisher: BookPublisher,
        subject: BookSubject,
        isbn: Isbn,
        info: BookInfo,
        location: BookLocation,
        amount: BookAmount,
    ) -> Self {
        Self {
            id,
            title,
            author,
            publisher,
            subject,
            isbn,
            info,
            location,
            amount,
        }
    }
}
