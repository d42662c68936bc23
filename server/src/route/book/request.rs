use crate::controller::Intake;
use application::transfer::{
    AddCopyDto, CreateBookDto, DeleteBookDto, GetBookDto, GetCopiesFromBookIdDto,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    title: String,
    author: String,
    publisher: String,
    subject: String,
    isbn: String,
    #[serde(default)]
    info: String,
    #[serde(default)]
    location: String,
    amount: i32,
}

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct DeleteRequest {
    id: Uuid,
}

impl DeleteRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

#[derive(Debug)]
pub struct GetCopiesRequest {
    book_id: Uuid,
}

impl GetCopiesRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

#[derive(Debug)]
pub struct AddCopyRequest {
    book_id: Uuid,
}

impl AddCopyRequest {
    pub fn new(book_id: Uuid) -> Self {
        Self { book_id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateRequest) -> Self::To {
        CreateBookDto {
            title: input.title,
            author: input.author,
            publisher: input.publisher,
            subject: input.subject,
            isbn: input.isbn,
            info: input.info,
            location: input.location,
            amount: input.amount,
        }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetBookDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetBookDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteBookDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteBookDto { id: input.id }
    }
}

impl Intake<GetCopiesRequest> for Transformer {
    type To = GetCopiesFromBookIdDto;
    fn emit(&self, input: GetCopiesRequest) -> Self::To {
        GetCopiesFromBookIdDto {
            book_id: input.book_id,
        }
    }
}

impl Intake<AddCopyRequest> for Transformer {
    type To = AddCopyDto;
    fn emit(&self, input: AddCopyRequest) -> Self::To {
        AddCopyDto {
            book_id: input.book_id,
        }
    }
}
