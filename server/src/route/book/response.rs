use crate::controller::Exhaust;
use crate::route::copy::CopyResponse;
use application::transfer::{BookDto, CopyDto};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    id: Uuid,
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: Uuid,
    title: String,
    author: String,
    publisher: String,
    subject: String,
    isbn: String,
    info: String,
    location: String,
    amount: i32,
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        let BookDto {
            id,
            title,
            author,
            publisher,
            subject,
            isbn,
            info,
            location,
            amount,
        } = value;
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

pub struct Presenter;

impl Exhaust<Uuid> for Presenter {
    type To = CreatedResponse;
    fn emit(&self, output: Uuid) -> Self::To {
        CreatedResponse { id: output }
    }
}

// copy ids, `None` when the book is unknown
impl Exhaust<Option<Uuid>> for Presenter {
    type To = Option<CreatedResponse>;
    fn emit(&self, output: Option<Uuid>) -> Self::To {
        output.map(|id| CreatedResponse { id })
    }
}

impl Exhaust<Option<BookDto>> for Presenter {
    type To = Option<BookResponse>;
    fn emit(&self, output: Option<BookDto>) -> Self::To {
        output.map(BookResponse::from)
    }
}

impl Exhaust<Vec<CopyDto>> for Presenter {
    type To = Json<Vec<CopyResponse>>;
    fn emit(&self, output: Vec<CopyDto>) -> Self::To {
        Json(output.into_iter().map(CopyResponse::from).collect())
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
