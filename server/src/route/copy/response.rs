use crate::controller::Exhaust;
use application::transfer::CopyDto;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct CopyResponse {
    id: Uuid,
    book_id: Uuid,
    available: bool,
}

impl From<CopyDto> for CopyResponse {
    fn from(value: CopyDto) -> Self {
        Self {
            id: value.id,
            book_id: value.book_id,
            available: value.available,
        }
    }
}

impl IntoResponse for CopyResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<Option<CopyDto>> for Presenter {
    type To = Option<CopyResponse>;
    fn emit(&self, output: Option<CopyDto>) -> Self::To {
        output.map(CopyResponse::from)
    }
}
