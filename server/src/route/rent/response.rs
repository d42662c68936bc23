use crate::controller::Exhaust;
use application::transfer::RentDto;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct RentResponse {
    id: Uuid,
    user_id: Uuid,
    copy_id: Uuid,
    book_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    rented_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    due_at: OffsetDateTime,
    returned: bool,
}

impl From<RentDto> for RentResponse {
    fn from(value: RentDto) -> Self {
        let RentDto {
            id,
            user_id,
            copy_id,
            book_id,
            rented_at,
            due_at,
            returned,
        } = value;
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
}

impl IntoResponse for RentResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub struct Presenter;

impl Exhaust<RentDto> for Presenter {
    type To = RentResponse;
    fn emit(&self, output: RentDto) -> Self::To {
        RentResponse::from(output)
    }
}

impl Exhaust<Vec<RentDto>> for Presenter {
    type To = Json<Vec<RentResponse>>;
    fn emit(&self, output: Vec<RentDto>) -> Self::To {
        Json(output.into_iter().map(RentResponse::from).collect())
    }
}
