use crate::controller::Exhaust;
use application::transfer::UserDto;
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
pub struct UserResponse {
    id: Uuid,
    name: String,
    confirmed: bool,
    rent_count: i32,
}

impl IntoResponse for UserResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl From<UserDto> for UserResponse {
    fn from(value: UserDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            confirmed: value.confirmed,
            rent_count: value.rent_count,
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

impl Exhaust<Option<UserDto>> for Presenter {
    type To = Option<UserResponse>;
    fn emit(&self, output: Option<UserDto>) -> Self::To {
        output.map(UserResponse::from)
    }
}

impl Exhaust<()> for Presenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}
