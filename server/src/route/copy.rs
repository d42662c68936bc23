mod request;
mod response;

pub(super) use self::response::CopyResponse;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::copy::request::{GetRequest, Transformer};
use crate::route::copy::response::Presenter;
use application::service::GetCopyService;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use uuid::Uuid;

pub trait CopyRouter {
    fn route_copy(self) -> Self;
}

impl CopyRouter for Router<AppModule> {
    fn route_copy(self) -> Self {
        self.route(
            "/copies/:id",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(GetRequest::new(id))
                        .handle(|dto| async move { module.database().get_copy(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                        .map(|res| {
                            res.map(CopyResponse::into_response)
                                .unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
                        })
                },
            ),
        )
    }
}
