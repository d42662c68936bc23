mod request;
mod response;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::route::rent::request::{
    BorrowRequest, CopyRentsRequest, OverdueRequest, ReturnRequest, Transformer,
    UserRentsRequest,
};
use crate::route::rent::response::Presenter;
use application::service::{BorrowCopyService, GetRentService, ReturnCopyService};
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

pub trait RentRouter {
    fn route_rent(self) -> Self;
}

impl RentRouter for Router<AppModule> {
    fn route_rent(self) -> Self {
        self.route(
            "/copies/:id/borrow",
            post(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<BorrowRequest>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake((id, req))
                        .handle(|dto| async move { module.database().borrow_copy(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/copies/:id/return",
            post(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(ReturnRequest::new(id))
                        .handle(|dto| async move { module.database().return_copy(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/copies/:id/rents",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(CopyRentsRequest::new(id))
                        .handle(|dto| async move {
                            module.database().get_rents_from_copy(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/rents",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(UserRentsRequest::new(id))
                        .handle(|dto| async move {
                            module.database().get_rents_from_user(dto).await
                        })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/users/:id/overdue",
            get(
                |State(module): State<AppModule>, Path(id): Path<Uuid>| async move {
                    Controller::new(Transformer, Presenter)
                        .intake(OverdueRequest::new(id))
                        .handle(|dto| async move { module.database().get_overdue_rents(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
