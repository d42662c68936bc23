use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::Report;
use serde_json::json;

use kernel::{KernelError, LendingError};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub enum ErrorStatus {
    Kernel(Report<KernelError>),
    Lending(Report<LendingError>),
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus::Kernel(e)
    }
}

impl From<Report<LendingError>> for ErrorStatus {
    fn from(e: Report<LendingError>) -> Self {
        ErrorStatus::Lending(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> Response {
        match self {
            ErrorStatus::Kernel(report) => {
                let status = match report.current_context() {
                    KernelError::Concurrency => StatusCode::CONFLICT,
                    KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
                    KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!("{report:?}");
                }
                status.into_response()
            }
            ErrorStatus::Lending(report) => lending_response(*report.current_context()),
        }
    }
}

// Rejections carry a machine readable body so clients can tell them apart.
fn lending_response(error: LendingError) -> Response {
    let message = error.to_string();
    match error {
        LendingError::NotFound(resource) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "not_found", "resource": resource, "message": message })),
        )
            .into_response(),
        LendingError::CopyUnavailable => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "copy_unavailable", "message": message })),
        )
            .into_response(),
        LendingError::AlreadyReturned => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "already_returned", "message": message })),
        )
            .into_response(),
        LendingError::BorrowerIneligible(reason) => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "borrower_ineligible", "reason": reason, "message": message })),
        )
            .into_response(),
        LendingError::BorrowFailed | LendingError::ReturnFailed => {
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;

    use kernel::{IneligibleReason, KernelError, LendingError, Resource};

    use crate::error::ErrorStatus;

    fn status(error: LendingError) -> StatusCode {
        ErrorStatus::from(Report::new(error)).into_response().status()
    }

    #[test]
    fn lending_errors_map_to_status() {
        assert_eq!(
            status(LendingError::NotFound(Resource::Copy)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status(LendingError::CopyUnavailable), StatusCode::CONFLICT);
        assert_eq!(status(LendingError::AlreadyReturned), StatusCode::CONFLICT);
        assert_eq!(
            status(LendingError::BorrowerIneligible(IneligibleReason::Overdue)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status(LendingError::BorrowFailed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(LendingError::ReturnFailed),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn kernel_errors_map_to_status() {
        let status = |error: KernelError| {
            ErrorStatus::from(Report::new(error))
                .into_response()
                .status()
        };
        assert_eq!(status(KernelError::Concurrency), StatusCode::CONFLICT);
        assert_eq!(status(KernelError::Timeout), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(status(KernelError::Internal), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
