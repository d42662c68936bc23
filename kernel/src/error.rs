use std::fmt::Display;

use error_stack::Context;
use serde::Serialize;

#[derive(Debug)]
pub enum KernelError {
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Book,
    Copy,
    User,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Book => write!(f, "book"),
            Resource::Copy => write!(f, "copy"),
            Resource::User => write!(f, "user"),
        }
    }
}

/// Why a user may not start a new rent right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    /// An unreturned rent is past its due time.
    Overdue,
    /// The account has not been confirmed yet.
    NotConfirmed,
    /// The user already holds the maximum number of rents.
    LimitReached,
}

impl Display for IneligibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IneligibleReason::Overdue => write!(f, "user has an overdue rent"),
            IneligibleReason::NotConfirmed => write!(f, "user is not confirmed"),
            IneligibleReason::LimitReached => write!(f, "user reached the rent limit"),
        }
    }
}

/// Outcome taxonomy of borrow and return operations.
///
/// `CopyUnavailable`, `BorrowerIneligible` and `AlreadyReturned` are business rule
/// rejections. `BorrowFailed` and `ReturnFailed` wrap storage failures and nothing
/// has been written when they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingError {
    NotFound(Resource),
    CopyUnavailable,
    BorrowerIneligible(IneligibleReason),
    AlreadyReturned,
    BorrowFailed,
    ReturnFailed,
}

impl LendingError {
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            LendingError::CopyUnavailable
                | LendingError::BorrowerIneligible(_)
                | LendingError::AlreadyReturned
        )
    }
}

impl Display for LendingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LendingError::NotFound(resource) => write!(f, "{resource} not found"),
            LendingError::CopyUnavailable => write!(f, "Copy is already checked out"),
            LendingError::BorrowerIneligible(reason) => write!(f, "Cannot borrow: {reason}"),
            LendingError::AlreadyReturned => write!(f, "Copy is not rented"),
            LendingError::BorrowFailed => write!(f, "Failed to store the rent"),
            LendingError::ReturnFailed => write!(f, "Failed to store the return"),
        }
    }
}

impl Context for LendingError {}
