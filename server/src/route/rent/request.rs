use crate::controller::Intake;
use application::transfer::{
    BorrowCopyDto, GetOverdueRentsDto, GetRentsFromCopyIdDto, GetRentsFromUserIdDto,
    ReturnCopyDto,
};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct BorrowRequest {
    user_id: Uuid,
}

#[derive(Debug)]
pub struct ReturnRequest {
    copy_id: Uuid,
}

impl ReturnRequest {
    pub fn new(copy_id: Uuid) -> Self {
        Self { copy_id }
    }
}

#[derive(Debug)]
pub struct CopyRentsRequest {
    copy_id: Uuid,
}

impl CopyRentsRequest {
    pub fn new(copy_id: Uuid) -> Self {
        Self { copy_id }
    }
}

#[derive(Debug)]
pub struct UserRentsRequest {
    user_id: Uuid,
}

impl UserRentsRequest {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[derive(Debug)]
pub struct OverdueRequest {
    user_id: Uuid,
}

impl OverdueRequest {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

pub struct Transformer;

impl Intake<(Uuid, BorrowRequest)> for Transformer {
    type To = BorrowCopyDto;
    fn emit(&self, (copy_id, BorrowRequest { user_id }): (Uuid, BorrowRequest)) -> Self::To {
        BorrowCopyDto { copy_id, user_id }
    }
}

impl Intake<ReturnRequest> for Transformer {
    type To = ReturnCopyDto;
    fn emit(&self, ReturnRequest { copy_id }: ReturnRequest) -> Self::To {
        ReturnCopyDto { copy_id }
    }
}

impl Intake<CopyRentsRequest> for Transformer {
    type To = GetRentsFromCopyIdDto;
    fn emit(&self, CopyRentsRequest { copy_id }: CopyRentsRequest) -> Self::To {
        GetRentsFromCopyIdDto { copy_id }
    }
}

impl Intake<UserRentsRequest> for Transformer {
    type To = GetRentsFromUserIdDto;
    fn emit(&self, UserRentsRequest { user_id }: UserRentsRequest) -> Self::To {
        GetRentsFromUserIdDto { user_id }
    }
}

impl Intake<OverdueRequest> for Transformer {
    type To = GetOverdueRentsDto;
    fn emit(&self, OverdueRequest { user_id }: OverdueRequest) -> Self::To {
        GetOverdueRentsDto { user_id }
    }
}
