use crate::controller::Intake;
use application::transfer::{ConfirmUserDto, CreateUserDto, DeleteUserDto, GetUserDto};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    name: String,
    #[serde(default)]
    confirmed: bool,
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
pub struct ConfirmRequest {
    id: Uuid,
}

impl ConfirmRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<CreateRequest> for Transformer {
    type To = CreateUserDto;
    fn emit(&self, CreateRequest { name, confirmed }: CreateRequest) -> Self::To {
        CreateUserDto { name, confirmed }
    }
}

impl Intake<GetRequest> for Transformer {
    type To = GetUserDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetUserDto { id: input.id }
    }
}

impl Intake<DeleteRequest> for Transformer {
    type To = DeleteUserDto;
    fn emit(&self, input: DeleteRequest) -> Self::To {
        DeleteUserDto { id: input.id }
    }
}

impl Intake<ConfirmRequest> for Transformer {
    type To = ConfirmUserDto;
    fn emit(&self, input: ConfirmRequest) -> Self::To {
        ConfirmUserDto { id: input.id }
    }
}
