use crate::controller::Intake;
use application::transfer::GetCopyDto;
use uuid::Uuid;

#[derive(Debug)]
pub struct GetRequest {
    id: Uuid,
}

impl GetRequest {
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }
}

pub struct Transformer;

impl Intake<GetRequest> for Transformer {
    type To = GetCopyDto;
    fn emit(&self, input: GetRequest) -> Self::To {
        GetCopyDto { id: input.id }
    }
}
