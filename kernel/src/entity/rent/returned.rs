use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct IsReturned(bool);

impl IsReturned {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
