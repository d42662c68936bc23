use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct IsAvailable(bool);

impl IsAvailable {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}

impl Default for IsAvailable {
    fn default() -> Self {
        Self(true)
    }
}
