use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

// Set once the account's email address has been verified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Fromln, AsRefln, Serialize, Deserialize)]
pub struct IsConfirmed(bool);

impl IsConfirmed {
    pub fn new(value: impl Into<bool>) -> Self {
        Self(value.into())
    }
}
