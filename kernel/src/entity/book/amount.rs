use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Number of copies catalogued for a book.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookAmount(i32);

impl BookAmount {
    /// Most copies a single `CreateBook` catalogues.
    pub const CREATE_LIMIT: i32 = 1000;

    pub fn new(amount: impl Into<i32>) -> Self {
        Self(amount.into())
    }

    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}
