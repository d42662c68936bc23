use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Highest rent count that still admits one more rent.
///
/// The comparison is inclusive, so a user holding exactly this many rents may
/// take one more.
pub const RENT_LIMIT: i32 = 5;

/// Number of rents a user currently holds.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Fromln, AsRefln, Serialize, Deserialize)]
pub struct RentCount(i32);

impl RentCount {
    pub fn new(count: impl Into<i32>) -> Self {
        Self(count.into())
    }

    pub fn admits_another(&self) -> bool {
        self.0 <= RENT_LIMIT
    }

    pub fn increment(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn decrement(&self) -> Self {
        Self(self.0.saturating_sub(1).max(0))
    }
}
