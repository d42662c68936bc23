use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use vodca::{AsRefln, Fromln};

/// How long a copy may be kept before the rent becomes overdue.
pub const RENT_PERIOD: Duration = Duration::days(15);

#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct RentedAt(OffsetDateTime);

impl RentedAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Fromln, AsRefln, Serialize, Deserialize,
)]
pub struct DueAt(OffsetDateTime);

impl DueAt {
    pub fn new(time: impl Into<OffsetDateTime>) -> Self {
        Self(time.into())
    }
}
