//! Identity and timestamp assignment for stored records.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use uuid::Uuid;

/// Identity and creation time handed to a record inside `create`.
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    pub id: Uuid,
    pub at: DateTime<Utc>,
}

impl Stamp {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            at: now(),
        }
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time at the precision the database keeps (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Next `updated_at` for a record last modified at `previous`.
///
/// Always strictly later than `previous`, even when the clock has not
/// advanced a full microsecond since.
pub fn touch(previous: DateTime<Utc>) -> DateTime<Utc> {
    now().max(previous + Duration::microseconds(1))
}
