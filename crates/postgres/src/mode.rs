//! PostgreSQL lock modes

use lockview_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight table-level lock modes, weakest to strongest.
///
/// `pg_locks` can also surface modes outside this taxonomy (SIRead
/// predicate locks); those never participate in the conflict table and are
/// rejected by `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PgLockMode {
    AccessShare,
    RowShare,
    RowExclusive,
    ShareUpdateExclusive,
    Share,
    ShareRowExclusive,
    Exclusive,
    AccessExclusive,
}

impl PgLockMode {
    /// All modes, weakest to strongest.
    pub const ALL: [Self; 8] = [
        Self::AccessShare,
        Self::RowShare,
        Self::RowExclusive,
        Self::ShareUpdateExclusive,
        Self::Share,
        Self::ShareRowExclusive,
        Self::Exclusive,
        Self::AccessExclusive,
    ];

    /// The spelling `pg_locks.mode` uses.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessShare => "AccessShareLock",
            Self::RowShare => "RowShareLock",
            Self::RowExclusive => "RowExclusiveLock",
            Self::ShareUpdateExclusive => "ShareUpdateExclusiveLock",
            Self::Share => "ShareLock",
            Self::ShareRowExclusive => "ShareRowExclusiveLock",
            Self::Exclusive => "ExclusiveLock",
            Self::AccessExclusive => "AccessExclusiveLock",
        }
    }
}

impl fmt::Display for PgLockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PgLockMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AccessShareLock" => Ok(Self::AccessShare),
            "RowShareLock" => Ok(Self::RowShare),
            "RowExclusiveLock" => Ok(Self::RowExclusive),
            "ShareUpdateExclusiveLock" => Ok(Self::ShareUpdateExclusive),
            "ShareLock" => Ok(Self::Share),
            "ShareRowExclusiveLock" => Ok(Self::ShareRowExclusive),
            "ExclusiveLock" => Ok(Self::Exclusive),
            "AccessExclusiveLock" => Ok(Self::AccessExclusive),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}
