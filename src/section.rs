//! Section types and their status vocabulary.
//!
//! HAProxy reports a different "healthy" token depending on what is being
//! checked: backends are `UP`, frontends are `OPEN`. Both use `DOWN` for a
//! failed service. Anything else (`MAINT`, `NOLB`, `STOP`, ...) is treated as
//! an unrecognized state.

use crate::error::CheckError;
use std::fmt;
use std::str::FromStr;

/// Status token HAProxy uses for a failed service in every section.
pub const DOWN_STATUS: &str = "DOWN";

/// Which part of the HAProxy configuration is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionType {
    Backends,
    Frontends,
}

/// Bucket a single status falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Healthy,
    Down,
    Other,
}

impl SectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Backends => "backends",
            SectionType::Frontends => "frontends",
        }
    }

    /// Status token that means the service is healthy.
    pub fn healthy_status(self) -> &'static str {
        match self {
            SectionType::Backends => "UP",
            SectionType::Frontends => "OPEN",
        }
    }

    /// Classifies a raw status string. Matching is exact and case-sensitive.
    pub fn bucket(self, status: &str) -> Bucket {
        if status == self.healthy_status() {
            Bucket::Healthy
        } else if status == DOWN_STATUS {
            Bucket::Down
        } else {
            Bucket::Other
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backends" => Ok(SectionType::Backends),
            "frontends" => Ok(SectionType::Frontends),
            other => Err(CheckError::Argument(format!(
                "Bad value '{}'! Possible values are backends or frontends!",
                other
            ))),
        }
    }
}
