//! Overall verdict of one plugin run and its exit-code mapping.

use std::fmt;

/// The single aggregated health outcome of an invocation.
///
/// Each verdict maps 1:1 to the process exit code a monitoring scheduler
/// reads. `Warning` is part of the plugin protocol but the current policy
/// never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Ok,
    Warning,
    Error,
    Unknown,
}

impl Verdict {
    /// Exit code handed to `std::process::exit`.
    ///
    /// `Unknown` is `-1`, which unix platforms report as `255`.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Ok => 0,
            Verdict::Warning => 1,
            Verdict::Error => 2,
            Verdict::Unknown => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Warning => "WARNING",
            Verdict::Error => "ERROR",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
