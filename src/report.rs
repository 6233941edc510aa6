//! Status line and exit code of a plugin run.

use crate::classifier::{Finding, ServiceMap};
use crate::error::CheckError;
use crate::section::SectionType;
use crate::status::Verdict;
use std::fmt;
use tracing::{error, info, warn};

/// Tracing target of the status line. The log sink always lets it through
/// and sends it to stdout, independent of the diagnostic log level.
pub const VERDICT_TARGET: &str = "verdict";

/// Final result of an invocation: what to print and how to exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub verdict: Verdict,
    pub message: String,
}

impl Report {
    pub fn new(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            verdict,
            message: message.into(),
        }
    }

    pub fn from_finding(section: SectionType, finding: &Finding) -> Self {
        let message = match finding {
            Finding::Healthy { count } => {
                format!("OK: All {} {} are in the right state", count, section)
            }
            Finding::Down(down) => {
                format!("Some {} have DOWN state: {}", section, render_services(down))
            }
            Finding::Other(other) => {
                format!("UNKNOWN status of {}: {}", section, render_services(other))
            }
            Finding::Mixed(failed) => format!(
                "Some {} have DOWN or UNKNOWN state: {}",
                section,
                render_services(failed)
            ),
            Finding::Empty => format!("No {} found", section),
        };

        Self::new(finding.verdict(), message)
    }

    pub fn from_error(err: &CheckError) -> Self {
        Self::new(Verdict::Error, err.to_string())
    }

    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }

    /// Writes the status line through the log sink.
    pub fn emit(&self) {
        match self.verdict {
            Verdict::Ok => info!(target: VERDICT_TARGET, "{}", self.message),
            Verdict::Warning => warn!(target: VERDICT_TARGET, "{}", self.message),
            Verdict::Error | Verdict::Unknown => {
                error!(target: VERDICT_TARGET, "{}", self.message)
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.verdict, self.message)
    }
}

/// Renders services as a compact JSON object, e.g. `{"web2":"DOWN"}`.
fn render_services(services: &ServiceMap) -> String {
    serde_json::to_string(services).unwrap_or_else(|_| format!("{:?}", services))
}
