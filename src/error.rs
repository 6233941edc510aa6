//! Error types for a plugin run.

use crate::haproxy::ClientError;
use crate::section::SectionType;

/// Fatal conditions. Every variant ends the run with an ERROR verdict.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("There was a problem parsing the arguments passed to the script! - {0}")]
    Argument(String),

    #[error("Unable to connect to the HAProxy socket! - {0}")]
    Connect(#[source] ClientError),

    #[error("Unable to retrieve {section} data! - {source}")]
    Fetch {
        section: SectionType,
        #[source]
        source: ClientError,
    },
}
