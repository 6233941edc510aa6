//! HAProxy State Check Library
//!
//! Monitoring-plugin logic for HAProxy: query the admin sockets of every
//! HAProxy process, classify frontend or backend states and reduce them to a
//! single Nagios-style verdict.
//!
//! # Features
//!
//! - **Admin Socket Client**: `show stat` over every UNIX socket in a directory
//! - **Section Policies**: `UP` is healthy for backends, `OPEN` for frontends
//! - **Strict Precedence**: DOWN plus unrecognized states is an ERROR, never hidden
//! - **Exclusions**: exact-name exclusion list from `/etc/haproxy-status.ini`
//!
//! # Usage
//!
//! ```rust
//! use haproxy_state_check::{classify, reduce, ExclusionSet, SectionType, ServiceMap, Verdict};
//!
//! let mut services = ServiceMap::new();
//! services.insert("web1".to_string(), "UP".to_string());
//! services.insert("web2".to_string(), "DOWN".to_string());
//!
//! let classification = classify(&services, &ExclusionSet::new(), SectionType::Backends);
//! let finding = reduce(&classification);
//! assert_eq!(finding.verdict(), Verdict::Error);
//! ```

pub mod check;
pub mod classifier;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod haproxy;
pub mod report;
pub mod section;
pub mod status;

// Re-export main types for convenience
pub use check::{evaluate, run_check, Invocation};
pub use classifier::{classify, reduce, Classification, ExclusionSet, Finding, ServiceMap};
pub use error::CheckError;
pub use fetcher::{fetch, ServiceSource};
pub use report::Report;
pub use section::SectionType;
pub use status::Verdict;
