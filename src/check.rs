//! The check pipeline: resolve inputs, fetch, classify, report.

use crate::classifier::{self, ExclusionSet, Finding};
use crate::config;
use crate::error::CheckError;
use crate::fetcher::{self, ServiceSource};
use crate::haproxy::HaProxy;
use crate::report::Report;
use crate::section::SectionType;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Validated parameters of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub sockets_path: PathBuf,
    pub section: SectionType,
    pub exclusions: ExclusionSet,
}

impl Invocation {
    /// Validates the raw parameters and loads the exclusion list.
    ///
    /// Both the sockets path and the section type must be present and the
    /// section type must be `backends` or `frontends`. The exclusion config at
    /// `config_path` is optional and never fails the run.
    pub fn resolve(
        sockets_path: Option<&Path>,
        section_type: Option<&str>,
        config_path: Option<&Path>,
    ) -> Result<Self, CheckError> {
        let sockets_path = match sockets_path {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => {
                return Err(CheckError::Argument(
                    "Please enter the path to HAProxy sockets!".into(),
                ))
            }
        };
        let section = match section_type {
            Some(s) => s.parse::<SectionType>()?,
            None => {
                return Err(CheckError::Argument(
                    "Please select backends or frontends!".into(),
                ))
            }
        };

        Ok(Self {
            sockets_path,
            section,
            exclusions: config::load_exclusions(config_path),
        })
    }
}

/// Fetches and classifies one section from `source`.
///
/// An empty fetch is `Finding::Empty` regardless of the exclusion list.
pub fn evaluate<S: ServiceSource + ?Sized>(
    section: SectionType,
    source: &S,
    exclusions: &ExclusionSet,
) -> Result<Finding, CheckError> {
    let services = fetcher::fetch(section, source)?;
    if services.is_empty() {
        debug!("HAProxy reported no {}", section);
        return Ok(Finding::Empty);
    }

    let classification = classifier::classify(&services, exclusions, section);
    debug!(
        "{}: {} healthy, {} down, {} other, {} excluded",
        section,
        classification.healthy.len(),
        classification.down.len(),
        classification.other.len(),
        services.len() - classification.len()
    );

    Ok(classifier::reduce(&classification))
}

/// Runs a full check against the admin sockets of `invocation`.
pub fn run_check(invocation: &Invocation) -> Report {
    match try_check(invocation) {
        Ok(finding) => Report::from_finding(invocation.section, &finding),
        Err(e) => Report::from_error(&e),
    }
}

fn try_check(invocation: &Invocation) -> Result<Finding, CheckError> {
    let haproxy = HaProxy::connect(&invocation.sockets_path).map_err(CheckError::Connect)?;
    debug!(
        "Connected to {} HAProxy socket(s) in {}",
        haproxy.sockets().count(),
        invocation.sockets_path.display()
    );

    evaluate(invocation.section, &haproxy, &invocation.exclusions)
}
