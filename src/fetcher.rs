//! Retrieval of service states for one section type.

use crate::classifier::ServiceMap;
use crate::error::CheckError;
use crate::haproxy::responses::Service;
use crate::haproxy::{ClientError, HaProxy};
use crate::section::SectionType;
use tracing::debug;

/// Substring marking HAProxy's internal stats listener.
pub const STATS_MARKER: &str = "stats";

/// Anything that can list frontends and backends with their status.
pub trait ServiceSource {
    fn list_backends(&self) -> Result<Vec<Service>, ClientError>;
    fn list_frontends(&self) -> Result<Vec<Service>, ClientError>;
}

impl ServiceSource for HaProxy {
    fn list_backends(&self) -> Result<Vec<Service>, ClientError> {
        self.backends()
    }

    fn list_frontends(&self) -> Result<Vec<Service>, ClientError> {
        self.frontends()
    }
}

/// Fetches `{name: status}` for `section`, dropping the stats listener.
///
/// A successful but empty result is `Ok` with an empty map; only a client
/// failure is an error.
pub fn fetch<S: ServiceSource + ?Sized>(
    section: SectionType,
    source: &S,
) -> Result<ServiceMap, CheckError> {
    let listed = match section {
        SectionType::Backends => source.list_backends(),
        SectionType::Frontends => source.list_frontends(),
    };

    let services = listed.map_err(|err| {
        debug!(
            "There was a problem while getting or parsing {} data - {}",
            section, err
        );
        CheckError::Fetch {
            section,
            source: err,
        }
    })?;

    let map: ServiceMap = services
        .into_iter()
        .filter(|s| !s.name.contains(STATS_MARKER))
        .map(|s| (s.name, s.status))
        .collect();

    debug!("Fetched {} {}", map.len(), section);
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct StaticSource {
        backends: Vec<Service>,
        frontends: Vec<Service>,
    }

    impl ServiceSource for StaticSource {
        fn list_backends(&self) -> Result<Vec<Service>, ClientError> {
            Ok(self.backends.clone())
        }

        fn list_frontends(&self) -> Result<Vec<Service>, ClientError> {
            Ok(self.frontends.clone())
        }
    }

    struct BrokenSource;

    impl ServiceSource for BrokenSource {
        fn list_backends(&self) -> Result<Vec<Service>, ClientError> {
            Err(ClientError::Io(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "reset",
            )))
        }

        fn list_frontends(&self) -> Result<Vec<Service>, ClientError> {
            Err(ClientError::ParseFailure("garbage".into()))
        }
    }

    fn service(name: &str, status: &str) -> Service {
        Service {
            name: name.into(),
            status: status.into(),
        }
    }

    #[test]
    fn test_fetch_selects_section_and_drops_stats() {
        let source = StaticSource {
            backends: vec![
                service("web", "UP"),
                service("stats", "UP"),
                service("haproxy-stats-backend", "DOWN"),
            ],
            frontends: vec![service("http-in", "OPEN")],
        };

        let backends = fetch(SectionType::Backends, &source).unwrap();
        assert_eq!(backends.len(), 1);
        assert_eq!(backends.get("web").map(String::as_str), Some("UP"));

        let frontends = fetch(SectionType::Frontends, &source).unwrap();
        assert_eq!(frontends.len(), 1);
        assert!(frontends.contains_key("http-in"));
    }

    #[test]
    fn test_fetch_empty_is_not_an_error() {
        let source = StaticSource {
            backends: vec![],
            frontends: vec![],
        };
        assert!(fetch(SectionType::Backends, &source).unwrap().is_empty());
    }

    #[test]
    fn test_fetch_failure() {
        let err = fetch(SectionType::Frontends, &BrokenSource).unwrap_err();
        assert!(matches!(
            err,
            CheckError::Fetch {
                section: SectionType::Frontends,
                ..
            }
        ));
        assert!(err.to_string().contains("garbage"));
    }
}
