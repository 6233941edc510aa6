//! Service classification and verdict reduction.
//!
//! This is the only part of the plugin that makes decisions: fetched
//! services are split into healthy, down and other buckets (after removing
//! excluded names), and the buckets are reduced to a single [`Finding`].

use crate::section::{Bucket, SectionType};
use crate::status::Verdict;
use std::collections::{BTreeMap, BTreeSet};

/// Service name to raw HAProxy status. Ordered so reports are stable.
pub type ServiceMap = BTreeMap<String, String>;

/// Names of services that are ignored entirely.
pub type ExclusionSet = BTreeSet<String>;

/// Three disjoint buckets partitioning the non-excluded services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub healthy: ServiceMap,
    pub down: ServiceMap,
    pub other: ServiceMap,
}

impl Classification {
    pub fn is_empty(&self) -> bool {
        self.healthy.is_empty() && self.down.is_empty() && self.other.is_empty()
    }

    pub fn len(&self) -> usize {
        self.healthy.len() + self.down.len() + self.other.len()
    }
}

/// Outcome of reducing a [`Classification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// Every remaining service is healthy.
    Healthy { count: usize },
    /// Some services are DOWN and none are in an unrecognized state.
    Down(ServiceMap),
    /// Some services are in an unrecognized state and none are DOWN.
    Other(ServiceMap),
    /// DOWN and unrecognized states at the same time; holds the union.
    Mixed(ServiceMap),
    /// Nothing to check.
    Empty,
}

impl Finding {
    pub fn verdict(&self) -> Verdict {
        match self {
            Finding::Healthy { .. } => Verdict::Ok,
            Finding::Down(_) | Finding::Mixed(_) => Verdict::Error,
            Finding::Other(_) | Finding::Empty => Verdict::Unknown,
        }
    }

    /// Services named in the report, empty for `Healthy` and `Empty`.
    pub fn detail(&self) -> Option<&ServiceMap> {
        match self {
            Finding::Down(map) | Finding::Other(map) | Finding::Mixed(map) => Some(map),
            Finding::Healthy { .. } | Finding::Empty => None,
        }
    }
}

/// Splits `services` into buckets using the vocabulary of `section`.
///
/// Exclusion is an exact match on the full service name; a name that only
/// contains an excluded entry as a substring is still classified.
pub fn classify(
    services: &ServiceMap,
    exclusions: &ExclusionSet,
    section: SectionType,
) -> Classification {
    let mut classification = Classification::default();

    for (name, status) in services {
        if exclusions.contains(name) {
            continue;
        }

        let bucket = match section.bucket(status) {
            Bucket::Healthy => &mut classification.healthy,
            Bucket::Down => &mut classification.down,
            Bucket::Other => &mut classification.other,
        };
        bucket.insert(name.clone(), status.clone());
    }

    classification
}

/// Reduces the buckets to a single finding.
///
/// Precedence, first match wins:
/// 1. DOWN and other both present: `Mixed` (ERROR) with the union
/// 2. DOWN only: `Down` (ERROR)
/// 3. other only: `Other` (UNKNOWN)
/// 4. healthy only: `Healthy` (OK)
/// 5. nothing at all: `Empty` (UNKNOWN)
pub fn reduce(classification: &Classification) -> Finding {
    let has_down = !classification.down.is_empty();
    let has_other = !classification.other.is_empty();

    match (has_down, has_other) {
        (true, true) => {
            let mut union = classification.down.clone();
            union.extend(
                classification
                    .other
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
            Finding::Mixed(union)
        }
        (true, false) => Finding::Down(classification.down.clone()),
        (false, true) => Finding::Other(classification.other.clone()),
        (false, false) if !classification.healthy.is_empty() => Finding::Healthy {
            count: classification.healthy.len(),
        },
        (false, false) => Finding::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services(pairs: &[(&str, &str)]) -> ServiceMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn exclude(names: &[&str]) -> ExclusionSet {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_classify_backends() {
        let map = services(&[("a", "UP"), ("b", "DOWN"), ("c", "MAINT"), ("d", "OPEN")]);
        let c = classify(&map, &ExclusionSet::new(), SectionType::Backends);

        assert_eq!(c.healthy, services(&[("a", "UP")]));
        assert_eq!(c.down, services(&[("b", "DOWN")]));
        assert_eq!(c.other, services(&[("c", "MAINT"), ("d", "OPEN")]));
        assert_eq!(c.len(), map.len());
    }

    #[test]
    fn test_classify_frontends() {
        let map = services(&[("fe1", "OPEN"), ("fe2", "STOP"), ("fe3", "UP")]);
        let c = classify(&map, &ExclusionSet::new(), SectionType::Frontends);

        assert_eq!(c.healthy, services(&[("fe1", "OPEN")]));
        assert!(c.down.is_empty());
        assert_eq!(c.other.len(), 2);
    }

    #[test]
    fn test_exclusion_is_exact_match() {
        let map = services(&[("api", "DOWN"), ("api-v2", "DOWN"), ("web", "UP")]);
        let c = classify(&map, &exclude(&["api"]), SectionType::Backends);

        assert!(!c.down.contains_key("api"));
        assert!(c.down.contains_key("api-v2"));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_exclusion_does_not_match_substring_of_entry() {
        // "web" is a substring of the excluded name, not equal to it
        let map = services(&[("web", "DOWN")]);
        let c = classify(&map, &exclude(&["web1,web2"]), SectionType::Backends);
        assert_eq!(c.down.len(), 1);
    }

    #[test]
    fn test_reduce_precedence() {
        let healthy = classify(
            &services(&[("a", "UP"), ("b", "UP")]),
            &ExclusionSet::new(),
            SectionType::Backends,
        );
        assert_eq!(reduce(&healthy), Finding::Healthy { count: 2 });

        let down = classify(
            &services(&[("a", "UP"), ("b", "DOWN")]),
            &ExclusionSet::new(),
            SectionType::Backends,
        );
        assert_eq!(reduce(&down), Finding::Down(services(&[("b", "DOWN")])));

        let other = classify(
            &services(&[("a", "UP"), ("c", "NOLB")]),
            &ExclusionSet::new(),
            SectionType::Backends,
        );
        assert_eq!(reduce(&other), Finding::Other(services(&[("c", "NOLB")])));

        let mixed = classify(
            &services(&[("a", "UP"), ("b", "DOWN"), ("c", "MAINT")]),
            &ExclusionSet::new(),
            SectionType::Backends,
        );
        let finding = reduce(&mixed);
        assert_eq!(
            finding,
            Finding::Mixed(services(&[("b", "DOWN"), ("c", "MAINT")]))
        );
        assert_eq!(finding.verdict(), Verdict::Error);
    }

    #[test]
    fn test_reduce_empty() {
        let finding = reduce(&Classification::default());
        assert_eq!(finding, Finding::Empty);
        assert_eq!(finding.verdict(), Verdict::Unknown);
        assert!(finding.detail().is_none());
    }

    #[test]
    fn test_everything_excluded_is_empty() {
        let map = services(&[("a", "DOWN")]);
        let c = classify(&map, &exclude(&["a"]), SectionType::Backends);
        assert!(c.is_empty());
        assert_eq!(reduce(&c), Finding::Empty);
    }
}
