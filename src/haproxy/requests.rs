//! Request types for HAProxy.

use std::fmt::{self, Display};

/// Proxy type selector of `show stat <iid> <type> <sid>`.
///
/// HAProxy takes a bitmask here: 1 selects frontends, 2 selects backends.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProxyType {
    Frontends,
    Backends,
}

impl Display for ProxyType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProxyType::Frontends => f.write_str("1"),
            ProxyType::Backends => f.write_str("2"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_type_display() {
        assert_eq!(ProxyType::Frontends.to_string(), "1");
        assert_eq!(ProxyType::Backends.to_string(), "2");
    }
}
