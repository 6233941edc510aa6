//! Parsed responses from HAProxy sockets.

/// `svname` HAProxy uses for the aggregate row of a frontend.
pub const FRONTEND_SVNAME: &str = "FRONTEND";
/// `svname` HAProxy uses for the aggregate row of a backend.
pub const BACKEND_SVNAME: &str = "BACKEND";

/// One row of `show stat` output, reduced to the fields the plugin reads.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct StatRow {
    /// Proxy name (`pxname`).
    pub proxy: String,
    /// Service name (`svname`): `FRONTEND`, `BACKEND` or a server name.
    pub service: String,
    /// Status string as reported by HAProxy.
    pub status: String,
}

impl StatRow {
    pub fn is_frontend(&self) -> bool {
        self.service == FRONTEND_SVNAME
    }

    pub fn is_backend(&self) -> bool {
        self.service == BACKEND_SVNAME
    }
}

/// A frontend or backend and its status as seen by one HAProxy process.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Service {
    pub name: String,
    pub status: String,
}
