//! Client for HAProxy admin sockets.
//!
//! A multi-process HAProxy exposes one admin socket per process, usually all
//! in one directory. [`HaProxy`] discovers those sockets and merges the
//! per-process view of every frontend or backend into a single status.

mod commands;
mod connection;
mod errors;
mod parsers;
pub mod requests;
pub mod responses;

use std::collections::BTreeMap;
use std::fs;
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub use connection::{Connection, ConnectionBuilder, UnixSocketBuilder, DEFAULT_TIMEOUT};
pub use errors::ClientError;
use requests::ProxyType;
use responses::{Service, StatRow};

/// All admin sockets of one HAProxy instance.
#[derive(Clone, Debug)]
pub struct HaProxy {
    sockets: Vec<UnixSocketBuilder>,
}

impl HaProxy {
    /// Discover the admin sockets in `socket_dir` and check that each accepts
    /// connections.
    pub fn connect(socket_dir: &Path) -> Result<Self, ClientError> {
        Self::connect_with_timeout(socket_dir, DEFAULT_TIMEOUT)
    }

    pub fn connect_with_timeout(socket_dir: &Path, timeout: Duration) -> Result<Self, ClientError> {
        if !fs::metadata(socket_dir)?.is_dir() {
            return Err(ClientError::NotADirectory(socket_dir.to_path_buf()));
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(socket_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_socket() {
                paths.push(entry.path());
            }
        }
        paths.sort();

        if paths.is_empty() {
            return Err(ClientError::NoSockets(socket_dir.to_path_buf()));
        }

        let sockets: Vec<UnixSocketBuilder> = paths
            .into_iter()
            .map(|p| UnixSocketBuilder::new(p).with_timeout(timeout))
            .collect();

        for socket in &sockets {
            socket.connect()?;
            debug!("HAProxy socket usable: {}", socket.path().display());
        }

        Ok(Self { sockets })
    }

    /// Paths of the discovered admin sockets, sorted.
    pub fn sockets(&self) -> impl Iterator<Item = &Path> {
        self.sockets.iter().map(UnixSocketBuilder::path)
    }

    /// Status of every backend, merged across processes.
    pub fn backends(&self) -> Result<Vec<Service>, ClientError> {
        self.services(ProxyType::Backends, StatRow::is_backend)
    }

    /// Status of every frontend, merged across processes.
    pub fn frontends(&self) -> Result<Vec<Service>, ClientError> {
        self.services(ProxyType::Frontends, StatRow::is_frontend)
    }

    fn services(
        &self,
        proxy_type: ProxyType,
        keep: fn(&StatRow) -> bool,
    ) -> Result<Vec<Service>, ClientError> {
        let mut statuses: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for socket in &self.sockets {
            let rows = socket.connect()?.stat(proxy_type)?;
            debug!(
                "{} stat rows from {}",
                rows.len(),
                socket.path().display()
            );
            for row in rows.into_iter().filter(|row| keep(row)) {
                statuses.entry(row.proxy).or_default().push(row.status);
            }
        }

        Ok(statuses
            .into_iter()
            .map(|(name, per_process)| Service {
                name,
                status: merge_statuses(per_process),
            })
            .collect())
    }
}

/// Collapses per-process statuses: the shared value if all processes agree,
/// otherwise the distinct values joined with `/`.
fn merge_statuses(mut statuses: Vec<String>) -> String {
    statuses.sort();
    statuses.dedup();
    statuses.join("/")
}
