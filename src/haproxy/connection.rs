use std::io::{self, BufReader, Read, Write};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::commands;
use super::errors::ClientError;
use super::parsers;
use super::requests::ProxyType;
use super::responses::StatRow;

/// Default read/write timeout applied to admin socket connections.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Creates connections to HAProxy. Implemented per transport.
pub trait ConnectionBuilder {
    type Connection;

    /// Create a new connection to HAProxy.
    fn connect(&self) -> Result<Self::Connection, io::Error>;
}

/// Configuration for connecting to an HAProxy Unix socket.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnixSocketBuilder {
    /// The path of the Unix socket.
    path: PathBuf,
    /// Read and write timeout of each connection.
    timeout: Duration,
}

impl UnixSocketBuilder {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConnectionBuilder for UnixSocketBuilder {
    type Connection = Connection<UnixStream>;

    fn connect(&self) -> Result<Self::Connection, io::Error> {
        let socket = UnixStream::connect(&self.path)?;
        socket.set_read_timeout(Some(self.timeout))?;
        socket.set_write_timeout(Some(self.timeout))?;
        let reader = BufReader::new(socket.try_clone()?);

        Ok(Connection { socket, reader })
    }
}

impl From<PathBuf> for UnixSocketBuilder {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

/// A connection to one HAProxy process.
///
/// HAProxy closes non-interactive connections after each command, so the
/// query methods take `self`. Use a `ConnectionBuilder` for each query.
#[derive(Debug)]
pub struct Connection<T> {
    socket: T,
    reader: BufReader<T>,
}

impl<T: Read + Write> Connection<T> {
    /// Query `show stat` for one proxy type.
    pub fn stat(mut self, proxy_type: ProxyType) -> Result<Vec<StatRow>, ClientError> {
        commands::show_stat(&mut self.socket, proxy_type)?;
        commands::end(&mut self.socket)?;
        self.socket.flush()?;

        parsers::parse_stat(&mut self.reader)
    }
}
