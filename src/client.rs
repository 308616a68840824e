//! Minimal watchman client
//!
//! Discovers the server socket by running `watchman get-sockname`, then
//! exchanges BSER PDUs over the unix socket. Connection lifecycle, retries
//! and request pipelining are left to the caller.

use std::ffi::OsStr;
use std::io;
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::string::{String, ToString};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::value::Value;

/// Errors from talking to a watchman server
#[derive(Error, Debug)]
pub enum ClientError {
    /// Spawning the binary or socket i/o failed
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    /// Encoding or decoding a PDU failed
    #[error("bser error: {0}")]
    Codec(#[from] crate::Error),
    /// `get-sockname` printed something that is not JSON
    #[error("invalid get-sockname reply: {0}")]
    Json(#[from] serde_json::Error),
    /// `get-sockname` exited unsuccessfully
    #[error("`{program} get-sockname` failed with {status}")]
    CommandFailed {
        /// Program that was run
        program: String,
        /// Its exit status
        status: std::process::ExitStatus,
    },
    /// The server answered with an `error` field
    #[error("watchman error: {0}")]
    Watchman(String),
    /// The reply did not have the expected shape
    #[error("unexpected response: {0}")]
    UnexpectedResponse(&'static str),
}

/// Run `<watchman_path> get-sockname` and return the socket path it reports
pub fn get_sockname(watchman_path: impl AsRef<OsStr>) -> Result<PathBuf, ClientError> {
    let program = watchman_path.as_ref();
    debug!(program = ?program, "running get-sockname");

    let output = Command::new(program).arg("get-sockname").output()?;
    if !output.status.success() {
        return Err(ClientError::CommandFailed {
            program: program.to_string_lossy().into_owned(),
            status: output.status,
        });
    }
    parse_sockname(&output.stdout)
}

/// Extract the socket path from a `get-sockname` JSON reply
pub fn parse_sockname(reply: &[u8]) -> Result<PathBuf, ClientError> {
    let json: serde_json::Value = serde_json::from_slice(reply)?;
    let value = Value::try_from(&json)?;
    check_response(&value)?;

    value
        .get("sockname")
        .and_then(Value::as_str)
        .map(PathBuf::from)
        .ok_or(ClientError::UnexpectedResponse("missing sockname"))
}

/// Fail if a response is not an object or carries an `error` field
pub fn check_response(value: &Value) -> Result<(), ClientError> {
    if value.as_object().is_none() {
        return Err(ClientError::UnexpectedResponse("expected an object"));
    }
    match value.get("error") {
        None => Ok(()),
        Some(err) => Err(ClientError::Watchman(
            err.as_bytes()
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_else(|| err.kind().to_string()),
        )),
    }
}

/// Connection to a watchman server
#[derive(Debug)]
pub struct Client {
    stream: UnixStream,
    config: Config,
}

impl Client {
    /// Connect to the socket at `path`
    pub fn connect(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let stream = UnixStream::connect(path)?;
        debug!(path = %path.display(), "connected to watchman");
        Ok(Self::from_stream(stream))
    }

    /// Ask `watchman_path` for its socket and connect to it
    pub fn discover(watchman_path: impl AsRef<OsStr>) -> Result<Self, ClientError> {
        let sockname = get_sockname(watchman_path)?;
        Self::connect(sockname)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: UnixStream) -> Self {
        Self {
            stream,
            config: Config::default(),
        }
    }

    /// Replace the codec configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Read/write timeout for the socket; `None` blocks indefinitely
    pub fn set_timeout(&self, timeout: Option<Duration>) -> Result<(), ClientError> {
        self.stream.set_read_timeout(timeout)?;
        self.stream.set_write_timeout(timeout)?;
        Ok(())
    }

    /// Send one command and wait for its response
    ///
    /// Unilateral PDUs (subscription and log notifications) that arrive
    /// first are skipped.
    pub fn command(&mut self, command: &Value) -> Result<Value, ClientError> {
        crate::write_value(&mut self.stream, command, &self.config)?;
        debug!(kind = command.kind(), "sent command");

        loop {
            let response = crate::read_value(&mut self.stream, &self.config)?;
            if response.get("unilateral").and_then(Value::as_bool) == Some(true) {
                debug!("skipping unilateral response");
                continue;
            }
            check_response(&response)?;
            return Ok(response);
        }
    }
}
