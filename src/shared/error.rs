use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes of the service binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean shutdown, or a successful `--check-config`
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid configuration, bind failure, server error)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Startup and configuration errors of the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid config: {field} {reason}\n\n💡 Hint: {hint}")]
    InvalidConfig {
        field: String,
        reason: String,
        hint: String,
    },

    #[error("Invalid listen address: {value}\nDetails: {details}\n\n💡 Hint: Use the form HOST:PORT, e.g. 0.0.0.0:8080")]
    InvalidListenAddress { value: String, details: String },

    #[error("Failed to bind {addr}\nDetails: {details}\n\n💡 Hint: Check that the port is free and you may listen on it")]
    BindFailed { addr: SocketAddr, details: String },

    #[error("Config file is not usable: {path}\nReason: {reason}\n\n💡 Hint: Point --config at a regular YAML file")]
    ConfigFileRejected { path: PathBuf, reason: String },
}
