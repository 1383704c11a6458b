use crate::configuration::Kind;
use std::{io, path::PathBuf, process::ExitStatus};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("a launchd configuration requires a label")]
    EmptyLabel,

    #[error("label '{0}' must not contain a path separator or NUL byte")]
    InvalidLabel(String),

    #[error("minute of the hour must be within 0..=59 (got {0})")]
    InvalidMinute(u32),

    #[error("unknown launchd configuration kind '{0}'")]
    UnknownKind(String),

    #[error("failed to determine HOME for user agent launchctl configuration")]
    HomeNotFound,

    #[error("root privileges are required to manage {0} services")]
    RootRequired(Kind),

    #[error("failed to execute {}: {source}", .program.display())]
    Spawn { program: PathBuf, source: io::Error },

    #[error("launchctl {args} exited with {status} - output: {output}")]
    Command { args: String, status: ExitStatus, output: String },

    #[error("invalid property list - output: {output}")]
    InvalidPropertyList { output: String },

    #[error("launchctl did not report '{label}' as installed after loading {}", .path.display())]
    NotInstalled { label: String, path: PathBuf },

    #[error("{action} {}: {source}", .path.display())]
    File { action: &'static str, path: PathBuf, source: io::Error },
}

impl Error {
    /// Output captured from launchctl, when the error came from running it.
    pub fn output(&self) -> Option<&str> {
        match self {
            Error::Command { output, .. } | Error::InvalidPropertyList { output } => Some(output.as_str()),
            _ => None,
        }
    }

    pub(crate) fn file(action: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Error::File { action, path, source }
    }
}
