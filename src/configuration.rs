use crate::error::{Error, Result};
use crate::launchctl::Launchctl;

use core::fmt;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const USER_AGENTS_DIR: &str = "Library/LaunchAgents";
pub const DAEMONS_DIR: &str = "/Library/LaunchDaemons";

/// The launchd scope a service is installed into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Kind {
    /// Per-user session service, loaded from `~/Library/LaunchAgents`.
    #[default]
    #[serde(rename = "agent", alias = "user-agent", alias = "useragent")]
    UserAgent,
    /// System-wide service, loaded from `/Library/LaunchDaemons`.
    #[serde(rename = "daemon")]
    Daemon,
}

impl Kind {
    pub fn requires_root(&self) -> bool { matches!(self, Kind::Daemon) }

    /// Directory launchd loads this kind of descriptor from.
    pub fn directory(&self) -> Result<PathBuf> {
        match self {
            Kind::UserAgent => match home::home_dir() {
                Some(home) if !home.as_os_str().is_empty() => Ok(home.join(USER_AGENTS_DIR)),
                _ => Err(Error::HomeNotFound),
            },
            Kind::Daemon => Ok(PathBuf::from(DAEMONS_DIR)),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "agent" | "user-agent" | "useragent" => Ok(Kind::UserAgent),
            "daemon" => Ok(Kind::Daemon),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::UserAgent => write!(f, "agent"),
            Kind::Daemon => write!(f, "daemon"),
        }
    }
}

/// Labels become file names, so they may not name another directory.
pub fn validate_label(label: &str) -> Result<()> {
    match label.contains(['/', '\0']) {
        true => Err(Error::InvalidLabel(label.to_string())),
        false => Ok(()),
    }
}

/// A rendered launchd service descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) label: String,
    pub(crate) contents: String,
    pub(crate) kind: Kind,
}

impl Configuration {
    pub fn label(&self) -> &str { &self.label }
    pub fn contents(&self) -> &str { &self.contents }
    pub fn kind(&self) -> Kind { self.kind }

    /// Where launchd expects this descriptor, `<kind dir>/<label>.plist`.
    pub fn file_path(&self) -> Result<PathBuf> { Ok(self.file_path_in(self.kind.directory()?)) }

    pub fn file_path_in(&self, dir: impl AsRef<Path>) -> PathBuf { descriptor_path(dir, &self.label) }

    /// Whether this exact descriptor is installed and known to launchctl.
    pub fn is_installed(&self) -> Result<bool> { Launchctl::default().is_installed(self) }
}

pub(crate) fn descriptor_path(dir: impl AsRef<Path>, label: &str) -> PathBuf { dir.as_ref().join(format!("{label}.plist")) }

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(kind: Kind) -> Configuration {
        Configuration {
            kind,
            label: "com.example.worker".into(),
            contents: String::new(),
        }
    }

    #[test]
    fn daemon_path_is_system_wide() {
        let path = configuration(Kind::Daemon).file_path().unwrap();
        assert_eq!(path, PathBuf::from("/Library/LaunchDaemons/com.example.worker.plist"));
    }

    #[test]
    fn user_agent_path_is_under_home() {
        if let Some(home) = home::home_dir() {
            let path = configuration(Kind::UserAgent).file_path().unwrap();
            assert_eq!(path, home.join("Library/LaunchAgents/com.example.worker.plist"));
        }
    }

    #[test]
    fn file_path_in_custom_dir() {
        let path = configuration(Kind::UserAgent).file_path_in("/tmp/agents");
        assert_eq!(path, PathBuf::from("/tmp/agents/com.example.worker.plist"));
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("agent".parse::<Kind>().unwrap(), Kind::UserAgent);
        assert_eq!("User-Agent".parse::<Kind>().unwrap(), Kind::UserAgent);
        assert_eq!(" daemon ".parse::<Kind>().unwrap(), Kind::Daemon);
        assert_eq!(Kind::UserAgent.to_string(), "agent");
        assert_eq!(Kind::Daemon.to_string(), "daemon");
        for kind in [Kind::UserAgent, Kind::Daemon] {
            assert_eq!(kind.to_string().parse::<Kind>().unwrap(), kind);
        }
        assert!(matches!("service".parse::<Kind>(), Err(Error::UnknownKind(kind)) if kind == "service"));
    }

    #[test]
    fn kind_serde_aliases() {
        #[derive(Deserialize)]
        struct Holder {
            kind: Kind,
        }

        for spelling in ["agent", "user-agent", "useragent"] {
            let holder: Holder = toml::from_str(&format!("kind = \"{spelling}\"")).unwrap();
            assert_eq!(holder.kind, Kind::UserAgent);
        }
    }

    #[test]
    fn labels_cannot_leave_their_directory() {
        assert!(validate_label("com.example.worker").is_ok());
        assert!(validate_label("..").is_ok());
        assert!(matches!(validate_label("/etc/evil"), Err(Error::InvalidLabel(label)) if label == "/etc/evil"));
        assert!(validate_label("../../../tmp/x").is_err());
        assert!(validate_label("com.example\0worker").is_err());
    }

    #[test]
    fn only_daemons_require_root() {
        assert!(Kind::Daemon.requires_root());
        assert!(!Kind::UserAgent.requires_root());
        assert_eq!(Kind::default(), Kind::UserAgent);
    }
}
