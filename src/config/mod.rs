pub mod structs;

use crate::file::{self, Exists};

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use structs::Config;

pub const BASE_DIR: &str = ".launchctl-util";

pub fn base_dir() -> Result<PathBuf> {
    match home::home_dir() {
        Some(path) => Ok(path.join(BASE_DIR)),
        None => Err(anyhow!("Impossible to get your home directory")),
    }
}

pub fn path() -> Result<PathBuf> { Ok(base_dir()?.join("config.toml")) }

pub fn read() -> Result<Config> { read_from(path()?) }

/// Read the config at `path`, writing the defaults there first if it is missing.
pub fn read_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();

    if !Exists::check(path).file() {
        if let Some(dir) = path.parent() {
            file::create_dir(dir)?;
        }

        let contents = toml::to_string(&Config::default()).context("Cannot serialize default config")?;
        fs::write(path, contents).with_context(|| format!("Error writing config {}", path.display()))?;
        log::info!("created config file {}", path.display());
    }

    let contents = fs::read_to_string(path).with_context(|| format!("Cannot read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("Cannot parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::structs::*;
    use super::*;
    use crate::configuration::Kind;

    #[test]
    fn defaults_are_written_on_first_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = read_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.launchctl.path, "launchctl");
        assert_eq!(config.defaults.kind, Kind::UserAgent);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[launchctl]"));
        assert!(written.contains("path = \"launchctl\""));
        assert!(written.contains("kind = \"agent\""));
    }

    #[test]
    fn existing_config_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[launchctl]\npath = \"/usr/bin/sudo\"\nargs = [\"launchctl\"]\ninstall_dir = \"/tmp/agents\"\n\n[defaults]\nkind = \"daemon\"\nlog_parent_path = \"/var/log\"\n",
        )
        .unwrap();

        let config = read_from(&path).unwrap();

        assert_eq!(config.defaults.kind, Kind::Daemon);
        assert_eq!(config.defaults.log_parent_path.as_deref(), Some("/var/log"));

        let launchctl = config.launchctl();
        assert_eq!(launchctl.program(), Path::new("/usr/bin/sudo"));
        assert_eq!(
            launchctl.descriptor_path("com.example", Kind::Daemon).unwrap(),
            PathBuf::from("/tmp/agents/com.example.plist")
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nlog_parent_path = \"/tmp\"\n").unwrap();

        let config = read_from(&path).unwrap();
        assert_eq!(config.launchctl, Program::default());
        assert_eq!(config.defaults.kind, Kind::UserAgent);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nkind = \"service\"\n").unwrap();

        let err = read_from(&path).unwrap_err();
        assert!(err.to_string().contains("Cannot parse config"));
    }
}
