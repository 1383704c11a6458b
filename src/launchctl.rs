use crate::configuration::{descriptor_path, validate_label, Configuration, Kind};
use crate::error::{Error, Result};
use crate::file;
use crate::status::{parse_list_output, Status, StatusDetails};

use nix::unistd::geteuid;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

pub const DEFAULT_PROGRAM: &str = "launchctl";

const COULD_NOT_FIND_SERVICE: &str = "Could not find service ";
const INVALID_PROPERTY_LIST: &str = ": Invalid property list";

/// Handle on the `launchctl` executable.
#[derive(Clone, Debug)]
pub struct Launchctl {
    program: PathBuf,
    leading_args: Vec<OsString>,
    install_dir: Option<PathBuf>,
}

impl Default for Launchctl {
    fn default() -> Self { Self::new(DEFAULT_PROGRAM) }
}

impl Launchctl {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Launchctl {
            program: program.into(),
            leading_args: Vec::new(),
            install_dir: None,
        }
    }

    /// Argument passed before every launchctl subcommand, e.g. when
    /// `program` is a wrapper such as `sudo`.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.leading_args.push(arg.as_ref().to_os_string());
        self
    }

    /// Install descriptors here instead of the directory of their kind.
    pub fn with_install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path { &self.program }

    pub fn descriptor_path(&self, label: &str, kind: Kind) -> Result<PathBuf> {
        validate_label(label)?;

        match &self.install_dir {
            Some(dir) => Ok(descriptor_path(dir, label)),
            None => Ok(descriptor_path(kind.directory()?, label)),
        }
    }

    /// Write the descriptor, load it and confirm launchd picked it up.
    ///
    /// An existing installation under the same path is unloaded first. When
    /// the service cannot be confirmed afterwards the written file is removed.
    pub fn install(&self, configuration: &Configuration) -> Result<PathBuf> {
        let kind = configuration.kind();
        ensure_privileges(kind)?;

        let path = self.descriptor_path(configuration.label(), kind)?;

        if let Err(err) = self.remove(&path, kind) {
            log::debug!("nothing removed before installing {}: {err}", configuration.label());
        }

        if let Some(dir) = path.parent() {
            file::create_dir(dir)?;
        }

        file::write_private(&path, configuration.contents())?;
        self.run([OsStr::new("load"), path.as_os_str()])?;

        // launchctl exits with 0 even when loading fails
        if !self.is_installed(configuration)? {
            if let Err(err) = file::remove(&path) {
                log::warn!("failed to clean up {}: {err}", path.display());
            }

            return Err(Error::NotInstalled {
                label: configuration.label().to_string(),
                path,
            });
        }

        log::info!("installed {} {} at {}", kind, configuration.label(), path.display());
        Ok(path)
    }

    /// Unload the descriptor at `path` and delete it.
    pub fn remove(&self, path: &Path, kind: Kind) -> Result<()> {
        ensure_privileges(kind)?;

        self.run([OsStr::new("unload"), path.as_os_str()])?;
        file::remove(path)?;

        log::info!("removed {kind} descriptor {}", path.display());
        Ok(())
    }

    pub fn is_installed(&self, configuration: &Configuration) -> Result<bool> {
        ensure_privileges(configuration.kind())?;

        let output = self.run(["list"])?;
        if !output.contains(configuration.label()) {
            return Ok(false);
        }

        let path = self.descriptor_path(configuration.label(), configuration.kind())?;
        file::matches(&path, configuration.contents())
    }

    pub fn start(&self, label: &str, kind: Kind) -> Result<()> {
        ensure_privileges(kind)?;
        self.run(["start", label]).map(|_| log::info!("started {label}"))
    }

    pub fn stop(&self, label: &str, kind: Kind) -> Result<()> {
        ensure_privileges(kind)?;
        self.run(["stop", label]).map(|_| log::info!("stopped {label}"))
    }

    pub fn current_status(&self, label: &str) -> Result<StatusDetails> {
        match self.run(["list", label]) {
            Ok(output) => Ok(parse_list_output(&output)),
            Err(err) if err.output().is_some_and(|output| output.starts_with(COULD_NOT_FIND_SERVICE)) => Ok(StatusDetails::new(Status::NotInstalled)),
            Err(err) => Err(err),
        }
    }

    fn run<I, S>(&self, args: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<OsString> = args.into_iter().map(|arg| arg.as_ref().to_os_string()).collect();
        let joined = args.iter().map(|arg| arg.to_string_lossy()).collect::<Vec<_>>().join(" ");

        log::debug!("running {} {joined}", self.program.display());

        let raw = Command::new(&self.program)
            .args(&self.leading_args)
            .args(&args)
            .output()
            .map_err(|source| Error::Spawn { program: self.program.clone(), source })?;

        let mut output = String::from_utf8_lossy(&raw.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&raw.stderr));

        log::debug!("launchctl {joined} exited with {} - output: {}", raw.status, output.trim_end());

        if !raw.status.success() {
            return Err(Error::Command { args: joined, status: raw.status, output });
        }

        if output.contains(INVALID_PROPERTY_LIST) {
            return Err(Error::InvalidPropertyList { output });
        }

        Ok(output)
    }
}

/// Daemons can only be managed by root.
pub fn ensure_privileges(kind: Kind) -> Result<()> {
    match kind.requires_root() && !geteuid().is_root() {
        true => Err(Error::RootRequired(kind)),
        false => Ok(()),
    }
}

pub fn install(configuration: &Configuration) -> Result<PathBuf> { Launchctl::default().install(configuration) }
pub fn remove(path: &Path, kind: Kind) -> Result<()> { Launchctl::default().remove(path, kind) }
pub fn is_installed(configuration: &Configuration) -> Result<bool> { Launchctl::default().is_installed(configuration) }
pub fn start(label: &str, kind: Kind) -> Result<()> { Launchctl::default().start(label, kind) }
pub fn stop(label: &str, kind: Kind) -> Result<()> { Launchctl::default().stop(label, kind) }
pub fn current_status(label: &str) -> Result<StatusDetails> { Launchctl::default().current_status(label) }
