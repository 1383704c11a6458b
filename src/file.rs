use crate::error::{Error, Result};

use std::{
    fs::{self, OpenOptions, Permissions},
    io::Write,
    os::unix::fs::{OpenOptionsExt, PermissionsExt},
    path::{Path, PathBuf},
};

pub fn make_relative(current: &Path, home: &Path) -> PathBuf {
    match current.strip_prefix(home) {
        Err(_) => current.to_path_buf(),
        Ok(relative_path) => Path::new("~").join(relative_path),
    }
}

pub struct Exists<'p> {
    path: &'p Path,
}

impl<'p> Exists<'p> {
    pub fn check<P: AsRef<Path> + ?Sized>(path: &'p P) -> Self { Self { path: path.as_ref() } }
    pub fn folder(&self) -> bool { self.path.is_dir() }
    pub fn file(&self) -> bool { self.path.is_file() }
}

pub fn create_dir(path: &Path) -> Result<()> {
    if !Exists::check(path).folder() {
        fs::create_dir_all(path).map_err(Error::file("creating", path))?;
        log::info!("created directory {}", path.display());
    }
    Ok(())
}

/// Write `contents` readable and writable by the owner only.
pub fn write_private(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
        .map_err(Error::file("opening", path))?;

    // mode() only applies when the file is created
    fs::set_permissions(path, Permissions::from_mode(0o600)).map_err(Error::file("restricting", path))?;

    file.write_all(contents.as_bytes()).map_err(Error::file("writing", path))
}

pub fn remove(path: &Path) -> Result<()> { fs::remove_file(path).map_err(Error::file("removing", path)) }

/// Whether the file at `path` holds exactly `contents`.
pub fn matches(path: &Path, contents: &str) -> Result<bool> {
    if !Exists::check(path).file() {
        return Ok(false);
    }

    let current = fs::read(path).map_err(Error::file("reading", path))?;
    Ok(current == contents.as_bytes())
}
