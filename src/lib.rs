//! Build launchd service descriptors and drive `launchctl` to install,
//! remove, start, stop and inspect macOS services.

pub mod builder;
pub mod config;
pub mod configuration;
pub mod error;
pub mod file;
pub mod helpers;
pub mod launchctl;
pub mod plist;
pub mod status;

pub use builder::ConfigurationBuilder;
pub use configuration::{Configuration, Kind};
pub use error::{Error, Result};
pub use launchctl::{current_status, ensure_privileges, install, is_installed, remove, start, stop, Launchctl};
pub use status::{Status, StatusDetails};
