use crate::configuration::Kind;
use crate::launchctl::{Launchctl, DEFAULT_PROGRAM};

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub launchctl: Program,
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Program {
    pub path: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Defaults {
    #[serde(default)]
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_parent_path: Option<String>,
}

impl Default for Program {
    fn default() -> Self {
        Program {
            path: DEFAULT_PROGRAM.to_string(),
            args: Vec::new(),
            install_dir: None,
        }
    }
}

impl Config {
    pub fn launchctl(&self) -> Launchctl {
        let Program { path, args, install_dir } = &self.launchctl;
        let launchctl = args.iter().fold(Launchctl::new(path), |launchctl, arg| launchctl.arg(arg));

        match install_dir {
            Some(dir) => launchctl.with_install_dir(dir),
            None => launchctl,
        }
    }
}
