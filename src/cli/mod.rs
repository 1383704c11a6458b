mod args;
pub use args::*;

pub(crate) mod internal;

use colored::Colorize;
use internal::{display_path, Internal};
use macros_rs::{crashln, string, then};

use launchctl_util::{config::structs::Config, helpers, Configuration, Kind};

fn build(service: &ServiceArgs, config: &Config) -> Configuration {
    match service.builder(&config.defaults).build() {
        Ok(configuration) => configuration,
        Err(err) => crashln!("{} Cannot build configuration.\n{}", *helpers::FAIL, string!(err).white()),
    }
}

pub fn generate(service: &ServiceArgs, config: &Config) { print!("{}", build(service, config).contents()) }

pub fn install(service: &ServiceArgs, config: &Config) {
    let configuration = build(service, config);
    println!("{} Applying action installService on ({})", *helpers::SUCCESS, configuration.label());

    match config.launchctl().install(&configuration) {
        Ok(path) => {
            println!("{} Installed {} ({}) ✓", *helpers::SUCCESS, configuration.kind(), display_path(&path));
            then!(service.run_at_load != Some(true), println!("{} Use `launchctl-util start {}` to run it", *helpers::SUCCESS, configuration.label()));
        }
        Err(err) => crashln!("{} Failed to install ({}).\n{}", *helpers::FAIL, configuration.label(), string!(err).white()),
    }
}

pub fn installed(service: &ServiceArgs, config: &Config) {
    let configuration = build(service, config);

    match config.launchctl().is_installed(&configuration) {
        Ok(true) => println!("{} ({}) is installed and up to date", *helpers::SUCCESS, configuration.label()),
        Ok(false) => println!("{} ({}) is not installed or differs from the generated descriptor", *helpers::WARN, configuration.label()),
        Err(err) => crashln!("{} Cannot check ({}).\n{}", *helpers::FAIL, configuration.label(), string!(err).white()),
    }
}

fn internal<'i>(label: &'i str, kind: &Option<Kind>, config: &Config) -> Internal<'i> {
    Internal {
        label,
        kind: kind.unwrap_or(config.defaults.kind),
        launchctl: config.launchctl(),
    }
}

pub fn remove(label: &str, kind: &Option<Kind>, config: &Config) { internal(label, kind, config).remove() }
pub fn start(label: &str, kind: &Option<Kind>, config: &Config) { internal(label, kind, config).start() }
pub fn stop(label: &str, kind: &Option<Kind>, config: &Config) { internal(label, kind, config).stop() }
pub fn status(label: &str, format: &String, config: &Config) { internal(label, &None, config).status(format) }
