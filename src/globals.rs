use colored::Colorize;
use global_placeholders::init;
use launchctl_util::{config, config::structs::Config, file, helpers};
use macros_rs::{crashln, string};

pub fn init() -> Config {
    let (base, path) = match (config::base_dir(), config::path()) {
        (Ok(base), Ok(path)) => (base, path),
        _ => crashln!("{} Impossible to get your home directory", *helpers::FAIL),
    };

    if let Err(err) = file::create_dir(&base) {
        crashln!("{} Cannot create base dir.\n{}", *helpers::FAIL, string!(err).white());
    }

    let config = match config::read_from(&path) {
        Ok(config) => config,
        Err(err) => crashln!("{} Cannot read config.\n{}", *helpers::FAIL, format!("{err:#}").white()),
    };

    init!("lcu.config", path.display().to_string());

    log::debug!("using launchctl program {}", config.launchctl.path);
    config
}
