use launchctl_util::{ConfigurationBuilder, Kind};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ConfigurationBuilder::new()
        .kind(Kind::UserAgent)
        .label("com.testing")
        .run_at_load(true)
        .command("echo")
        .argument("Hello world!")
        .log_parent_path("/tmp")
        .build()?;

    println!("Configuration contents:\n{}", config.contents());

    let path = launchctl_util::install(&config)?;
    println!("Installed at {}", path.display());

    Ok(())
}
