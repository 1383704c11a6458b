mod cli;
mod globals;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::Verbosity;
use cli::ServiceArgs;
use launchctl_util::Kind;
use macros_rs::string;

#[derive(Parser)]
#[command(version, about = "Build launchd descriptors and manage services with launchctl")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[clap(flatten)]
    verbose: Verbosity,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the plist descriptor for a service
    #[command(alias = "gen")]
    Generate {
        #[clap(flatten)]
        service: ServiceArgs,
    },
    /// Write, load and verify a service descriptor
    Install {
        #[clap(flatten)]
        service: ServiceArgs,
    },
    /// Check whether the generated descriptor is installed
    Installed {
        #[clap(flatten)]
        service: ServiceArgs,
    },
    /// Unload a service and delete its descriptor
    #[command(alias = "rm", alias = "uninstall")]
    Remove {
        label: String,
        #[arg(long, help = "agent or daemon")]
        kind: Option<Kind>,
    },
    Start {
        label: String,
        #[arg(long, help = "agent or daemon")]
        kind: Option<Kind>,
    },
    Stop {
        label: String,
        #[arg(long, help = "agent or daemon")]
        kind: Option<Kind>,
    },
    /// Show whether a service is installed and running
    #[command(alias = "info")]
    Status {
        label: String,
        #[arg(long, default_value_t = string!("default"), help = "format output")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new().filter_level(cli.verbose.log_level_filter()).init();

    let config = globals::init();

    match &cli.command {
        Commands::Generate { service } => cli::generate(service, &config),
        Commands::Install { service } => cli::install(service, &config),
        Commands::Installed { service } => cli::installed(service, &config),
        Commands::Remove { label, kind } => cli::remove(label, kind, &config),
        Commands::Start { label, kind } => cli::start(label, kind, &config),
        Commands::Stop { label, kind } => cli::stop(label, kind, &config),
        Commands::Status { label, format } => cli::status(label, format, &config),
    }
}
