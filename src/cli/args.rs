use clap::Args;
use launchctl_util::{config::structs::Defaults, helpers, ConfigurationBuilder, Kind};
use std::path::PathBuf;

#[derive(Args, Clone, Debug)]
pub struct ServiceArgs {
    #[arg(long, help = "launchd label, e.g. com.example.worker")]
    pub label: String,
    #[arg(long, help = "program to execute")]
    pub command: Option<String>,
    #[arg(long = "arg", allow_hyphen_values = true, help = "argument for the command (repeatable)")]
    pub args: Vec<String>,
    #[arg(long = "env", value_parser = helpers::parse_key_value, help = "NAME=VALUE environment variable (repeatable)")]
    pub env: Vec<(String, String)>,
    #[arg(long, help = "agent or daemon")]
    pub kind: Option<Kind>,
    #[arg(long = "log-dir", help = "directory for a combined <label>.log")]
    pub log_dir: Option<PathBuf>,
    #[arg(long, help = "stdout log file, ignored with --log-dir")]
    pub stdout: Option<PathBuf>,
    #[arg(long, help = "stderr log file, ignored with --log-dir")]
    pub stderr: Option<PathBuf>,
    #[arg(long, help = "start interval in seconds")]
    pub interval: Option<u32>,
    #[arg(long, help = "minute of each hour to run at")]
    pub minute: Option<u32>,
    #[arg(long = "run-at-load", help = "start when loaded")]
    pub run_at_load: Option<bool>,
    #[arg(long, help = "run as this user")]
    pub user: Option<String>,
    #[arg(long, help = "run as this group")]
    pub group: Option<String>,
    #[arg(long = "init-groups", help = "call initgroups(3) before starting")]
    pub init_groups: Option<bool>,
    #[arg(long, value_parser = helpers::parse_octal, help = "octal umask, e.g. 022")]
    pub umask: Option<u32>,
}

impl ServiceArgs {
    pub fn kind(&self, defaults: &Defaults) -> Kind { self.kind.unwrap_or(defaults.kind) }

    pub fn builder(&self, defaults: &Defaults) -> ConfigurationBuilder {
        let mut builder = ConfigurationBuilder::new()
            .label(self.label.trim())
            .kind(self.kind(defaults))
            .arguments(self.args.iter().cloned());

        for (name, value) in &self.env {
            builder = builder.environment_variable(name, value);
        }

        let log_dir = self.log_dir.clone().or_else(|| defaults.log_parent_path.as_ref().map(PathBuf::from));

        if let Some(command) = &self.command {
            builder = builder.command(command);
        }
        if let Some(dir) = log_dir {
            builder = builder.log_parent_path(dir);
        }
        if let Some(path) = &self.stdout {
            builder = builder.standard_out_path(path);
        }
        if let Some(path) = &self.stderr {
            builder = builder.standard_error_path(path);
        }
        if let Some(seconds) = self.interval {
            builder = builder.start_interval(seconds);
        }
        if let Some(minute) = self.minute {
            builder = builder.start_calendar_interval_minute(minute);
        }
        if let Some(enabled) = self.run_at_load {
            builder = builder.run_at_load(enabled);
        }
        if let Some(user) = &self.user {
            builder = builder.user_name(user);
        }
        if let Some(group) = &self.group {
            builder = builder.group_name(group);
        }
        if let Some(enabled) = self.init_groups {
            builder = builder.init_groups(enabled);
        }
        if let Some(umask) = self.umask {
            builder = builder.umask(umask);
        }

        builder
    }
}
