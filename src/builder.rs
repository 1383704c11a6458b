use crate::configuration::{validate_label, Configuration, Kind};
use crate::error::{Error, Result};
use crate::plist::{Document, ENTRY, MEMBER};

use std::path::{Path, PathBuf};

/// Fluent builder for a launchd service [`Configuration`].
///
/// ```
/// use launchctl_util::{ConfigurationBuilder, Kind};
///
/// let config = ConfigurationBuilder::new()
///     .kind(Kind::UserAgent)
///     .label("com.testing")
///     .run_at_load(true)
///     .command("echo")
///     .argument("Hello world!")
///     .log_parent_path("/tmp")
///     .build()
///     .unwrap();
///
/// assert!(config.contents().contains("<string>/tmp/com.testing.log</string>"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ConfigurationBuilder {
    label: String,
    command: String,
    environment: Vec<(String, String)>,
    arguments: Vec<String>,
    log_parent_path: Option<PathBuf>,
    stderr_path: Option<PathBuf>,
    stdout_path: Option<PathBuf>,
    kind: Kind,
    start_interval: u32,
    calendar_minute: Option<u32>,
    run_at_load: Option<bool>,
    user_name: String,
    group_name: String,
    init_groups: Option<bool>,
    umask: Option<u32>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Program to execute, the first element of `ProgramArguments`.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn environment_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.push((name.into(), value.into()));
        self
    }

    pub fn argument(mut self, value: impl Into<String>) -> Self {
        self.arguments.push(value.into());
        self
    }

    pub fn arguments<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments.extend(values.into_iter().map(Into::into));
        self
    }

    /// Directory for one combined stdout/stderr log named `<label>.log`.
    ///
    /// Takes precedence over [`standard_error_path`](Self::standard_error_path)
    /// and [`standard_out_path`](Self::standard_out_path).
    pub fn log_parent_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_parent_path = Some(path.into());
        self
    }

    /// Ignored when a log parent path is set.
    pub fn standard_error_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stderr_path = Some(path.into());
        self
    }

    /// Ignored when a log parent path is set.
    pub fn standard_out_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout_path = Some(path.into());
        self
    }

    pub fn kind(mut self, kind: Kind) -> Self {
        self.kind = kind;
        self
    }

    /// Run every `seconds`; zero leaves `StartInterval` out.
    pub fn start_interval(mut self, seconds: u32) -> Self {
        self.start_interval = seconds;
        self
    }

    /// Run at this minute of every hour, e.g. 10 runs at 01:10, 02:10 and so on.
    pub fn start_calendar_interval_minute(mut self, minute_of_each_hour: u32) -> Self {
        self.calendar_minute = Some(minute_of_each_hour);
        self
    }

    pub fn run_at_load(mut self, enabled: bool) -> Self {
        self.run_at_load = Some(enabled);
        self
    }

    pub fn user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = user_name.into();
        self
    }

    pub fn group_name(mut self, group_name: impl Into<String>) -> Self {
        self.group_name = group_name.into();
        self
    }

    /// Whether launchd calls initgroups(3) before starting the service.
    pub fn init_groups(mut self, enabled: bool) -> Self {
        self.init_groups = Some(enabled);
        self
    }

    pub fn umask(mut self, umask: u32) -> Self {
        self.umask = Some(umask);
        self
    }

    pub fn build(self) -> Result<Configuration> {
        if self.label.trim().is_empty() {
            return Err(Error::EmptyLabel);
        }

        validate_label(&self.label)?;

        if let Some(minute) = self.calendar_minute {
            if minute > 59 {
                return Err(Error::InvalidMinute(minute));
            }
        }

        let mut doc = Document::new();
        doc.key(ENTRY, "Label").string(ENTRY, &self.label);

        if !self.environment.is_empty() {
            doc.key(ENTRY, "EnvironmentVariables").open(ENTRY, "dict");
            for (name, value) in &self.environment {
                doc.key(MEMBER, name).string(MEMBER, value);
            }
            doc.close(ENTRY, "dict");
        }

        if !self.user_name.is_empty() {
            doc.key(ENTRY, "UserName").string(ENTRY, &self.user_name);
        }

        if !self.group_name.is_empty() {
            doc.key(ENTRY, "GroupName").string(ENTRY, &self.group_name);
        }

        if let Some(enabled) = self.init_groups {
            doc.key(ENTRY, "InitGroups").boolean(ENTRY, enabled);
        }

        if let Some(umask) = self.umask {
            doc.key(ENTRY, "Umask").integer(ENTRY, umask);
        }

        if !self.command.is_empty() {
            doc.key(ENTRY, "ProgramArguments").open(ENTRY, "array").string(MEMBER, &self.command);
            for argument in &self.arguments {
                doc.string(MEMBER, argument);
            }
            doc.close(ENTRY, "array");
        }

        match self.log_parent_path.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                let log_file = display(&parent.join(format!("{}.log", self.label)));
                doc.key(ENTRY, "StandardOutPath").string(ENTRY, &log_file);
                doc.key(ENTRY, "StandardErrorPath").string(ENTRY, &log_file);
            }
            None => {
                if let Some(path) = non_empty(&self.stderr_path) {
                    doc.key(ENTRY, "StandardErrorPath").string(ENTRY, &display(path));
                }
                if let Some(path) = non_empty(&self.stdout_path) {
                    doc.key(ENTRY, "StandardOutPath").string(ENTRY, &display(path));
                }
            }
        }

        if self.start_interval > 0 {
            doc.key(ENTRY, "StartInterval").integer(ENTRY, self.start_interval);
        }

        if let Some(minute) = self.calendar_minute {
            doc.key(ENTRY, "StartCalendarInterval").open(ENTRY, "dict");
            doc.key(MEMBER, "Minute").integer(MEMBER, minute);
            doc.close(ENTRY, "dict");
        }

        if let Some(enabled) = self.run_at_load {
            doc.key(ENTRY, "RunAtLoad").boolean(ENTRY, enabled);
        }

        log::trace!("built launchd configuration for {}", self.label);

        Ok(Configuration {
            label: self.label,
            contents: doc.finish(),
            kind: self.kind,
        })
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> { path.as_deref().filter(|p| !p.as_os_str().is_empty()) }
fn display(path: &Path) -> String { path.to_string_lossy().into_owned() }

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(contents: &str) -> Vec<&str> {
        contents
            .lines()
            .filter(|line| line.starts_with("        <key>"))
            .map(|line| line.trim().trim_start_matches("<key>").trim_end_matches("</key>"))
            .collect()
    }

    #[test]
    fn hello_world_agent() {
        let config = ConfigurationBuilder::new()
            .kind(Kind::UserAgent)
            .label("com.testing")
            .run_at_load(true)
            .command("echo")
            .argument("Hello world!")
            .log_parent_path("/tmp")
            .build()
            .unwrap();

        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n",
            "<plist version=\"1.0\">\n",
            "    <dict>\n",
            "        <key>Label</key>\n",
            "        <string>com.testing</string>\n",
            "        <key>ProgramArguments</key>\n",
            "        <array>\n",
            "            <string>echo</string>\n",
            "            <string>Hello world!</string>\n",
            "        </array>\n",
            "        <key>StandardOutPath</key>\n",
            "        <string>/tmp/com.testing.log</string>\n",
            "        <key>StandardErrorPath</key>\n",
            "        <string>/tmp/com.testing.log</string>\n",
            "        <key>RunAtLoad</key>\n",
            "        <true/>\n",
            "    </dict>\n",
            "</plist>\n",
        );

        assert_eq!(config.contents(), expected);
        assert_eq!(config.label(), "com.testing");
        assert_eq!(config.kind(), Kind::UserAgent);
    }

    #[test]
    fn label_only() {
        let config = ConfigurationBuilder::new().label("com.example.idle").build().unwrap();
        assert_eq!(keys(config.contents()), vec!["Label"]);
    }

    #[test]
    fn every_option_in_emission_order() {
        let config = ConfigurationBuilder::new()
            .run_at_load(false)
            .start_calendar_interval_minute(10)
            .start_interval(300)
            .standard_out_path("/var/log/out.log")
            .standard_error_path("/var/log/err.log")
            .argument("--verbose")
            .command("/usr/local/bin/worker")
            .umask(0o022)
            .init_groups(true)
            .group_name("staff")
            .user_name("nobody")
            .environment_variable("PATH", "/usr/bin:/bin")
            .environment_variable("MODE", "production")
            .label("com.example.worker")
            .kind(Kind::Daemon)
            .build()
            .unwrap();

        assert_eq!(
            keys(config.contents()),
            vec![
                "Label",
                "EnvironmentVariables",
                "UserName",
                "GroupName",
                "InitGroups",
                "Umask",
                "ProgramArguments",
                "StandardErrorPath",
                "StandardOutPath",
                "StartInterval",
                "StartCalendarInterval",
                "RunAtLoad",
            ]
        );

        let contents = config.contents();
        assert!(contents.contains(concat!(
            "        <dict>\n",
            "            <key>PATH</key>\n",
            "            <string>/usr/bin:/bin</string>\n",
            "            <key>MODE</key>\n",
            "            <string>production</string>\n",
            "        </dict>\n",
        )));
        assert!(contents.contains("        <key>Umask</key>\n        <integer>18</integer>\n"));
        assert!(contents.contains("        <key>InitGroups</key>\n        <true/>\n"));
        assert!(contents.contains("        <key>RunAtLoad</key>\n        <false/>\n"));
        assert!(contents.contains("            <key>Minute</key>\n            <integer>10</integer>\n"));
        assert!(contents.contains("<string>/usr/local/bin/worker</string>\n            <string>--verbose</string>"));
        assert_eq!(config.kind(), Kind::Daemon);
    }

    #[test]
    fn log_parent_path_overrides_individual_paths() {
        let config = ConfigurationBuilder::new()
            .label("com.example.logs")
            .standard_error_path("/var/log/err.log")
            .standard_out_path("/var/log/out.log")
            .log_parent_path("/var/log/example/")
            .build()
            .unwrap();

        let contents = config.contents();
        assert_eq!(keys(contents), vec!["Label", "StandardOutPath", "StandardErrorPath"]);
        assert_eq!(contents.matches("<string>/var/log/example/com.example.logs.log</string>").count(), 2);
        assert!(!contents.contains("/var/log/err.log"));
    }

    #[test]
    fn arguments_without_command_are_dropped() {
        let config = ConfigurationBuilder::new().label("com.example.args").arguments(["a", "b"]).build().unwrap();
        assert!(!config.contents().contains("ProgramArguments"));
        assert!(!config.contents().contains("<string>a</string>"));
    }

    #[test]
    fn zero_interval_is_omitted_but_minute_zero_is_kept() {
        let config = ConfigurationBuilder::new()
            .label("com.example.hourly")
            .start_interval(0)
            .start_calendar_interval_minute(0)
            .build()
            .unwrap();

        assert_eq!(keys(config.contents()), vec!["Label", "StartCalendarInterval"]);
    }

    #[test]
    fn values_are_escaped() {
        let config = ConfigurationBuilder::new()
            .label("com.example.escape")
            .command("/bin/sh")
            .argument("-c")
            .argument("echo a && echo <b>")
            .build()
            .unwrap();

        assert!(config.contents().contains("<string>echo a &amp;&amp; echo &lt;b&gt;</string>"));
    }

    #[test]
    fn labels_with_path_separators_are_rejected() {
        for label in ["/etc/evil", "../../../tmp/x", "com.example/worker"] {
            let result = ConfigurationBuilder::new().label(label).log_parent_path("/tmp").build();
            assert!(matches!(result, Err(Error::InvalidLabel(ref rejected)) if rejected == label));
        }
    }

    #[test]
    fn validation() {
        assert!(matches!(ConfigurationBuilder::new().build(), Err(Error::EmptyLabel)));
        assert!(matches!(ConfigurationBuilder::new().label("  ").build(), Err(Error::EmptyLabel)));
        assert!(matches!(
            ConfigurationBuilder::new().label("com.example").start_calendar_interval_minute(60).build(),
            Err(Error::InvalidMinute(60))
        ));
    }
}
