use core::fmt;
use serde::Serialize;
use std::num::ParseIntError;

const LAST_EXIT_STATUS_PREFIX: &str = "\"LastExitStatus\" = ";
const PID_PREFIX: &str = "\"PID\" = ";
const LINE_SUFFIX: &str = ";";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Unknown,
    NotInstalled,
    Running,
    NotRunning,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Unknown => "unknown",
            Status::NotInstalled => "not_installed",
            Status::Running => "running",
            Status::NotRunning => "not_running",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// What `launchctl list <label>` reported about a service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusDetails {
    pub status: Status,
    pub pid: Option<i32>,
    pub last_exit_status: Option<i32>,
    #[serde(skip)]
    pub pid_error: Option<ParseIntError>,
    #[serde(skip)]
    pub last_exit_status_error: Option<ParseIntError>,
}

impl StatusDetails {
    pub fn new(status: Status) -> Self {
        StatusDetails {
            status,
            pid: None,
            last_exit_status: None,
            pid_error: None,
            last_exit_status_error: None,
        }
    }

    pub fn got_pid(&self) -> bool { self.pid.is_some() && self.pid_error.is_none() }
    pub fn got_last_exit_status(&self) -> bool { self.last_exit_status.is_some() && self.last_exit_status_error.is_none() }
}

/// Scan the property dump printed by `launchctl list <label>`.
///
/// A service counts as running when a PID could be read.
pub fn parse_list_output(output: &str) -> StatusDetails {
    let mut details = StatusDetails::new(Status::NotRunning);

    for line in output.split('\n').map(str::trim) {
        if line.starts_with(LAST_EXIT_STATUS_PREFIX) {
            match field_value(line, LAST_EXIT_STATUS_PREFIX) {
                Ok(exit) => details.last_exit_status = Some(exit),
                Err(err) => details.last_exit_status_error = Some(err),
            }
        }

        if line.starts_with(PID_PREFIX) {
            match field_value(line, PID_PREFIX) {
                Ok(pid) => details.pid = Some(pid),
                Err(err) => details.pid_error = Some(err),
            }
        }
    }

    if details.got_pid() {
        details.status = Status::Running;
    }

    details
}

fn field_value(line: &str, prefix: &str) -> Result<i32, ParseIntError> {
    let value = line.strip_prefix(prefix).unwrap_or(line);
    value.strip_suffix(LINE_SUFFIX).unwrap_or(value).parse::<i32>()
}
