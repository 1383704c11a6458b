use colored::Colorize;
use global_placeholders::global;
use macros_rs::{crashln, string, ternary};
use serde_json::json;
use std::path::Path;

use launchctl_util::{file, helpers, Kind, Launchctl, Status, StatusDetails};

use tabled::{
    settings::{
        object::Columns,
        style::{BorderColor, Style},
        themes::Colorization,
        Color, Rotate,
    },
    Table, Tabled,
};

pub struct Internal<'i> {
    pub label: &'i str,
    pub kind: Kind,
    pub launchctl: Launchctl,
}

pub fn display_path(path: &Path) -> String {
    match home::home_dir() {
        Some(home) => file::make_relative(path, &home).display().to_string(),
        None => path.display().to_string(),
    }
}

impl<'i> Internal<'i> {
    pub fn remove(&self) {
        println!("{} Applying action removeService on ({})", *helpers::SUCCESS, self.label);

        let path = match self.launchctl.descriptor_path(self.label, self.kind) {
            Ok(path) => path,
            Err(err) => crashln!("{} Cannot locate ({}).\n{}", *helpers::FAIL, self.label, string!(err).white()),
        };

        match self.launchctl.remove(&path, self.kind) {
            Ok(_) => println!("{} Removed {} ({}) ✓", *helpers::SUCCESS, self.kind, display_path(&path)),
            Err(err) => crashln!("{} Failed to remove ({}).\n{}", *helpers::FAIL, self.label, string!(err).white()),
        }
    }

    pub fn start(&self) {
        println!("{} Applying action startService on ({})", *helpers::SUCCESS, self.label);

        match self.launchctl.start(self.label, self.kind) {
            Ok(_) => println!("{} Started ({}) ✓", *helpers::SUCCESS, self.label),
            Err(err) => crashln!("{} Failed to start ({}).\n{}", *helpers::FAIL, self.label, string!(err).white()),
        }
    }

    pub fn stop(&self) {
        println!("{} Applying action stopService on ({})", *helpers::SUCCESS, self.label);

        match self.launchctl.stop(self.label, self.kind) {
            Ok(_) => println!("{} Stopped ({}) ✓", *helpers::SUCCESS, self.label),
            Err(err) => crashln!("{} Failed to stop ({}).\n{}", *helpers::FAIL, self.label, string!(err).white()),
        }
    }

    pub fn status(&self, format: &String) {
        #[derive(Clone, Debug, Tabled)]
        struct Info {
            label: String,
            status: colored::ColoredString,
            pid: String,
            #[tabled(rename = "last exit status")]
            last_exit_status: String,
        }

        let (details, error) = match self.launchctl.current_status(self.label) {
            Ok(details) => (details, None),
            Err(err) => {
                log::debug!("status query for {} failed: {err}", self.label);
                (StatusDetails::new(Status::Unknown), Some(err))
            }
        };

        match format.as_str() {
            "raw" => println!("{details:?}"),
            "json" => println!(
                "{}",
                json!({
                    "label": self.label,
                    "status": details.status,
                    "pid": details.pid,
                    "last_exit_status": details.last_exit_status,
                })
            ),
            _ => {
                let status = match details.status {
                    Status::Running => "running ".green().bold(),
                    Status::NotRunning => "stopped ".red().bold(),
                    Status::NotInstalled => "not installed ".bright_black().bold(),
                    Status::Unknown => "unknown ".yellow().bold(),
                };

                let data = vec![Info {
                    status,
                    label: format!("{} ", self.label),
                    pid: ternary!(details.got_pid(), string!(details.pid.unwrap_or_default()), string!("n/a")),
                    last_exit_status: ternary!(details.got_last_exit_status(), string!(details.last_exit_status.unwrap_or_default()), string!("n/a")),
                }];

                let table = Table::new(data)
                    .with(Rotate::Left)
                    .with(Style::rounded().remove_horizontals())
                    .with(Colorization::exact([Color::FG_CYAN], Columns::first()))
                    .with(BorderColor::filled(Color::FG_BRIGHT_BLACK))
                    .to_string();

                println!("{}\n{table}\n", format!("Describing service ({})", self.label).on_bright_white().black());
                println!(" {}", format!("Edit {} to change the launchctl program", global!("lcu.config")).white());
            }
        };

        if let Some(err) = error {
            crashln!("{} Cannot query ({}).\n{}", *helpers::WARN, self.label, string!(err).white());
        }
    }
}
