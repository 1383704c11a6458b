use colored::Colorize;
use once_cell::sync::Lazy;

pub static SUCCESS: Lazy<colored::ColoredString> = Lazy::new(|| "[LCU]".green());
pub static FAIL: Lazy<colored::ColoredString> = Lazy::new(|| "[LCU]".red());
pub static WARN: Lazy<colored::ColoredString> = Lazy::new(|| "[LCU]".yellow());

/// Parse a umask written in octal, with or without a leading `0o`.
pub fn parse_octal(s: &str) -> Result<u32, String> {
    let digits = s.trim().trim_start_matches("0o");
    u32::from_str_radix(digits, 8).map_err(|err| format!("'{s}' is not an octal number: {err}"))
}

/// Split a `NAME=VALUE` pair at the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, _)) if name.is_empty() => Err(format!("'{s}' is missing a variable name")),
        Some((name, value)) => Ok((name.to_string(), value.to_string())),
        None => Err(format!("'{s}' is not in NAME=VALUE form")),
    }
}
