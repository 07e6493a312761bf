//! Environment configuration.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file by `dotenv` in `main`. Command-line flags override them.

use crate::models::ReachabilityPolicy;
use std::collections::HashMap;

pub const ENV_ALLOW_PRIVATE: &str = "SUBNET_ALLOW_PRIVATE";
pub const ENV_ALLOW_LOOPBACK: &str = "SUBNET_ALLOW_LOOPBACK";
pub const ENV_ALLOW_LINK_LOCAL: &str = "SUBNET_ALLOW_LINK_LOCAL";
pub const ENV_ALLOW_MULTICAST: &str = "SUBNET_ALLOW_MULTICAST";
pub const ENV_ALLOW_RESERVED: &str = "SUBNET_ALLOW_RESERVED";
pub const ENV_ALLOW_CGNAT: &str = "SUBNET_ALLOW_CGNAT";
pub const ENV_REQUIRE_USABLE_HOSTS: &str = "SUBNET_REQUIRE_USABLE_HOSTS";
pub const ENV_OUTPUT: &str = "SUBNET_OUTPUT";

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Csv,
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<OutputFormat, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Settings resolved from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub policy: ReachabilityPolicy,
    pub require_usable_hosts: bool,
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            policy: ReachabilityPolicy::default(),
            require_usable_hosts: true,
            output: OutputFormat::default(),
        }
    }
}

/// Parse a boolean setting; `None` if the text is not recognised.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Settings {
        Settings::from_vars(&std::env::vars().collect())
    }

    /// Read settings from a map of variables, ignoring unparseable values.
    pub fn from_vars(vars: &HashMap<String, String>) -> Settings {
        let mut settings = Settings::default();

        let flag = |name: &str, target: &mut bool| {
            if let Some(value) = vars.get(name) {
                match parse_bool(value) {
                    Some(b) => *target = b,
                    None => log::warn!("Ignoring {name}={value}: expected true or false"),
                }
            }
        };
        flag(ENV_ALLOW_PRIVATE, &mut settings.policy.allow_private);
        flag(ENV_ALLOW_LOOPBACK, &mut settings.policy.allow_loopback);
        flag(ENV_ALLOW_LINK_LOCAL, &mut settings.policy.allow_link_local);
        flag(ENV_ALLOW_MULTICAST, &mut settings.policy.allow_multicast);
        flag(ENV_ALLOW_RESERVED, &mut settings.policy.allow_reserved);
        flag(ENV_ALLOW_CGNAT, &mut settings.policy.allow_cgnat);
        flag(ENV_REQUIRE_USABLE_HOSTS, &mut settings.require_usable_hosts);

        if let Some(value) = vars.get(ENV_OUTPUT) {
            match value.parse() {
                Ok(format) => settings.output = format,
                Err(e) => log::warn!("Ignoring {ENV_OUTPUT}: {e}"),
            }
        }

        log::debug!("settings from environment: {settings:?}");
        settings
    }
}
