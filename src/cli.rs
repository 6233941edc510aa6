//! CLI arguments for check_haproxy_state.
//!
//! `--sockets_path` and `--section_type` are optional at the clap level: the
//! input resolver validates them so a missing value ends in the plugin's
//! ERROR verdict and the help text, not in a bare clap usage error.

use clap::{Parser, ValueEnum};
use haproxy_state_check::config::{ConfigFormat, DEFAULT_CONFIG_PATH};
use std::path::{Path, PathBuf};

/// Log level options for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "check_haproxy_state",
    about = "Simple Nagios plugin to check HAProxy backends and frontends state",
    long_about = "Simple Nagios plugin to check HAProxy backends and frontends state.\n\n\
                  Queries every HAProxy admin socket in a directory and reduces the state of \
                  all backends or frontends to one verdict: OK (0), ERROR (2) or UNKNOWN (-1).",
    version,
    override_usage = "check_haproxy_state -s /var/run/haproxy/ -t backends"
)]
pub struct Args {
    /// Enter path to the HAProxy sockets
    #[arg(short = 's', long = "sockets_path", value_name = "DIR")]
    pub sockets_path: Option<PathBuf>,

    /// Select backends or frontends!
    #[arg(short = 't', long = "section_type", value_name = "TYPE")]
    pub section_type: Option<String>,

    /// Exclusion config file (INI, or YAML/JSON/TOML by extension)
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Disable exclusion config loading
    #[arg(long)]
    pub no_config: bool,

    /// Print the effective exclusion config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "ini")]
    pub config_format: ConfigFormat,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log to the console only
    #[arg(long)]
    pub no_syslog: bool,
}

impl Args {
    /// Config file to load, `None` when loading is disabled.
    pub fn config_path(&self) -> Option<&Path> {
        if self.no_config {
            None
        } else {
            Some(self.config.as_path())
        }
    }
}
