use clap::Parser;

use crate::config::ConfigOverrides;
use crate::shared::telemetry::LogFormat;

/// Resolve policy-compliant remediations for dependencies changed in pull requests
#[derive(Parser, Debug)]
#[command(name = "pr-remediator")]
#[command(version)]
#[command(
    about = "Resolve policy-compliant remediations for dependencies changed in pull requests",
    long_about = None
)]
pub struct Args {
    /// Address to listen on, e.g. 0.0.0.0:8080
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Path to a YAML config file (defaults to ./pr-remediator.config.yml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<String>,

    /// Log output format: text or json
    #[arg(long, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Validate the configuration and exit without serving
    #[arg(long)]
    pub check_config: bool,
}

impl Args {
    /// Command-line values that take precedence over the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            listen: self.listen.clone(),
            log_format: self.log_format,
        }
    }
}
