//! Command-line definition and execution
//!
//! Parses arguments, resolves configuration and drives one restore run.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use thaw_core::{ClientSettings, ConfigManager, Error, RunConfig, parse_storage_path};
use thaw_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::TracingReporter;

const LONG_ABOUT: &str = "\
Restore objects from S3 Glacier Deep Archive

Iterates through objects at the specified S3 path, identifies objects in
Deep Archive, and initiates a restoration request for them if they are not
already restored or in the process of being restored.";

const EXAMPLES: &str = "\
Examples:
  thaw --path s3://mybucket/myfolder
  thaw --path s3://mybucket/myfolder --days 7 --dry-run";

/// Long flags also accepted with a single leading dash (`-path`, `-dry-run`)
const LONG_FLAGS: &[&str] = &[
    "path",
    "days",
    "dry-run",
    "region",
    "endpoint-url",
    "profile",
    "force-path-style",
    "config",
    "debug",
    "help",
    "version",
];

/// thaw - restore S3 Deep Archive objects in bulk
#[derive(Parser, Debug)]
#[command(name = "thaw")]
#[command(author, version, about, long_about = LONG_ABOUT, after_help = EXAMPLES)]
pub struct Cli {
    /// The S3 path to restore (e.g. s3://mybucket/myfolder)
    #[arg(long, value_name = "URI")]
    pub path: Option<String>,

    /// Number of days to restore objects for [default: 1]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// List affected objects without restoring
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub dry_run: bool,

    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom S3 endpoint for S3-compatible services
    #[arg(long, env = "AWS_ENDPOINT_URL", value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Named AWS profile
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// Use path-style bucket addressing
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub force_path_style: bool,

    /// Config file [default: ~/.config/thaw/config.toml]
    #[arg(long, env = "THAW_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub debug: bool,
}

impl Cli {
    /// Connection settings given on the command line or through the environment
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            region: self.region.clone(),
            endpoint_url: self.endpoint_url.clone(),
            profile: self.profile.clone(),
            force_path_style: self.force_path_style,
        }
    }
}

/// Rewrite single-dash long flags (`-days 7`, `-path=s3://b`) to `--` form
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str().and_then(legacy_long_flag) {
            Some(fixed) => OsString::from(fixed),
            None => arg,
        })
        .collect()
}

fn legacy_long_flag(arg: &str) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }

    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name).then(|| format!("-{arg}"))
}

fn print_usage() {
    eprintln!("{}", Cli::command().render_help());
}

fn usage_error(message: &str) -> ExitCode {
    tracing::error!("Error: {message}");
    print_usage();
    ExitCode::UsageError
}

/// Execute a restore run and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let Some(raw_path) = cli.path.as_deref() else {
        return usage_error("--path is required");
    };

    if let Err(e) = parse_storage_path(raw_path) {
        return usage_error(&e.to_string());
    }

    let file_config = match load_config(cli.config.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load config: {e}");
            return ExitCode::from_error(&e);
        }
    };

    let days = file_config.defaults.resolve_days(cli.days);
    let run_config = match RunConfig::new(raw_path, days, cli.dry_run) {
        Ok(c) => c,
        Err(e) => return usage_error(&e.to_string()),
    };

    let settings = file_config.client.merge(cli.client_settings());
    let client = match S3Client::new(&settings).await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Unable to load SDK config: {e}");
            return ExitCode::from_error(&e);
        }
    };

    tracing::debug!(?run_config, ?settings, "starting restore run");

    let reporter = TracingReporter::new();
    match thaw_core::run(&client, &run_config, &reporter).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            tracing::error!("Failed to get page: {e}");
            ExitCode::from_error(&e)
        }
    }
}

fn load_config(explicit: Option<&PathBuf>) -> thaw_core::Result<thaw_core::Config> {
    let manager = match explicit {
        Some(path) if !path.exists() => {
            return Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new()?,
    };

    manager.load()
}
