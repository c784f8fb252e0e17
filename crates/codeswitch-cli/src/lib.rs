// codeswitch-cli: shared utilities for the command-line tools.

pub mod args;

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use codeswitch_annotate::EngineConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "CODESWITCH_CONFIG";

/// Configuration file name looked up in the working directory.
const LOCAL_CONFIG: &str = "codeswitch.toml";

/// Where the configuration in use came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    /// `--config` or `CODESWITCH_CONFIG`.
    Explicit(PathBuf),
    /// `$HOME/.config/codeswitch/config.toml`.
    UserConfig(PathBuf),
    /// `./codeswitch.toml`.
    WorkingDir(PathBuf),
    Builtin,
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigOrigin::Explicit(path)
            | ConfigOrigin::UserConfig(path)
            | ConfigOrigin::WorkingDir(path) => write!(f, "{}", path.display()),
            ConfigOrigin::Builtin => f.write_str("built-in tr-en"),
        }
    }
}

/// Candidate configuration files, in search order:
///
/// 1. `explicit` (`--config` or `CODESWITCH_CONFIG`)
/// 2. `$HOME/.config/codeswitch/config.toml`
/// 3. `./codeswitch.toml`
///
/// The built-in configuration is used when none of them exists.
pub fn build_search_paths(
    explicit: Option<&Path>,
    home: Option<&Path>,
    cwd: Option<&Path>,
) -> Vec<ConfigOrigin> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(ConfigOrigin::Explicit(path.to_path_buf()));
    }
    if let Some(home) = home {
        paths.push(ConfigOrigin::UserConfig(
            home.join(".config").join("codeswitch").join("config.toml"),
        ));
    }
    if let Some(cwd) = cwd {
        paths.push(ConfigOrigin::WorkingDir(cwd.join(LOCAL_CONFIG)));
    }
    paths
}

/// Load the first configuration found along the search path.
///
/// An explicit path that does not exist is an error rather than a reason to
/// fall back.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<(EngineConfig, ConfigOrigin)> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let cwd = std::env::current_dir().ok();
    for origin in build_search_paths(explicit, home.as_deref(), cwd.as_deref()) {
        let path = match &origin {
            ConfigOrigin::Explicit(path) => {
                if !path.is_file() {
                    bail!("configuration file {} does not exist", path.display());
                }
                path
            }
            ConfigOrigin::UserConfig(path) | ConfigOrigin::WorkingDir(path) => {
                if !path.is_file() {
                    continue;
                }
                path
            }
            ConfigOrigin::Builtin => continue,
        };
        let config = EngineConfig::from_path(path)
            .with_context(|| format!("invalid configuration {}", path.display()))?;
        tracing::info!(origin = %origin, "using configuration");
        return Ok((config, origin));
    }
    let config = EngineConfig::builtin().context("invalid built-in configuration")?;
    Ok((config, ConfigOrigin::Builtin))
}

/// Install the log subscriber. `RUST_LOG` wins; otherwise each `-v` raises
/// the level from `warn`.
pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Read a whole input file, or stdin for `None` and `-`.
pub fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Print the error chain and map the result to an exit code.
pub fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
