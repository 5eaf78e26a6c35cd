//! Entry point for the portfolio viewer.
//!
//! - Parse command-line arguments.
//! - Load user configuration from `conf/config.toml`.
//! - Load the content document and the cached preference for it.
//! - Launch the GUI with everything loaded.

mod app;
mod cache;
mod config;
mod theme;

use crate::app::run_app;
use crate::cache::load_preference;
use crate::config::{load_config, serialize_config};
use anyhow::{Context, Result, anyhow, bail};
use folio_core::load_content;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

const USAGE: &str = "Usage: folio-viewer <content.json> [--reduced-motion] [--print-config]";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    content_path: PathBuf,
    reduced_motion: bool,
    print_config: bool,
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let args = parse_args(env::args().skip(1))?;
    let mut config = load_config(Path::new("conf/config.toml"));
    // The flag can only turn reduced motion on.
    config.reduced_motion |= args.reduced_motion;
    set_log_level(reload_handle, config.log_level.as_filter_str());

    if args.print_config {
        let rendered = serialize_config(&config).context("Failed to render configuration")?;
        println!("{rendered}");
        return Ok(());
    }

    if !args.content_path.exists() {
        bail!("File not found: {}", args.content_path.display());
    }
    info!(
        path = %args.content_path.display(),
        level = %config.log_level,
        reduced_motion = config.reduced_motion,
        "Starting portfolio viewer"
    );

    let preference = load_preference(&args.content_path);
    if let Some(preference) = &preference {
        info!(theme = %preference.theme, "Resuming cached theme");
    }
    let content = load_content(&args.content_path)
        .with_context(|| format!("Failed to load {}", args.content_path.display()))?;
    run_app(content, config, args.content_path, preference).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args<I>(args: I) -> Result<Args>
where
    I: IntoIterator<Item = String>,
{
    let mut content_path = None;
    let mut reduced_motion = false;
    let mut print_config = false;
    for arg in args {
        match arg.as_str() {
            "--reduced-motion" => reduced_motion = true,
            "--print-config" => print_config = true,
            flag if flag.starts_with("--") => bail!("Unknown flag {flag}\n{USAGE}"),
            _ if content_path.is_some() => bail!("Unexpected argument {arg}\n{USAGE}"),
            _ => content_path = Some(PathBuf::from(arg)),
        }
    }
    let content_path = match content_path {
        Some(path) => path,
        None if print_config => PathBuf::new(),
        None => return Err(anyhow!(USAGE)),
    };
    Ok(Args {
        content_path,
        reduced_motion,
        print_config,
    })
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    warn!("Logging initialized; override level with [logging] log_level or RUST_LOG");
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<Args> {
        parse_args(raw.iter().map(|s| s.to_string()))
    }

    #[test]
    fn content_path_is_required() {
        assert!(args(&[]).is_err());
        assert!(args(&["--reduced-motion"]).is_err());
    }

    #[test]
    fn flags_may_follow_the_path() {
        let parsed = args(&["site.json", "--reduced-motion"]).expect("valid args");
        assert_eq!(parsed.content_path, PathBuf::from("site.json"));
        assert!(parsed.reduced_motion);
        assert!(!parsed.print_config);
    }

    #[test]
    fn print_config_needs_no_path() {
        let parsed = args(&["--print-config"]).expect("valid args");
        assert!(parsed.print_config);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_paths() {
        assert!(args(&["site.json", "--fast"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }
}
