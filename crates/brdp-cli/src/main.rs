//! brdp — bastion RDP shortcut generator.
//!
//! Resolves the user's authorized target on a bastion gateway and writes a
//! `.rdp` connection profile pre-configured for that target: one
//! session-rights query, one record, one file.

mod config;
mod prompt;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use tracing::{error, info};

use brdp_client::{require_type, select_right, GatewayClient};
use brdp_core::profile::COLOR_DEPTHS;
use brdp_core::{emit_profile, resolve_target, write_profile, ConnectionParameters, Resolution, TargetType};

/// brdp — bastion RDP shortcut generator
#[derive(Parser)]
#[command(
    name = "brdp",
    version = "0.1.0",
    about = "Generate a .rdp connection profile for a bastion-authorized target"
)]
#[command(group(ArgGroup::new("target").required(true).args(["device", "application"])))]
struct Cli {
    /// Bastion gateway host (host or host:port)
    #[arg(short, long)]
    bastion: Option<String>,

    /// User name to authenticate to the bastion
    #[arg(short, long)]
    user: Option<String>,

    /// Target device name
    #[arg(short, long)]
    device: Option<String>,

    /// Published application name
    #[arg(short, long)]
    application: Option<String>,

    /// Restrict matching rights to this account
    #[arg(long)]
    account: Option<String>,

    /// Restrict matching rights to this domain
    #[arg(long)]
    domain: Option<String>,

    /// Screen mode (omit for a fixed-size window)
    #[arg(short, long, value_parser = ["fullscreen", "multimonitor"])]
    resolution: Option<String>,

    /// Desktop width for windowed sessions
    #[arg(long)]
    width: Option<u32>,

    /// Desktop height for windowed sessions
    #[arg(long)]
    height: Option<u32>,

    /// Session color depth in bits per pixel
    #[arg(long = "color-bpp", value_parser = parse_color_depth)]
    color_bpp: Option<u8>,

    /// Bastion password (prompted interactively if omitted)
    #[arg(short, long)]
    password: Option<String>,

    /// Skip TLS certificate verification (self-signed gateways)
    #[arg(short = 'k', long)]
    insecure: bool,

    /// Output path for the .rdp profile
    #[arg(short, long)]
    output: PathBuf,

    /// Config file path
    #[arg(long = "config")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_color_depth(value: &str) -> Result<u8, String> {
    let depth: u8 = value
        .parse()
        .map_err(|_| format!("invalid color depth: {value}"))?;
    if COLOR_DEPTHS.contains(&depth) {
        Ok(depth)
    } else {
        Err("color depth must be one of 8, 15, 16, 24, 32".to_string())
    }
}

/// Prefer the CLI value, fall back to a non-empty config value.
fn effective(cli: Option<String>, cfg: &str) -> Option<String> {
    cli.or_else(|| {
        if cfg.is_empty() {
            None
        } else {
            Some(cfg.to_string())
        }
    })
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing.
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("brdp=debug,brdp_cli=debug,brdp_client=debug,brdp_core=debug")
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("brdp=warn,brdp_cli=warn")
            .with_target(false)
            .init();
    }

    // Load config file.
    let config_path = cli.config.clone().unwrap_or_else(|| {
        let home = dirs::home_dir().unwrap_or_default();
        home.join(".brdp").join("config.toml").to_string_lossy().to_string()
    });
    let cfg = config::Config::load(&config_path).unwrap_or_default();

    if let Err(e) = run(cli, cfg).await {
        error!("{:#}", e);
        eprintln!("brdp: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, cfg: config::Config) -> Result<()> {
    let bastion = effective(cli.bastion, &cfg.default.bastion)
        .context("no bastion host given (use --bastion or set default.bastion in config)")?;
    let user = effective(cli.user, &cfg.default.user)
        .context("no user given (use --user or set default.user in config)")?;

    let password = match cli.password {
        Some(password) => password,
        None => prompt::password(&user)?,
    };

    let params = ConnectionParameters {
        color_depth: cli.color_bpp.unwrap_or(cfg.display.color_bpp),
        resolution: Resolution::parse(
            cli.resolution.as_deref().unwrap_or(&cfg.display.resolution),
        ),
        width: cli.width.unwrap_or(cfg.display.width),
        height: cli.height.unwrap_or(cfg.display.height),
    };

    let (query, expected) = match (&cli.device, &cli.application) {
        (Some(device), None) => (device.clone(), TargetType::Device),
        (None, Some(application)) => (application.clone(), TargetType::Application),
        // The clap group guarantees exactly one of the two.
        _ => bail!("exactly one of --device or --application is required"),
    };

    let client = GatewayClient::new(&bastion, cli.insecure)?;
    let rights = client.session_rights(&user, &password, &query).await?;
    info!(count = rights.len(), query = %query, "fetched session rights");

    let right = select_right(rights, cli.account.as_deref(), cli.domain.as_deref())?;
    require_type(&right, expected)?;

    let target = resolve_target(&user, &right);
    info!(target = %target, "resolved target");

    let remote_app_mode = expected == TargetType::Application;
    let directives = emit_profile(
        &params,
        &target,
        &bastion,
        &right.subprotocols,
        cli.application.as_deref(),
        right.remote_app.as_ref(),
        remote_app_mode,
    );
    write_profile(&cli.output, &directives)
        .with_context(|| format!("failed to write profile to {}", cli.output.display()))?;

    eprintln!("Wrote connection profile for {target} to {}", cli.output.display());
    Ok(())
}
