use anyhow::{Context, Result};
use apple_client_secret::config::{self, Config};
use apple_client_secret::{unix_now, SignerConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

// ─── CLI ─────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "apple-client-secret",
    version,
    about = "Generate Sign in with Apple client secrets"
)]
struct Cli {
    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: Format,

    /// Override config file (default: ./apple-client-secret.toml or ~/.apple-client-secret.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Clone, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Cmd {
    /// Write a template config file.
    Init {
        /// Create ~/.apple-client-secret.toml instead of ./apple-client-secret.toml.
        #[arg(long)]
        global: bool,
    },

    /// Sign a new client secret and print it.
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Services ID used as the OAuth client_id (token subject).
    #[arg(long)]
    client_id: Option<String>,
    /// Apple Developer team ID (token issuer).
    #[arg(long)]
    team_id: Option<String>,
    /// Key ID of the signing key.
    #[arg(long)]
    key_id: Option<String>,
    /// Path to the .p8 private key.
    #[arg(long)]
    key_file: Option<PathBuf>,
    /// Lifetime in seconds (default 15552000).
    #[arg(long)]
    ttl: Option<u64>,
}

// ─── Entry ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "apple_client_secret=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Init { global } => cmd_init(global),
        Cmd::Generate(args) => cmd_generate(cli.config.as_deref(), args, &cli.format),
    }
}

// ─── init ────────────────────────────────────────────────────────────────────

fn cmd_init(global: bool) -> Result<()> {
    let path = config::init_config_path(global)?;
    if path.exists() {
        eprintln!("Config already exists: {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, config::CONFIG_TEMPLATE)
        .with_context(|| format!("could not write {}", path.display()))?;

    eprintln!("Created {}", path.display());
    eprintln!();
    eprintln!("Next steps:");
    eprintln!("  1. Edit {} with your team, key and Services ID", path.display());
    eprintln!("  2. Run `apple-client-secret generate`");
    Ok(())
}

// ─── generate ────────────────────────────────────────────────────────────────

fn cmd_generate(config_path: Option<&Path>, args: GenerateArgs, fmt: &Format) -> Result<()> {
    let signer = make_signer(config_path, args)?;

    let issued_at = unix_now()?;
    let token = signer.generate_at(issued_at)?;
    let expires_at = issued_at + signer.ttl_seconds();
    info!(kid = signer.key_id(), expires_at, "generated client secret");

    match fmt {
        Format::Text => println!("{token}"),
        Format::Json => {
            let out = serde_json::json!({
                "client_secret": token,
                "key_id": signer.key_id(),
                "issued_at": rfc3339(issued_at)?,
                "expires_at": rfc3339(expires_at)?,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

/// Flags override config values; with all four identity flags no config is read.
fn make_signer(config_path: Option<&Path>, args: GenerateArgs) -> Result<SignerConfig> {
    if let (Some(client_id), Some(team_id), Some(key_id), Some(key_file)) =
        (&args.client_id, &args.team_id, &args.key_id, &args.key_file)
    {
        return Ok(SignerConfig::from_key_file(
            client_id.as_str(),
            team_id.as_str(),
            key_id.as_str(),
            key_file,
            args.ttl,
        )?);
    }

    let path = config::resolve_config_path(config_path)?;
    if !path.exists() {
        anyhow::bail!(
            "No config found. Run `apple-client-secret init` first, or pass \
             --client-id, --team-id, --key-id and --key-file.\n\
             Looked in: {}",
            path.display()
        );
    }

    let mut cfg = Config::load(&path)?;
    let base_dir = path.parent().unwrap_or(Path::new("."));

    let apple = &mut cfg.apple;
    if let Some(v) = args.client_id {
        apple.client_id = v;
    }
    if let Some(v) = args.team_id {
        apple.team_id = v;
    }
    if let Some(v) = args.key_id {
        apple.key_id = v;
    }
    if let Some(f) = args.key_file {
        let f = std::env::current_dir()?.join(f);
        apple.private_key = f.to_string_lossy().into_owned();
    }
    if args.ttl.is_some() {
        apple.ttl_seconds = args.ttl;
    }

    apple
        .signer(base_dir)
        .with_context(|| format!("invalid [apple] settings in {}", path.display()))
}

fn rfc3339(secs: u64) -> Result<String> {
    let secs = i64::try_from(secs).context("timestamp out of range")?;
    chrono::DateTime::from_timestamp(secs, 0)
        .map(|t| t.to_rfc3339())
        .context("timestamp out of range")
}
