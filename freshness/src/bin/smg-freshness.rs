//! `smg-freshness`: validate freshness rule files and preview resolutions.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use serde::Serialize;
use smg_mcp_freshness::{FreshnessConfig, FreshnessResult, PolicyEngine, ResolvedPolicy};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "smg-freshness",
    version,
    about = "Validate MCP freshness rules and preview per-tool policies"
)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info", env = "SMG_FRESHNESS_LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load and validate a rule file
    Validate {
        /// YAML or JSON rule file
        config: PathBuf,
    },
    /// Print the resolved policy of each tool name as JSON lines
    Resolve {
        /// YAML or JSON rule file
        config: PathBuf,
        /// Tool names to resolve
        #[arg(required = true)]
        tools: Vec<String>,
    },
}

#[derive(Serialize)]
struct Resolution<'a> {
    tool: &'a str,
    policy: Option<&'a ResolvedPolicy>,
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn load_engine(path: &Path) -> FreshnessResult<PolicyEngine> {
    let config = FreshnessConfig::from_file(path).await?;
    Ok(PolicyEngine::from_config(&config)?)
}

async fn run(command: Command) -> FreshnessResult<()> {
    match command {
        Command::Validate { config } => {
            let engine = load_engine(&config).await.inspect_err(|e| {
                warn!(
                    config = %config.display(),
                    error = %e,
                    "Freshness config failed validation"
                );
            })?;
            let default = engine
                .defaults()
                .directive
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".to_string());
            info!(config = %config.display(), "Freshness config is valid");
            println!(
                "{}: {} rule(s), default directive: {}",
                config.display(),
                engine.rule_count(),
                default
            );
        }
        Command::Resolve { config, tools } => {
            let engine = load_engine(&config).await?;
            for tool in &tools {
                let policy = engine.resolve(tool);
                let line = serde_json::to_string(&Resolution {
                    tool,
                    policy: policy.as_deref(),
                })?;
                println!("{line}");
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_json);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "smg-freshness failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
