use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::path::PathBuf;

use lode_config::ConfigLoader;

mod bundles;
mod check;
mod create;

/// Lode — progressive-disclosure skill bundles for LLM agents
#[derive(Parser)]
#[command(name = "lode", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to lode.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List discovered bundles
    List,
    /// Show a bundle's descriptor and body (the on-demand tier)
    Show { name: String },
    /// Load one reference leaf through the depth-bounded loader
    Leaf {
        /// Bundle name
        name: String,
        /// Leaf target as linked from the body, e.g. references/sessions.md
        target: String,
    },
    /// List a bundle's passive assets (never auto-loaded)
    Assets { name: String },
    /// Run the relevance gate for a request against every descriptor
    Gate {
        /// The request text
        #[arg(required = true, trailing_var_arg = true)]
        request: Vec<String>,
    },
    /// Validate all bundles — non-zero exit on any error finding
    Check {
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scaffold a new bundle in the highest-priority bundle directory
    Create { name: String },
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize a new lode.toml in the current or home directory
    Init {
        /// Create in current directory instead of ~/.lode/
        #[arg(long)]
        local: bool,
    },
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub fn run(self) -> lode_core::Result<()> {
        // Load config first so we can use it for log format
        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();

        // Resolve log level: --verbose > --quiet > --log-level > config default
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level
                .clone()
                .unwrap_or_else(|| config.logging.level.clone())
        };

        // Initialize tracing with the configured format
        if config.logging.format == "json" {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .json()
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
                )
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }

        match self.command {
            Commands::List => bundles::cmd_list(&config_loader),
            Commands::Show { name } => bundles::cmd_show(&config_loader, &name),
            Commands::Leaf { name, target } => bundles::cmd_leaf(&config_loader, &name, &target),
            Commands::Assets { name } => bundles::cmd_assets(&config_loader, &name),
            Commands::Gate { request } => {
                bundles::cmd_gate(&config_loader, config.gate.threshold, &request.join(" "))
            }
            Commands::Check { json } => check::cmd_check(&config_loader, json),
            Commands::Create { name } => create::cmd_create(&config_loader, &name),
            Commands::Config { json } => Self::cmd_config(config, json),
            Commands::Init { local } => create::cmd_init(local),
            Commands::Completions { shell } => Self::cmd_completions(shell),
        }
    }

    fn cmd_config(config: lode_config::LodeConfig, json: bool) -> lode_core::Result<()> {
        if json {
            println!(
                "{}",
                serde_json::to_string_pretty(&config)
                    .map_err(|e| lode_core::LodeError::Config(e.to_string()))?
            );
        } else {
            println!(
                "{}",
                toml::to_string_pretty(&config)
                    .map_err(|e| lode_core::LodeError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> lode_core::Result<()> {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        Ok(())
    }
}
