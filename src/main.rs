use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tienda::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tienda::AppCommand {
    fn from(cmd: Commands) -> tienda::AppCommand {
        match cmd {
            Commands::Translate { key, lang, args } => tienda::AppCommand::Translate {
                key,
                language: lang,
                args,
            },
            Commands::Normalize { amount, currency } => {
                tienda::AppCommand::Normalize { amount, currency }
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Resolve a localized string for a catalog key
    Translate {
        /// Catalog key, e.g. "back" or "lastCheckedOn"
        key: String,

        /// Language code override, e.g. "es"
        #[arg(short, long)]
        lang: Option<String>,

        /// Formatter arguments as NAME=VALUE pairs
        #[arg(short, long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },
    /// Convert an amount to the reference currency (USD)
    Normalize {
        /// Amount to convert (non-negative)
        amount: f64,

        /// Currency code of the amount, e.g. "EUR"
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => tienda::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = tienda::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
language: "en"

providers:
  exchange_rate:
    base_url: "https://v6.exchangerate-api.com"
    api_key: ""
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
