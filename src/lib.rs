pub mod config;
pub mod locale;
pub mod log;
pub mod normalize;
pub mod providers;
pub mod rates;

use crate::locale::{LocaleContext, MessageArgs};
use crate::normalize::MonetaryAmount;
use crate::providers::exchange_rate_api::ExchangeRateApiProvider;
use anyhow::{Context, Result, bail};
use console::style;
use tracing::{debug, info};

pub enum AppCommand {
    Translate {
        key: String,
        language: Option<String>,
        args: Vec<String>,
    },
    Normalize {
        amount: f64,
        currency: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Tienda starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Translate {
            key,
            language,
            args,
        } => translate(&config, &key, language.as_deref(), &args),
        AppCommand::Normalize { amount, currency } => {
            normalize_price(&config, amount, &currency).await
        }
    }
}

fn translate(
    config: &config::AppConfig,
    key: &str,
    language: Option<&str>,
    args: &[String],
) -> Result<()> {
    let language = language.unwrap_or(&config.language);
    let ctx = LocaleContext::new(language)?;

    let mut message_args = MessageArgs::new();
    for arg in args {
        let Some((name, value)) = arg.split_once('=') else {
            bail!("Invalid message argument '{arg}', expected NAME=VALUE");
        };
        message_args = message_args.with(name, value);
    }

    println!("{}", ctx.resolve_with(key, &message_args));
    Ok(())
}

async fn normalize_price(config: &config::AppConfig, amount: f64, currency: &str) -> Result<()> {
    if amount < 0.0 {
        bail!("Amount must be non-negative, got {amount}");
    }

    let provider_config = config
        .providers
        .exchange_rate
        .as_ref()
        .context("Exchange rate provider is not configured")?;
    let provider =
        ExchangeRateApiProvider::new(&provider_config.base_url, &provider_config.api_key);

    let price = MonetaryAmount::new(amount, &currency.to_uppercase());
    let normalized = normalize::to_reference_currency(&price, &provider).await;

    println!(
        "{:.2} {} -> {}",
        price.amount,
        price.currency,
        style(format!("{:.2} {}", normalized.amount, normalized.currency)).bold()
    );
    if normalized.currency == price.currency && normalized.currency != rates::REFERENCE_CURRENCY {
        println!(
            "{}",
            style("exchange rates unavailable, amount left unconverted").dim()
        );
    }
    Ok(())
}
