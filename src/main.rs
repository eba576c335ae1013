mod commands;

use clap::{Parser, Subcommand};
use itemservice_core::config;
use itemservice_messages::{Locale, MessageResolver};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "itemservice",
    version,
    about = "Item service bootstrap with locale-aware message resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a message key and print the text.
    Resolve {
        /// Message key, e.g. `hello.name`.
        key: String,
        /// Positional arguments for `{0}`, `{1}`, ...
        args: Vec<String>,
        /// Locale tag (e.g. `en`, `ko-KR`). Defaults to the configured locale.
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Text to print when the key has no message.
        #[arg(short, long = "default")]
        default_message: Option<String>,
    },
    /// List every base key with its text for a locale.
    Keys {
        /// Locale tag. Defaults to the configured locale.
        #[arg(short, long)]
        locale: Option<Locale>,
        /// Print a JSON object instead of `key = text` lines.
        #[arg(long)]
        json: bool,
    },
    /// Verify the catalog and print a summary.
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (cfg, source) = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.service.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if source == config::ConfigSource::Defaults {
        info!("Config file not found at {}, using defaults", cli.config);
    }

    let resolver = bootstrap(&cfg)?;

    let output = match cli.command {
        Commands::Resolve {
            key,
            args,
            locale,
            default_message,
        } => commands::handle_resolve(
            &resolver,
            &key,
            &args,
            locale.as_ref(),
            default_message.as_deref(),
        )?,
        Commands::Keys { locale, json } => commands::handle_keys(&resolver, locale.as_ref(), json)?,
        Commands::Check => commands::handle_check(&resolver)?,
    };
    println!("{output}");

    Ok(())
}

/// Build the message resolver and refuse to start if the default locale
/// cannot serve every base key.
fn bootstrap(cfg: &config::Config) -> anyhow::Result<MessageResolver> {
    let resolver = MessageResolver::from_config(&cfg.messages)?;

    let checked = resolver
        .verify_default_locale()
        .map_err(|e| anyhow::anyhow!("default locale check failed: {e}"))?;
    for (basename, locale, key) in resolver.catalog().orphaned_keys() {
        warn!("{basename}_{locale}: key '{key}' has no base message");
    }

    info!(
        "{} ready: default locale {}, {checked} base keys",
        cfg.service.name,
        resolver.default_locale().tag()
    );
    Ok(resolver)
}
