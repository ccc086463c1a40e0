use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msb_sdk::{SdkConfig, sandbox_name_for};
use msb_uuid::UuidValue;

#[derive(Parser)]
#[command(name = "msb")]
#[command(about = "microsandbox identifier and SDK configuration tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate random version 4 UUIDs
    New {
        /// How many to generate
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// Parse a UUID and show its canonical form, version and variant
    Parse {
        /// UUID text (36 characters, any case)
        text: String,
    },
    /// Check that a UUID parses
    Validate {
        /// UUID text (36 characters, any case)
        text: String,
    },
    /// Print a default sandbox name
    SandboxName,
    /// Print the resolved SDK configuration
    Config,
}

/// Entry point for the `msb` tool.
///
/// # Environment Variables
/// - `MSB_SERVER_URL`: server URL (default: "http://127.0.0.1:5555")
/// - `MSB_NAMESPACE`: namespace (default: "default")
/// - `MSB_NAME`: sandbox name (default: generated `sandbox-xxxxxxxx`)
/// - `MSB_API_KEY`: API key (optional)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("msb=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New { count } => {
            for _ in 0..count {
                let id = UuidValue::generate().context("generating UUID")?;
                println!("{id}");
            }
        }
        Commands::Parse { text } => {
            let id = UuidValue::parse(&text).with_context(|| format!("parsing {text:?}"))?;
            println!("canonical: {id}");
            println!("version:   {}", id.version());
            println!("variant:   {}", id.variant());
            if id.is_nil() {
                println!("nil:       true");
            }
        }
        Commands::Validate { text } => {
            UuidValue::validate(&text).with_context(|| format!("invalid UUID {text:?}"))?;
            println!("ok");
        }
        Commands::SandboxName => {
            let id = UuidValue::generate().context("generating UUID")?;
            println!("{}", sandbox_name_for(&id));
        }
        Commands::Config => {
            let config = SdkConfig::from_env_values(
                std::env::var("MSB_SERVER_URL").ok(),
                std::env::var("MSB_NAMESPACE").ok(),
                std::env::var("MSB_NAME").ok(),
                std::env::var("MSB_API_KEY").ok(),
            )?;
            tracing::info!("++ Resolved SDK config for {}", config.server_url());
            println!("{config:#?}");
        }
    }

    Ok(())
}
