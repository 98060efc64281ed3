use azure_primary_types::azure::auth::AzureCredentials;
use azure_primary_types::azure::client::ArmClient;
use azure_primary_types::config::{default_resolvers, resolve_subscription};
use azure_primary_types::output::OUTPUT_FILE;
use azure_primary_types::{generate, FilterPolicy, GeneratorError};
use clap::{Parser, ValueEnum};
use std::path::Path;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Generate PRIMARY_RESOURCE_TYPES.json from the Azure Resource Manager API
#[derive(Parser, Debug)]
#[command(name = "azure-primary-types", version, about, long_about = None)]
struct Args {
    /// Log level for debugging (logs go to stderr)
    #[arg(long, value_enum, default_value = "off")]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Log level: {:?}", level);

    Some(guard)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let _log_guard = setup_logging(args.log_level);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), GeneratorError> {
    println!("Azure Primary Resource Types Generator");
    println!("{}", "=".repeat(40));
    println!("Generates {} from the Azure Resource Manager API", OUTPUT_FILE);
    println!();

    let credentials = AzureCredentials::new().map_err(|e| GeneratorError::credential_init(&e))?;
    println!("✓ Azure credentials initialized");

    let subscription = resolve_subscription(&default_resolvers());
    println!("{}", subscription);

    let client = ArmClient::new(credentials, &subscription.id)
        .map_err(|e| GeneratorError::enumeration(&e))?;

    let output_path = Path::new(OUTPUT_FILE);
    generate(&client, &FilterPolicy::default(), output_path).await?;

    println!("\nDone! {} is ready to use.", OUTPUT_FILE);
    Ok(())
}
