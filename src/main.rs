use bizval::cli::{Cli, Commands, OutputFormat};
use bizval::config::Config;
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = bizval::telemetry::init_telemetry(&config.telemetry)?;

    let engine = config.build_engine();

    match cli.command {
        Commands::Value(args) => {
            tracing::debug!("Running single valuation");
            args.execute(&engine)?;
        }
        Commands::Batch(args) => {
            tracing::info!(input = %args.input.display(), "Starting batch valuation");
            args.execute(Arc::new(engine)).await?;
        }
        Commands::Industries { format } => {
            let entries = engine.table().entries();
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Table => {
                    println!("{:<26} {:>8} {:>8} {:>8}", "Industry", "Revenue", "EBITDA", "Growth");
                    for entry in entries {
                        println!(
                            "{:<26} {:>7}x {:>7}x {:>7}%",
                            entry.industry_key,
                            entry.revenue_multiple.normalize(),
                            entry.ebitda_multiple.normalize(),
                            (entry.growth_rate * rust_decimal_macros::dec!(100)).normalize()
                        );
                    }
                }
            }
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
