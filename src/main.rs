use clap::Parser;
use guitar_analyzer::utils::{logger, validation::Validate};
use guitar_analyzer::{build_engine, CliConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(if config.verbose { "debug" } else { "info" });

    tracing::info!("Starting guitar-analyzer CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = match build_engine(&config, true, config.monitor) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    match engine.run().await {
        Ok((report, destinations)) => {
            tracing::info!(
                "✅ Analysis completed: {} listings from {}",
                report.total_records,
                report.source
            );
            for destination in destinations.iter().filter(|d| d.as_str() != "stdout") {
                tracing::info!("📁 Output saved to: {}", destination);
                println!("📁 Output saved to: {}", destination);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
