use clap::Parser;
use guitar_analyzer::build_engine;
use guitar_analyzer::config::toml_config::TomlConfig;
use guitar_analyzer::core::ConfigProvider;
use guitar_analyzer::utils::validation::{self, Validate};
use guitar_analyzer::utils::logger;

#[derive(Parser)]
#[command(name = "toml-analyzer")]
#[command(about = "Guitar listing analysis driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "analyzer-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the input file from config
    #[arg(long)]
    input: Option<String>,

    /// Dry run - show the analysis plan without reading the input
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // An unknown level is reported by validation below; log at info until then.
    let level = match (args.verbose, config.log_level()) {
        (true, _) => "debug",
        (false, level) if validation::validate_log_level("logging.level", level).is_ok() => level,
        (false, _) => "info",
    };
    if config.json_logging() {
        logger::init_json_logger(level);
    } else {
        logger::init_cli_logger(level);
    }

    tracing::info!("🚀 Starting TOML-based guitar analyzer");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Some(input) = &args.input {
        config.input.path = Some(input.clone());
        tracing::info!("🔧 Input overridden to: {}", input);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No listings will be read");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = match build_engine(&config, config.console_enabled(), monitor_enabled) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    match engine.run().await {
        Ok((report, destinations)) => {
            tracing::info!(
                "✅ Analysis '{}' completed: {} listings",
                config.analysis.name,
                report.total_records
            );
            for destination in destinations.iter().filter(|d| d.as_str() != "stdout") {
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Analysis: {}", config.analysis.name);
    if let Some(description) = &config.analysis.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    if config.output_formats().is_empty() {
        println!("  Formats: (console only)");
    } else {
        println!("  Formats: {}", config.output_formats().join(", "));
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📄 Input:");
    println!("  Path: {}", config.input_path());
    println!("  Delimiter: {:?}", config.delimiter());
    println!("  Header row: {}", config.has_headers());
    if config.infer_missing_year() {
        println!("  ✅ Missing years inferred from titles");
    }

    let plan = config.analysis_plan();
    println!();
    println!("⚙️ Analysis Plan:");
    println!("  Overview, min/max, average, price ranges");
    println!("  Cheapest listings shown: {}", plan.top_n);
    for needle in &plan.title_searches {
        println!("  Title search: \"{}\"", needle);
    }
    for target in &plan.price_targets {
        println!("  Binary search for price: ${:.2}", target);
    }
    if plan.market_breakdown {
        println!("  ✅ Search term breakdown and trends");
    }

    println!();
    println!("💾 Output Configuration:");
    println!("  Console: {}", config.console_enabled());
    println!("  Path: {}", config.output_path());

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
