use clap::Parser;
use laundry_planner::app::runner::run;
use laundry_planner::config::LogFormat;
use laundry_planner::utils::error::ErrorSeverity;
use laundry_planner::utils::logger;
use laundry_planner::CliConfig;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting laundry-planner CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(config).await {
        Ok(output) => {
            tracing::info!("✅ Plan written to {}", output.display());
            println!("✅ Plan written to {}", output.display());
        }
        Err(e) if e.is_cancellation() => {
            tracing::debug!("Run ended without a chosen file");
        }
        Err(e) => {
            tracing::error!(
                "❌ Planning failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
