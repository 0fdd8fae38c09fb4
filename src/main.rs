use clap::Parser;
use fantasy_drafter::utils::logger;
use fantasy_drafter::{run_scrape, CliConfig, Result, TomlConfig};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting fantasy-drafter");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // A panic inside the run surfaces as a JoinError instead of tearing down the process.
    let outcome = match tokio::spawn(run(config)).await {
        Ok(outcome) => outcome,
        Err(join_error) => {
            tracing::error!("❌ Run aborted unexpectedly: {}", join_error);
            eprintln!("❌ An unexpected error occurred: {}", join_error);
            return ExitCode::FAILURE;
        }
    };

    match outcome {
        Ok(output_path) => {
            println!("✅ Scrape completed successfully!");
            println!("📁 Output saved to: {}", output_path);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("❌ Scrape failed: {} (Category: {:?})", e, e.category());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            ExitCode::FAILURE
        }
    }
}

async fn run(config: CliConfig) -> Result<String> {
    if let Some(path) = config.config.clone() {
        tracing::info!("📁 Loading configuration from: {}", path);
        return run_scrape(TomlConfig::from_file(&path)?).await;
    }
    run_scrape(config).await
}
