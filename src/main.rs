use clap::Parser;
use library_lookup::core::ConfigProvider;
use library_lookup::utils::{logger, validation::Validate};
use library_lookup::{CliConfig, LocalStorage, LookupEngine, LookupPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting library-lookup CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let source = LocalStorage::new(config.input_path().to_string());
    let target = LocalStorage::new(config.output_path().to_string());
    let pipeline = LookupPipeline::new(source, target, config);
    let engine = LookupEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Page written to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Render failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
