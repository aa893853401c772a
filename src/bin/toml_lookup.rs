use clap::Parser;
use library_lookup::config::toml_config::{RenderConfig, SelectionConfig, TomlConfig};
use library_lookup::core::render_pass::render_pass;
use library_lookup::core::selection_store::StorageSelectionStore;
use library_lookup::core::{BranchSelection, Catalogue, ConfigProvider, CopyCounting, SelectionStore, Storage};
use library_lookup::utils::{logger, validation::Validate};
use library_lookup::{LocalStorage, LookupEngine, LookupPipeline};

#[derive(Parser)]
#[command(name = "toml-lookup")]
#[command(about = "Render library availability with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "library-lookup.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Override the nearby branches from config
    #[arg(long = "branch", value_delimiter = ',')]
    branches: Vec<String>,

    /// Override the copy counting mode from config
    #[arg(long, value_enum)]
    copy_counting: Option<CopyCounting>,

    /// Dry run - show what would be rendered without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based library lookup");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if !args.branches.is_empty() {
        let store_file = config.selection.as_ref().and_then(|s| s.store_file.clone());
        config.selection = Some(SelectionConfig {
            branches: Some(args.branches.clone()),
            store_file,
        });
        tracing::info!("🔧 Branches overridden to: {}", args.branches.join("; "));
    }

    if let Some(counting) = args.copy_counting {
        let render = config.render.get_or_insert(RenderConfig {
            copy_counting: None,
            page_title: None,
        });
        render.copy_counting = Some(counting);
        tracing::info!("🔧 Copy counting overridden to: {}", counting);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        perform_dry_run(&config).await?;
        return Ok(());
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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Name: {}", config.name());
    println!(
        "  Catalogue: {}/{}",
        config.input_path(),
        config.books_file()
    );
    println!("  Output: {}/{}", config.output_path(), config.page_file());
    println!("  Copy counting: {}", config.copy_counting());

    match config.branches() {
        Some(branches) => println!("  Branches: {}", branches.join("; ")),
        None => println!("  Branches: saved selection ({})", config.selection_file()),
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let source = LocalStorage::new(config.input_path().to_string());
    let data = source.read_file(config.books_file()).await?;
    let catalogue = Catalogue::from_json_slice(&data)?;

    let selection: BranchSelection = match config.branches() {
        Some(branches) => branches.iter().cloned().collect(),
        None => {
            let target = LocalStorage::new(config.output_path().to_string());
            StorageSelectionStore::new(target, config.selection_file())
                .load()
                .await?
        }
    };

    let pass = render_pass(&catalogue.books, &selection, config.copy_counting());

    println!("🔍 Dry Run Analysis:");
    println!("  Books: {}", catalogue.books.len());
    println!("  Branches with available copies: {}", catalogue.branches().len());
    println!("  Selected: {}", pass.selected_branch_label);
    println!();

    for book in &pass.books {
        println!("  {:<48} {}", book.title, book.availability_message);
    }

    println!();
    println!("✅ Dry run analysis complete.");

    Ok(())
}
