use clap::Parser;
use saju_engine::core::batch::{run_batch, summarize_outcomes, write_outputs};
use saju_engine::utils::error::ErrorSeverity;
use saju_engine::utils::monitor::ProcessMonitor;
use saju_engine::utils::logger::{self, LogFormat};
use saju_engine::utils::validation::Validate;
use saju_engine::{BatchConfig, LocalStorage, SajuEngine};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "batch-saju")]
#[command(about = "Analyze many charts from a TOML file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "saju-batch.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override concurrency from config
    #[arg(long)]
    concurrency: Option<usize>,

    /// Only validate the configuration and list the charts
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match BatchConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if let Err(e) = logger::init_logger(LogFormat::from_json_flag(config.json_logs()), args.verbose) {
        eprintln!("⚠️ {}", e);
    }

    tracing::info!("🚀 Starting batch chart analysis");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(concurrency) = args.concurrency {
        config
            .analysis
            .get_or_insert(saju_engine::config::batch_config::AnalysisConfig {
                mode: None,
                concurrency: None,
            })
            .concurrency = Some(concurrency);
        tracing::info!("🔧 Concurrency overridden to: {}", concurrency);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mode = config.mode()?;
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No charts will be computed");
        for chart in &config.charts {
            println!(
                "  {} ({}-{:02}-{:02})",
                chart.label, chart.birth.year, chart.birth.month, chart.birth.day
            );
        }
        return Ok(());
    }

    let monitor = ProcessMonitor::new(args.monitor.unwrap_or_else(|| config.monitoring_enabled()));
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let calendar = match config.calendar() {
        Ok(calendar) => calendar,
        Err(e) => {
            tracing::error!("❌ {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = Arc::new(SajuEngine::new(calendar));
    monitor.record_phase("load", config.charts.len());

    let outcomes = run_batch(engine, config.items(), mode, config.concurrency()).await;
    monitor.record_phase("analysis", outcomes.len());

    let storage = LocalStorage::new(config.output.path.clone());
    match write_outputs(
        &storage,
        &outcomes,
        &config.output.formats,
        config.output_filename(),
    )
    .await
    {
        Ok(files) => {
            for file in &files {
                tracing::info!("📁 Output saved to: {}", storage.full_path(file));
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Writing results failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
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
    monitor.record_phase("output", outcomes.len());
    monitor.log_summary();

    let summary = summarize_outcomes(&outcomes);
    tracing::info!(
        "✅ Batch finished: {} succeeded, {} failed (total {})",
        summary.succeeded,
        summary.failed,
        summary.total
    );
    println!(
        "✅ {} / {} charts analyzed",
        summary.succeeded, summary.total
    );

    if summary.failed > 0 {
        std::process::exit(2);
    }
    Ok(())
}

fn display_config_summary(config: &BatchConfig) {
    println!("📋 Configuration Summary:");
    println!("  Batch: {}", config.batch.name);
    if let Some(description) = &config.batch.description {
        println!("  Description: {}", description);
    }
    println!("  Charts: {}", config.charts.len());
    println!("  Output: {}", config.output.path);
    println!("  Formats: {}", config.output.formats.join(", "));
    println!("  Concurrency: {}", config.concurrency());
    println!();
}
