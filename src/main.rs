use clap::Parser;
use saju_engine::core::report::{render_text, to_json};
use saju_engine::core::resolver::resolve_chart;
use saju_engine::utils::error::{ErrorSeverity, SajuError};
use saju_engine::utils::monitor::ProcessMonitor;
use saju_engine::utils::logger::{self, LogFormat};
use saju_engine::utils::validation::Validate;
use saju_engine::{compute_chart, ChartOutput, CliConfig, FixedCalendar, SajuEngine};

fn run(config: &CliConfig, monitor: &ProcessMonitor) -> Result<ChartOutput, SajuError> {
    let mode = config.analysis_mode()?;
    let raw = config.raw_pillars()?;
    monitor.record_phase("parse", 0);

    // 有出生日期時走完整流程 (含日期驗證)，否則直接以干支計算
    let output = match config.birth_input()? {
        Some(input) => SajuEngine::new(FixedCalendar::new(raw)).compute(&input, mode)?,
        None => compute_chart(&resolve_chart(&raw)?, mode)?,
    };
    monitor.record_phase("analysis", 1);
    Ok(output)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if let Err(e) = logger::init_logger(LogFormat::Compact, config.verbose) {
        eprintln!("⚠️ {}", e);
    }

    tracing::info!("Starting saju CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor = ProcessMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    let result = run(&config, &monitor);
    monitor.log_summary();

    match result {
        Ok(output) => {
            if config.json_output() {
                println!("{}", to_json(&output)?);
            } else {
                print!("{}", render_text(&output));
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
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2, // 輸入錯誤
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3, // 內部錯誤
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
