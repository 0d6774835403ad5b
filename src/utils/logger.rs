use crate::utils::error::{Result, SajuError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 終端機閱讀用
    Compact,
    /// 一行一筆 JSON，方便批次結果送進日誌系統
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json_logs: bool) -> Self {
        if json_logs {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

/// 沒有 RUST_LOG 時的過濾條件。引擎與兩個執行檔的 target 都要列出
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "saju_engine=debug,batch_saju=debug,info"
    } else {
        "saju_engine=info,batch_saju=info,warn"
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// 安裝全域 subscriber。已經安裝過時回傳 `ConfigError`
pub fn init_logger(format: LogFormat, verbose: bool) -> Result<()> {
    let filter = build_filter(verbose);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .json()
                    .with_current_span(false),
            )
            .try_init(),
    };

    installed.map_err(|e| SajuError::ConfigError {
        message: format!("logger already initialized: {}", e),
    })
}
