use crate::core::engine::{AnalysisMode, ChartOutput, SajuEngine};
use crate::core::report::{interpreted_csv, to_json};
use crate::domain::model::{BirthInput, InterpretedAnalysis};
use crate::domain::ports::{CalendarAdapter, Storage};
use crate::utils::error::{Result, SajuError};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
pub struct BatchItem {
    pub label: String,
    pub input: BirthInput,
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub label: String,
    pub input: BirthInput,
    pub result: Result<ChartOutput>,
}

impl BatchOutcome {
    pub fn interpreted(&self) -> Option<&InterpretedAnalysis> {
        match &self.result {
            Ok(ChartOutput::Interpreted(analysis)) => Some(analysis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub fn summarize_outcomes(outcomes: &[BatchOutcome]) -> BatchSummary {
    let succeeded = outcomes.iter().filter(|o| o.result.is_ok()).count();
    BatchSummary {
        total: outcomes.len(),
        succeeded,
        failed: outcomes.len() - succeeded,
    }
}

/// 各命盤彼此獨立，在 blocking worker 上計算，同時執行數受 `concurrency` 限制。
/// 單一命盤失敗只記錄在該筆結果，不影響其他命盤；輸出順序與輸入相同
pub async fn run_batch<A>(
    engine: Arc<SajuEngine<A>>,
    items: Vec<BatchItem>,
    mode: AnalysisMode,
    concurrency: usize,
) -> Vec<BatchOutcome>
where
    A: CalendarAdapter + 'static,
{
    tracing::info!(
        "Computing {} charts (mode: {}, concurrency: {})",
        items.len(),
        mode,
        concurrency
    );

    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(items.len());

    for item in items {
        let engine = engine.clone();
        let semaphore = semaphore.clone();
        let input = item.input;

        let handle = tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| SajuError::invariant(format!("batch semaphore closed: {}", e)))?;
            tokio::task::spawn_blocking(move || engine.compute(&input, mode))
                .await
                .map_err(|e| SajuError::invariant(format!("chart worker failed: {}", e)))?
        });
        handles.push((item, handle));
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for (item, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(SajuError::invariant(format!("batch task failed: {}", e))),
        };

        if let Err(e) = &result {
            tracing::warn!(
                "⚠️ Chart '{}' failed: {} (Category: {:?}, Severity: {:?})",
                item.label,
                e,
                e.category(),
                e.severity()
            );
        }

        outcomes.push(BatchOutcome {
            label: item.label,
            input: item.input,
            result,
        });
    }

    outcomes
}

#[derive(Serialize)]
struct OutcomeRecord<'a> {
    label: &'a str,
    input: &'a BirthInput,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a ChartOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct BatchDocument<'a> {
    summary: BatchSummary,
    charts: Vec<OutcomeRecord<'a>>,
}

/// 依指定格式 (json / csv) 寫出結果，回傳寫入的檔名
pub async fn write_outputs<S: Storage>(
    storage: &S,
    outcomes: &[BatchOutcome],
    formats: &[String],
    filename: &str,
) -> Result<Vec<String>> {
    let mut written = Vec::new();

    for format in formats {
        let name = format!("{}.{}", filename, format);
        let data = match format.as_str() {
            "json" => {
                let document = BatchDocument {
                    summary: summarize_outcomes(outcomes),
                    charts: outcomes
                        .iter()
                        .map(|o| OutcomeRecord {
                            label: &o.label,
                            input: &o.input,
                            output: o.result.as_ref().ok(),
                            error: o.result.as_ref().err().map(|e| e.to_string()),
                        })
                        .collect(),
                };
                to_json(&document)?.into_bytes()
            }
            "csv" => {
                let rows: Vec<(&str, &InterpretedAnalysis)> = outcomes
                    .iter()
                    .filter_map(|o| o.interpreted().map(|a| (o.label.as_str(), a)))
                    .collect();
                if rows.is_empty() {
                    tracing::warn!("No interpreted charts to write as CSV");
                }
                interpreted_csv(rows)?
            }
            other => {
                return Err(SajuError::InvalidInputError {
                    field: "output.formats".to_string(),
                    value: other.to_string(),
                    reason: "Valid formats: json, csv".to_string(),
                })
            }
        };

        tracing::debug!("Writing {} ({} bytes)", name, data.len());
        storage.write_file(&name, &data).await?;
        written.push(name);
    }

    Ok(written)
}
