use crate::adapters::calendar::{birth_key, StaticCalendar};
use crate::config::parse_pillar;
use crate::core::batch::BatchItem;
use crate::core::engine::AnalysisMode;
use crate::domain::model::{BirthInput, RawFourPillars, RawPillar};
use crate::utils::error::{Result, SajuError};
use crate::utils::validation::{
    validate_non_empty_string, validate_one_of, validate_path, validate_positive_number, Validate,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchMeta,
    pub output: OutputConfig,
    pub analysis: Option<AnalysisConfig>,
    pub monitoring: Option<MonitoringConfig>,
    #[serde(default)]
    pub charts: Vec<ChartEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchMeta {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub mode: Option<String>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

/// 干支: "갑자" 形式的字串或 [天干編號, 地支編號]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PillarSpec {
    Name(String),
    Ids([i32; 2]),
}

impl PillarSpec {
    pub fn to_raw(&self, field: &str) -> Result<RawPillar> {
        match self {
            PillarSpec::Name(text) => parse_pillar(field, text),
            PillarSpec::Ids([stem, branch]) => Ok(RawPillar::new(*stem, *branch)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillarsEntry {
    pub year: PillarSpec,
    pub month: PillarSpec,
    pub day: PillarSpec,
    pub hour: Option<PillarSpec>,
}

impl PillarsEntry {
    pub fn to_raw(&self) -> Result<RawFourPillars> {
        Ok(RawFourPillars {
            year: self.year.to_raw("year")?,
            month: self.month.to_raw("month")?,
            day: self.day.to_raw("day")?,
            hour: self.hour.as_ref().map(|h| h.to_raw("hour")).transpose()?,
        })
    }
}

/// 一張命盤: 出生資料與外部萬歲曆匯出的四柱
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEntry {
    pub label: String,
    pub birth: BirthInput,
    pub pillars: PillarsEntry,
}

const DEFAULT_FILENAME: &str = "saju_batch";
const DEFAULT_CONCURRENCY: usize = 4;
const VALID_FORMATS: [&str; 2] = ["json", "csv"];

impl BatchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed)?)
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| SajuError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn mode(&self) -> Result<AnalysisMode> {
        match self.analysis.as_ref().and_then(|a| a.mode.as_deref()) {
            Some(mode) => mode.parse(),
            None => Ok(AnalysisMode::default()),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.analysis
            .as_ref()
            .and_then(|a| a.concurrency)
            .unwrap_or(DEFAULT_CONCURRENCY)
    }

    pub fn output_filename(&self) -> &str {
        self.output.filename.as_deref().unwrap_or(DEFAULT_FILENAME)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    /// 出生資料 (含經度) 完全相同的兩張命盤會在查表時互相覆蓋
    fn check_unique_births(&self) -> Result<()> {
        let mut seen: HashMap<_, &str> = HashMap::new();
        for chart in &self.charts {
            if let Some(first) = seen.insert(birth_key(&chart.birth), &chart.label) {
                return Err(SajuError::ConfigError {
                    message: format!(
                        "charts '{}' and '{}' share the same birth input",
                        first, chart.label
                    ),
                });
            }
        }
        Ok(())
    }

    /// 以各命盤的四柱建立查表用的萬歲曆
    pub fn calendar(&self) -> Result<StaticCalendar> {
        self.check_unique_births()?;

        let mut calendar = StaticCalendar::new();
        for (i, chart) in self.charts.iter().enumerate() {
            let pillars = chart.pillars.to_raw().map_err(|e| SajuError::ConfigError {
                message: format!("charts[{}] '{}': {}", i, chart.label, e),
            })?;
            calendar.insert(&chart.birth, pillars);
        }
        Ok(calendar)
    }

    pub fn items(&self) -> Vec<BatchItem> {
        self.charts
            .iter()
            .map(|c| BatchItem {
                label: c.label.clone(),
                input: c.birth,
            })
            .collect()
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("batch.name", &self.batch.name)?;
        validate_path("output.path", &self.output.path)?;
        validate_non_empty_string("output.filename", self.output_filename())?;

        if self.output.formats.is_empty() {
            return Err(SajuError::MissingInputError {
                field: "output.formats".to_string(),
            });
        }
        for format in &self.output.formats {
            validate_one_of("output.formats", format, &VALID_FORMATS)?;
        }

        // CSV 一列對應一個已解釋的神煞，只有 interpreted 模式才有內容
        let mode = self.mode()?;
        if mode != AnalysisMode::Interpreted && self.output.formats.iter().any(|f| f == "csv") {
            return Err(SajuError::InvalidInputError {
                field: "output.formats".to_string(),
                value: "csv".to_string(),
                reason: format!("CSV output requires mode 'interpreted', not '{}'", mode),
            });
        }
        validate_positive_number("analysis.concurrency", self.concurrency(), 1)?;

        for (i, chart) in self.charts.iter().enumerate() {
            validate_non_empty_string(&format!("charts[{}].label", i), &chart.label)?;
        }
        self.check_unique_births()
    }
}
