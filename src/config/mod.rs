pub mod batch_config;

use crate::core::engine::AnalysisMode;
use crate::core::tables::pillar_by_name;
use crate::domain::model::{BirthInput, RawFourPillars, RawPillar};
use crate::utils::error::{Result, SajuError};
use crate::utils::validation::{validate_one_of, validate_required_field, Validate};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub use batch_config::BatchConfig;

/// 干支參數: 兩字干支 ("갑자" / "甲子") 或 "天干編號,地支編號" ("0,0")
pub fn parse_pillar(field: &str, text: &str) -> Result<RawPillar> {
    let text = text.trim();
    if let Some((stem, branch)) = text.split_once(',') {
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| SajuError::InvalidInputError {
                    field: field.to_string(),
                    value: text.to_string(),
                    reason: "Expected '<stem id>,<branch id>'".to_string(),
                })
        };
        return Ok(RawPillar::new(parse(stem)?, parse(branch)?));
    }

    let pillar = pillar_by_name(text).map_err(|e| match e {
        SajuError::InvalidInputError { value, reason, .. } => SajuError::InvalidInputError {
            field: field.to_string(),
            value,
            reason,
        },
        other => other,
    })?;
    Ok(RawPillar::new(
        i32::from(pillar.stem.id),
        i32::from(pillar.branch.id),
    ))
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Parser)]
#[command(name = "saju")]
#[command(about = "Four-pillar chart analysis: elements, twelve stages and sinsal markers")]
pub struct CliConfig {
    #[arg(long, help = "Year pillar, e.g. 경오 or 6,6")]
    pub year: String,

    #[arg(long, help = "Month pillar")]
    pub month: String,

    #[arg(long, help = "Day pillar (its stem is the day master)")]
    pub day: String,

    #[arg(long, help = "Hour pillar; required for analysis")]
    pub hour: Option<String>,

    #[arg(long, help = "Solar birth date (YYYY-MM-DD), validated before analysis")]
    pub date: Option<String>,

    #[arg(long, help = "Birth time (HH:MM)")]
    pub time: Option<String>,

    #[arg(long, default_value = "interpreted")]
    pub mode: String,

    #[arg(long, default_value = "text")]
    pub format: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process CPU/memory usage")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn analysis_mode(&self) -> Result<AnalysisMode> {
        self.mode.parse()
    }

    pub fn json_output(&self) -> bool {
        self.format == "json"
    }

    pub fn raw_pillars(&self) -> Result<RawFourPillars> {
        Ok(RawFourPillars {
            year: parse_pillar("year", &self.year)?,
            month: parse_pillar("month", &self.month)?,
            day: parse_pillar("day", &self.day)?,
            hour: self
                .hour
                .as_deref()
                .map(|h| parse_pillar("hour", h))
                .transpose()?,
        })
    }

    /// 有指定日期時才建立出生資料
    pub fn birth_input(&self) -> Result<Option<BirthInput>> {
        let Some(date) = &self.date else {
            return Ok(None);
        };
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
            SajuError::InvalidInputError {
                field: "date".to_string(),
                value: date.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut input = BirthInput::new(date.year(), date.month(), date.day(), None);
        if let Some(time) = &self.time {
            let time = NaiveTime::parse_from_str(time, "%H:%M").map_err(|e| {
                SajuError::InvalidInputError {
                    field: "time".to_string(),
                    value: time.clone(),
                    reason: e.to_string(),
                }
            })?;
            input.hour = Some(time.hour());
            input = input.with_minute(time.minute());
        }
        Ok(Some(input))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_one_of("format", &self.format, &["text", "json"])?;
        self.analysis_mode()?;
        if self.time.is_some() {
            validate_required_field("date", &self.date)?;
        }
        self.raw_pillars()?;
        if let Some(input) = self.birth_input()? {
            input.validate()?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["saju"];
        argv.extend_from_slice(args);
        CliConfig::parse_from(argv)
    }

    #[test]
    fn test_parse_pillar_forms() {
        assert_eq!(parse_pillar("day", "갑자").unwrap(), RawPillar::new(0, 0));
        assert_eq!(parse_pillar("day", "庚午").unwrap(), RawPillar::new(6, 6));
        assert_eq!(parse_pillar("day", " 9, 11 ").unwrap(), RawPillar::new(9, 11));
        assert!(parse_pillar("day", "9,x").is_err());
        assert!(matches!(
            parse_pillar("day", "가나"),
            Err(SajuError::UnknownSymbolName { .. })
        ));
    }

    #[test]
    fn test_cli_defaults() {
        let config = parse(&["--year", "경오", "--month", "임오", "--day", "갑자", "--hour", "병인"]);
        assert_eq!(config.analysis_mode().unwrap(), AnalysisMode::Interpreted);
        assert!(!config.json_output());
        assert!(config.validate().is_ok());
        assert_eq!(config.raw_pillars().unwrap().hour, Some(RawPillar::new(2, 2)));
        assert!(config.birth_input().unwrap().is_none());
    }

    #[test]
    fn test_time_requires_date() {
        let config = parse(&["--year", "경오", "--month", "임오", "--day", "갑자", "--time", "04:30"]);
        assert!(matches!(
            config.validate(),
            Err(SajuError::MissingInputError { .. })
        ));
    }

    #[test]
    fn test_birth_input_from_date_and_time() {
        let config = parse(&[
            "--year", "경오", "--month", "임오", "--day", "갑자", "--hour", "병인", "--date",
            "1990-06-15", "--time", "04:30",
        ]);
        let input = config.birth_input().unwrap().unwrap();
        assert_eq!((input.year, input.month, input.day), (1990, 6, 15));
        assert_eq!(input.hour, Some(4));
        assert_eq!(input.minute, Some(30));
    }

    #[test]
    fn test_invalid_format_rejected() {
        let config = parse(&[
            "--year", "경오", "--month", "임오", "--day", "갑자", "--format", "xml",
        ]);
        assert!(config.validate().is_err());
    }
}
