use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// 符號種類 (天干 / 地支)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Stem,
    Branch,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Stem => write!(f, "stem"),
            SymbolKind::Branch => write!(f, "branch"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SajuError {
    #[error("Invalid {kind} id: {id}")]
    InvalidSymbolId { kind: SymbolKind, id: i64 },

    #[error("Unknown {kind} name: {name}")]
    UnknownSymbolName { kind: SymbolKind, name: String },

    #[error("Hour pillar is required but could not be determined")]
    MissingHourPillar,

    #[error("Internal invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("Calendar adapter failed: {message}")]
    CalendarError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required field: {field}")]
    MissingInputError { field: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("CSV writing error: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Calendar,
    Internal,
    Configuration,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SajuError {
    pub fn invariant(message: impl Into<String>) -> Self {
        SajuError::InvariantViolation {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SajuError::InvalidSymbolId { .. } | SajuError::CalendarError { .. } => {
                ErrorCategory::Calendar
            }
            SajuError::UnknownSymbolName { .. }
            | SajuError::MissingHourPillar
            | SajuError::InvalidInputError { .. }
            | SajuError::MissingInputError { .. } => ErrorCategory::Input,
            SajuError::InvariantViolation { .. } => ErrorCategory::Internal,
            SajuError::ConfigError { .. } | SajuError::TomlError(_) => {
                ErrorCategory::Configuration
            }
            SajuError::IoError(_) | SajuError::SerializationError(_) | SajuError::CsvError(_) => {
                ErrorCategory::Io
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SajuError::MissingHourPillar
            | SajuError::UnknownSymbolName { .. }
            | SajuError::InvalidInputError { .. }
            | SajuError::MissingInputError { .. } => ErrorSeverity::Medium,
            SajuError::InvalidSymbolId { .. }
            | SajuError::CalendarError { .. }
            | SajuError::ConfigError { .. }
            | SajuError::TomlError(_)
            | SajuError::IoError(_)
            | SajuError::SerializationError(_)
            | SajuError::CsvError(_) => ErrorSeverity::High,
            SajuError::InvariantViolation { .. } => ErrorSeverity::Critical,
        }
    }

    /// 使用者可理解的錯誤訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            SajuError::MissingHourPillar => {
                "Birth hour is required to build the hour pillar".to_string()
            }
            SajuError::InvalidSymbolId { kind, id } => {
                format!("The calendar returned an invalid {} id ({})", kind, id)
            }
            SajuError::UnknownSymbolName { kind, name } => {
                format!("'{}' is not a known {} name", name, kind)
            }
            SajuError::InvariantViolation { .. } => {
                "An internal error occurred while interpreting the chart".to_string()
            }
            SajuError::InvalidInputError { field, reason, .. } => {
                format!("Invalid input for {}: {}", field, reason)
            }
            SajuError::MissingInputError { field } => format!("Please provide {}", field),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => match self {
                SajuError::MissingHourPillar => "Supply the birth hour (0-23) and try again",
                _ => "Check the birth date, time and pillar values you entered",
            },
            ErrorCategory::Calendar => {
                "The calendar provider returned unexpected data; verify its configuration"
            }
            ErrorCategory::Internal => "This is a bug in the rule tables; please report it",
            ErrorCategory::Configuration => "Check the configuration file syntax and values",
            ErrorCategory::Io => "Check the output path and file permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, SajuError>;
