pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{FixedCalendar, LocalStorage, StaticCalendar};
pub use crate::config::BatchConfig;
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::engine::{
    analyze_chart, compute_chart, interpret_chart, AnalysisMode, ChartOutput, SajuEngine,
};
pub use crate::domain::model::{
    BirthInput, Chart, FullAnalysis, InterpretedAnalysis, InterpretedMarker, Marker,
    RawFourPillars, RawPillar,
};
pub use crate::domain::ports::CalendarAdapter;
pub use crate::utils::error::{Result, SajuError};
