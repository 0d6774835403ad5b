pub mod balance;
pub mod batch;
pub mod engine;
pub mod interpreter;
pub mod relations;
pub mod report;
pub mod resolver;
pub mod rule_tables;
pub mod sinsal;
pub mod stages;
pub mod tables;

pub use crate::domain::model::{Chart, FullAnalysis, InterpretedAnalysis, Marker};
pub use crate::domain::ports::{CalendarAdapter, Storage};
pub use crate::utils::error::Result;
