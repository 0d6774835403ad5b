use crate::core::balance::analyze_elements;
use crate::core::interpreter::{interpret_markers, summarize};
use crate::core::relations::find_relations;
use crate::core::resolver::resolve_chart;
use crate::core::sinsal::calculate_sinsal;
use crate::core::stages::calculate_stages;
use crate::domain::model::{BirthInput, Chart, FullAnalysis, InterpretedAnalysis};
use crate::domain::ports::CalendarAdapter;
use crate::utils::error::{Result, SajuError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 輸出的詳細程度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Pillars,
    Full,
    #[default]
    Interpreted,
}

impl FromStr for AnalysisMode {
    type Err = SajuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pillars" => Ok(AnalysisMode::Pillars),
            "full" => Ok(AnalysisMode::Full),
            "interpreted" => Ok(AnalysisMode::Interpreted),
            other => Err(SajuError::InvalidInputError {
                field: "mode".to_string(),
                value: other.to_string(),
                reason: "Valid modes: pillars, full, interpreted".to_string(),
            }),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisMode::Pillars => "pillars",
            AnalysisMode::Full => "full",
            AnalysisMode::Interpreted => "interpreted",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartOutput {
    Pillars(Chart),
    Full(Box<FullAnalysis>),
    Interpreted(Box<InterpretedAnalysis>),
}

impl ChartOutput {
    pub fn chart(&self) -> &Chart {
        match self {
            ChartOutput::Pillars(chart) => chart,
            ChartOutput::Full(analysis) => &analysis.chart,
            ChartOutput::Interpreted(analysis) => &analysis.analysis.chart,
        }
    }
}

/// 五行、十二運星、神煞與干支作用
pub fn analyze_chart(chart: &Chart) -> Result<FullAnalysis> {
    let balance = analyze_elements(chart);
    let stages = calculate_stages(chart)?;
    let markers = calculate_sinsal(chart);
    let relations = find_relations(chart);

    Ok(FullAnalysis {
        chart: *chart,
        balance,
        stages,
        markers,
        relations,
    })
}

pub fn interpret_chart(chart: &Chart) -> Result<InterpretedAnalysis> {
    let analysis = analyze_chart(chart)?;
    let interpreted = interpret_markers(chart, &analysis.markers, &analysis.stages)?;
    let summary = summarize(&interpreted);

    Ok(InterpretedAnalysis {
        analysis,
        interpreted,
        summary,
    })
}

pub fn compute_chart(chart: &Chart, mode: AnalysisMode) -> Result<ChartOutput> {
    Ok(match mode {
        AnalysisMode::Pillars => ChartOutput::Pillars(*chart),
        AnalysisMode::Full => ChartOutput::Full(Box::new(analyze_chart(chart)?)),
        AnalysisMode::Interpreted => ChartOutput::Interpreted(Box::new(interpret_chart(chart)?)),
    })
}

/// 出生資料 → 萬歲曆 → 四柱 → 分析。全程同步、無副作用
pub struct SajuEngine<A: CalendarAdapter> {
    calendar: A,
}

impl<A: CalendarAdapter> SajuEngine<A> {
    pub fn new(calendar: A) -> Self {
        Self { calendar }
    }

    pub fn calendar(&self) -> &A {
        &self.calendar
    }

    pub fn pillars(&self, input: &BirthInput) -> Result<Chart> {
        input.validate()?;
        let raw = self.calendar.four_pillars(input)?;
        resolve_chart(&raw)
    }

    pub fn analyze(&self, input: &BirthInput) -> Result<FullAnalysis> {
        let chart = self.pillars(input)?;
        analyze_chart(&chart)
    }

    pub fn interpret(&self, input: &BirthInput) -> Result<InterpretedAnalysis> {
        let chart = self.pillars(input)?;
        let analysis = interpret_chart(&chart)?;
        tracing::debug!(
            "Interpreted chart {} {} {} {}: {} markers",
            chart.year,
            chart.month,
            chart.day,
            chart.hour,
            analysis.interpreted.len()
        );
        Ok(analysis)
    }

    pub fn compute(&self, input: &BirthInput, mode: AnalysisMode) -> Result<ChartOutput> {
        let chart = self.pillars(input)?;
        compute_chart(&chart, mode)
    }
}
