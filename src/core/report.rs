use crate::core::engine::ChartOutput;
use crate::core::interpreter::group_by_category;
use crate::domain::model::{
    Chart, ElementBalance, FullAnalysis, InterpretedAnalysis, InterpretedMarker, ELEMENT_ORDER,
};
use crate::utils::error::Result;
use serde::Serialize;
use std::fmt::Write as _;

/// CSV 一列 = 一個已解釋的神煞
#[derive(Debug, Serialize)]
struct MarkerRow<'a> {
    label: &'a str,
    chart: String,
    pillar: &'static str,
    name: &'static str,
    hanja: &'static str,
    category: &'static str,
    stage: &'static str,
    is_void: bool,
    effective_power: String,
    severity: &'static str,
    text: &'a str,
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn chart_label(chart: &Chart) -> String {
    format!("{} {} {} {}", chart.year, chart.month, chart.day, chart.hour)
}

pub fn interpreted_csv<'a, I>(rows: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (&'a str, &'a InterpretedAnalysis)>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());

    for (label, analysis) in rows {
        let chart = chart_label(&analysis.analysis.chart);
        for item in &analysis.interpreted {
            writer.serialize(MarkerRow {
                label,
                chart: chart.clone(),
                pillar: item.marker.pillar.as_str(),
                name: item.marker.name,
                hanja: item.marker.hanja,
                category: item.marker.category.korean(),
                stage: item.stage.name,
                is_void: item.is_void,
                effective_power: format!("{:.3}", item.effective_power),
                severity: item.severity.korean(),
                text: &item.text,
            })?;
        }
    }

    writer
        .into_inner()
        .map_err(|e| crate::utils::error::SajuError::IoError(e.into_error()))
}

fn render_chart(out: &mut String, chart: &Chart) {
    let _ = writeln!(out, "📜 사주 원국");
    for (position, pillar) in chart.entries() {
        let _ = writeln!(out, "  {}: {}", position.korean(), pillar);
    }
}

fn render_balance(out: &mut String, balance: &ElementBalance) {
    let counts: Vec<String> = ELEMENT_ORDER
        .iter()
        .map(|e| format!("{} {}", e, balance.counts.get(*e)))
        .collect();
    let _ = writeln!(out, "\n🌿 오행: {}", counts.join(" / "));
    let _ = writeln!(
        out,
        "  가장 강한 오행: {}, 가장 약한 오행: {}",
        balance.strongest, balance.weakest
    );
    // 最弱的五行由誰生、被誰剋
    let source = ELEMENT_ORDER.into_iter().find(|e| e.generates() == balance.weakest);
    let controller = ELEMENT_ORDER.into_iter().find(|e| e.controls() == balance.weakest);
    if let (Some(source), Some(controller)) = (source, controller) {
        let _ = writeln!(
            out,
            "  {}: {}이(가) 생하고 {}이(가) 극함",
            balance.weakest, source, controller
        );
    }
    if !balance.missing.is_empty() {
        let missing: Vec<String> = balance.missing.iter().map(|e| e.to_string()).collect();
        let _ = writeln!(out, "  없는 오행: {}", missing.join(", "));
    }
}

fn render_full(out: &mut String, analysis: &FullAnalysis) {
    render_chart(out, &analysis.chart);
    render_balance(out, &analysis.balance);

    let _ = writeln!(out, "\n🔄 십이운성");
    for stage in &analysis.stages {
        let _ = writeln!(
            out,
            "  {}: {}({}) {}",
            stage.pillar.korean(),
            stage.name,
            stage.hanja,
            stage.description
        );
    }

    if !analysis.relations.is_empty() {
        let names: Vec<&str> = analysis.relations.iter().map(|r| r.name.as_str()).collect();
        let _ = writeln!(out, "\n🔗 합충형: {}", names.join(", "));
    }
}

fn render_group(out: &mut String, title: &str, items: &[&InterpretedMarker]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", title);
    for item in items {
        let void = if item.is_void { " [공망]" } else { "" };
        let _ = writeln!(
            out,
            "  {}({}) @ {} | {} {:.2}{}",
            item.marker.name,
            item.marker.hanja,
            item.marker.pillar.korean(),
            item.severity.korean(),
            item.effective_power,
            void
        );
        let _ = writeln!(out, "    {}", item.text);
    }
}

/// 終端機用的文字報告
pub fn render_text(output: &ChartOutput) -> String {
    let mut out = String::new();

    match output {
        ChartOutput::Pillars(chart) => render_chart(&mut out, chart),
        ChartOutput::Full(analysis) => {
            render_full(&mut out, analysis);
            let _ = writeln!(out, "\n✨ 신살");
            for marker in &analysis.markers {
                let _ = writeln!(
                    out,
                    "  {}({}) @ {}: {}",
                    marker.name,
                    marker.hanja,
                    marker.pillar.korean(),
                    marker.description
                );
            }
        }
        ChartOutput::Interpreted(analysis) => {
            render_full(&mut out, &analysis.analysis);
            let (auspicious, inauspicious) = group_by_category(&analysis.interpreted);
            render_group(&mut out, "✨ 길신", &auspicious);
            render_group(&mut out, "⚠️ 흉신", &inauspicious);

            let s = &analysis.summary;
            let _ = writeln!(
                out,
                "\n📊 길신 {} / 흉신 {} (강 {}, 중 {}, 약 {}, 미약 {}, 공망 {})",
                s.auspicious, s.inauspicious, s.strong, s.moderate, s.weak, s.negligible, s.void_markers
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::{compute_chart, interpret_chart, AnalysisMode};
    use crate::core::resolver::resolve_chart;
    use crate::domain::model::{RawFourPillars, RawPillar};

    fn chart() -> Chart {
        resolve_chart(&RawFourPillars {
            year: RawPillar::new(6, 6),
            month: RawPillar::new(8, 8),
            day: RawPillar::new(0, 0),
            hour: Some(RawPillar::new(2, 2)),
        })
        .unwrap()
    }

    #[test]
    fn test_csv_has_one_row_per_interpreted_marker() {
        let analysis = interpret_chart(&chart()).unwrap();
        let bytes = interpreted_csv([("sample", &analysis)]).unwrap();

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "label");
        assert_eq!(&headers[2], "pillar");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), analysis.interpreted.len());
        assert!(rows.iter().all(|r| &r[0] == "sample"));
    }

    #[test]
    fn test_text_report_lists_every_position() {
        let output = compute_chart(&chart(), AnalysisMode::Interpreted).unwrap();
        let text = render_text(&output);
        for label in ["년주", "월주", "일주", "시주"] {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains("📊"));
    }

    #[test]
    fn test_balance_names_what_feeds_and_restrains_the_weakest() {
        // 庚午 壬申 甲子 丙寅: 土 0 個
        let output = compute_chart(&chart(), AnalysisMode::Full).unwrap();
        let text = render_text(&output);
        assert!(text.contains("가장 약한 오행: 토(土)"));
        assert!(text.contains("토(土): 화(火)이(가) 생하고 목(木)이(가) 극함"));
    }

    #[test]
    fn test_pillars_only_report() {
        let output = compute_chart(&chart(), AnalysisMode::Pillars).unwrap();
        let text = render_text(&output);
        assert!(text.contains("갑자"));
        assert!(!text.contains("십이운성"));
    }

    #[test]
    fn test_json_flattens_analysis() {
        let analysis = interpret_chart(&chart()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&to_json(&analysis).unwrap()).unwrap();
        assert!(value.get("chart").is_some());
        assert!(value.get("balance").is_some());
        assert!(value["interpreted"].is_array());
        assert!(value["summary"]["auspicious"].is_number());
    }
}
