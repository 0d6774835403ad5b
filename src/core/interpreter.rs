//! 神煞有效力量解釋: 十二運星分數 × 空亡折扣 → 強度等級與說明文字。

use crate::core::sinsal::void_branches;
use crate::core::stages::stage_power;
use crate::domain::model::{
    Chart, InterpretationSummary, InterpretedMarker, Marker, MarkerCategory, PillarPosition,
    Severity, StageResult,
};
use crate::utils::error::{Result, SajuError};

/// 落在空亡地支時的力量倍率
pub const VOID_MULTIPLIER: f64 = 0.3;

pub const STRONG_THRESHOLD: f64 = 0.7;
pub const MODERATE_THRESHOLD: f64 = 0.4;
pub const WEAK_THRESHOLD: f64 = 0.1;

/// 下界包含在內: 0.7 為 Strong, 0.69999 為 Moderate
pub fn severity_for(power: f64) -> Severity {
    if power >= STRONG_THRESHOLD {
        Severity::Strong
    } else if power >= MODERATE_THRESHOLD {
        Severity::Moderate
    } else if power >= WEAK_THRESHOLD {
        Severity::Weak
    } else {
        Severity::Negligible
    }
}

pub fn effective_power(stage_score: f64, is_void: bool) -> f64 {
    stage_score * if is_void { VOID_MULTIPLIER } else { 1.0 }
}

fn auspicious_text(marker: &Marker, stage: &StageResult, severity: Severity, is_void: bool) -> String {
    let pillar = marker.pillar.korean();
    match severity {
        Severity::Strong => format!(
            "{}이(가) {}에서 {}({}) 위에 있어 강하게 작용합니다. {}",
            marker.name, pillar, stage.name, stage.hanja, marker.description
        ),
        Severity::Moderate => {
            let void_note = if is_void {
                " 공망의 영향으로 다소 약해졌으나"
            } else {
                ""
            };
            format!(
                "{}이(가) {} {}({}) 위에 있어{} 보통 수준으로 작용합니다.",
                marker.name, pillar, stage.name, stage.hanja, void_note
            )
        }
        Severity::Weak => {
            let reason = if is_void {
                format!("{}에 공망까지 겹쳐", stage.name)
            } else {
                format!("{}({})의 약한 기운으로", stage.name, stage.hanja)
            };
            format!(
                "{}이(가) {}에 있으나 {} 힘이 약합니다. 대운에서 보완될 때 작용할 수 있습니다.",
                marker.name, pillar, reason
            )
        }
        Severity::Negligible => {
            let reason = if is_void {
                format!("{}·공망으로 거의 작용하지 못합니다", stage.name)
            } else {
                format!("{}({})으로 거의 작용하지 못합니다", stage.name, stage.hanja)
            };
            format!(
                "{}이(가) {}에 있으나 {}. 대운에서 공망이 풀리는 시기에 활성화될 수 있습니다.",
                marker.name, pillar, reason
            )
        }
    }
}

fn inauspicious_text(
    marker: &Marker,
    stage: &StageResult,
    severity: Severity,
    is_void: bool,
) -> String {
    let pillar = marker.pillar.korean();
    match severity {
        Severity::Strong => format!(
            "{}이(가) {}에서 {}({}) 위에 있어 강하게 작용합니다. {} 주의가 필요합니다.",
            marker.name, pillar, stage.name, stage.hanja, marker.description
        ),
        Severity::Moderate => {
            let void_note = if is_void {
                " 공망의 영향으로 다소 약해졌으나"
            } else {
                ""
            };
            format!(
                "{}이(가) {} {}({}) 위에 있어{} 보통 수준으로 작용합니다. 경계는 필요합니다.",
                marker.name, pillar, stage.name, stage.hanja, void_note
            )
        }
        Severity::Weak => {
            let reason = if is_void {
                format!("{}에 공망까지 겹쳐", stage.name)
            } else {
                format!("{}({})의 약한 기운으로", stage.name, stage.hanja)
            };
            format!(
                "{}이(가) {}에 있으나 {} 흉한 작용이 약합니다. 크게 걱정하지 않아도 됩니다.",
                marker.name, pillar, reason
            )
        }
        Severity::Negligible => {
            let reason = if is_void {
                format!("{}·공망으로 흉한 작용이 거의 없어 다행입니다", stage.name)
            } else {
                format!(
                    "{}({})으로 흉한 작용이 거의 없어 다행입니다",
                    stage.name, stage.hanja
                )
            };
            format!("{}이(가) {}에 있으나 {}.", marker.name, pillar, reason)
        }
    }
}

/// (吉凶, 強度) 共 8 種樣板；空亡只替換樣板內的字句
pub fn interpretation_text(
    marker: &Marker,
    stage: &StageResult,
    severity: Severity,
    is_void: bool,
) -> String {
    match marker.category {
        MarkerCategory::Auspicious => auspicious_text(marker, stage, severity, is_void),
        MarkerCategory::Inauspicious => inauspicious_text(marker, stage, severity, is_void),
    }
}

fn find_stage(stages: &[StageResult], pillar: PillarPosition) -> Result<&StageResult> {
    stages.iter().find(|s| s.pillar == pillar).ok_or_else(|| {
        tracing::error!("❌ No twelve-stage result for {} pillar", pillar.as_str());
        SajuError::invariant(format!(
            "missing twelve-stage result for {} pillar",
            pillar.as_str()
        ))
    })
}

/// 每個神煞產生一筆解釋，順序與輸入相同
pub fn interpret_markers(
    chart: &Chart,
    markers: &[Marker],
    stages: &[StageResult],
) -> Result<Vec<InterpretedMarker>> {
    let void = void_branches(chart);

    markers
        .iter()
        .map(|marker| {
            let stage = find_stage(stages, marker.pillar)?;
            let is_void = void.contains(&chart.pillar(marker.pillar).branch.id);
            let power = effective_power(stage_power(stage.stage), is_void);
            let severity = severity_for(power);

            Ok(InterpretedMarker {
                marker: marker.clone(),
                stage: stage.clone(),
                is_void,
                effective_power: power,
                severity,
                text: interpretation_text(marker, stage, severity, is_void),
            })
        })
        .collect()
}

pub fn summarize(interpreted: &[InterpretedMarker]) -> InterpretationSummary {
    let mut summary = InterpretationSummary::default();
    for item in interpreted {
        match item.marker.category {
            MarkerCategory::Auspicious => summary.auspicious += 1,
            MarkerCategory::Inauspicious => summary.inauspicious += 1,
        }
        match item.severity {
            Severity::Strong => summary.strong += 1,
            Severity::Moderate => summary.moderate += 1,
            Severity::Weak => summary.weak += 1,
            Severity::Negligible => summary.negligible += 1,
        }
        if item.is_void {
            summary.void_markers += 1;
        }
    }
    summary
}

/// 依吉凶分組，組內保持原順序
pub fn group_by_category(
    interpreted: &[InterpretedMarker],
) -> (Vec<&InterpretedMarker>, Vec<&InterpretedMarker>) {
    interpreted
        .iter()
        .partition(|m| m.marker.category == MarkerCategory::Auspicious)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve_chart;
    use crate::core::sinsal::{calculate_sinsal, sinsal_rule};
    use crate::core::stages::{calculate_stages, stage_result};
    use crate::domain::model::{RawFourPillars, RawPillar, SinsalKind, TwelveStage};

    fn chart(pairs: [(i32, i32); 4]) -> Chart {
        resolve_chart(&RawFourPillars {
            year: RawPillar::new(pairs[0].0, pairs[0].1),
            month: RawPillar::new(pairs[1].0, pairs[1].1),
            day: RawPillar::new(pairs[2].0, pairs[2].1),
            hour: Some(RawPillar::new(pairs[3].0, pairs[3].1)),
        })
        .unwrap()
    }

    #[test]
    fn test_severity_boundaries_inclusive() {
        assert_eq!(severity_for(1.0), Severity::Strong);
        assert_eq!(severity_for(0.7), Severity::Strong);
        assert_eq!(severity_for(0.69999), Severity::Moderate);
        assert_eq!(severity_for(0.4), Severity::Moderate);
        assert_eq!(severity_for(0.39999), Severity::Weak);
        assert_eq!(severity_for(0.1), Severity::Weak);
        assert_eq!(severity_for(0.09999), Severity::Negligible);
        assert_eq!(severity_for(0.0), Severity::Negligible);
    }

    #[test]
    fn test_void_never_increases_power() {
        for stage in crate::core::rule_tables::TWELVE_STAGES {
            let score = stage_power(stage);
            assert!(effective_power(score, true) <= effective_power(score, false));
        }
    }

    #[test]
    fn test_peak_stage_without_void_is_strong() {
        // 甲日, 卯 = 帝旺; 甲子日空亡戌亥
        let c = chart([(1, 3), (2, 2), (0, 0), (4, 4)]);
        let stages = calculate_stages(&c).unwrap();
        let markers = sinsal_rule(SinsalKind::Yangin).evaluate(&c);
        assert_eq!(markers.len(), 1);

        let interpreted = interpret_markers(&c, &markers, &stages).unwrap();
        let item = &interpreted[0];
        assert_eq!(item.stage.stage, TwelveStage::Jewang);
        assert!(!item.is_void);
        assert_eq!(item.effective_power, 1.0 * stage_power(TwelveStage::Jewang));
        assert_eq!(item.severity, Severity::Strong);
        assert!(item.text.contains("강하게 작용합니다"));
        assert!(item.text.ends_with("주의가 필요합니다."));
    }

    #[test]
    fn test_void_pillar_marks_every_marker_on_it() {
        // 甲子日 空亡戌亥; 年柱甲戌
        let c = chart([(0, 10), (2, 2), (0, 0), (4, 4)]);
        let markers = calculate_sinsal(&c);
        let stages = calculate_stages(&c).unwrap();
        let interpreted = interpret_markers(&c, &markers, &stages).unwrap();

        assert!(interpreted.iter().any(|m| {
            m.marker.kind == SinsalKind::Gongmang && m.marker.pillar == PillarPosition::Year
        }));
        for item in &interpreted {
            assert_eq!(item.is_void, item.marker.pillar == PillarPosition::Year);
        }
    }

    #[test]
    fn test_void_discount_changes_clause_not_template() {
        // 甲日 年支卯 = 帝旺 (1.0)，空亡時 0.3 → Weak
        let c = chart([(1, 3), (2, 2), (0, 0), (4, 4)]);
        let marker = sinsal_rule(SinsalKind::Yangin).evaluate(&c).remove(0);
        let stage = stage_result(PillarPosition::Year, 4).unwrap();

        let weak_void = interpretation_text(&marker, &stage, Severity::Weak, true);
        let weak_plain = interpretation_text(&marker, &stage, Severity::Weak, false);
        assert!(weak_void.contains("공망까지 겹쳐"));
        assert!(weak_plain.contains("약한 기운으로"));
        assert!(weak_void.ends_with("크게 걱정하지 않아도 됩니다."));
        assert!(weak_plain.ends_with("크게 걱정하지 않아도 됩니다."));
    }

    #[test]
    fn test_missing_stage_is_invariant_violation() {
        let c = chart([(1, 3), (2, 2), (0, 0), (4, 4)]);
        let markers = sinsal_rule(SinsalKind::Yangin).evaluate(&c);
        let stages: Vec<StageResult> = calculate_stages(&c)
            .unwrap()
            .into_iter()
            .filter(|s| s.pillar != PillarPosition::Year)
            .collect();
        assert!(matches!(
            interpret_markers(&c, &markers, &stages),
            Err(SajuError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_summary_and_grouping() {
        let c = chart([(0, 10), (3, 1), (0, 0), (6, 8)]);
        let markers = calculate_sinsal(&c);
        let stages = calculate_stages(&c).unwrap();
        let interpreted = interpret_markers(&c, &markers, &stages).unwrap();
        let summary = summarize(&interpreted);

        assert_eq!(summary.auspicious + summary.inauspicious, interpreted.len());
        assert_eq!(
            summary.strong + summary.moderate + summary.weak + summary.negligible,
            interpreted.len()
        );
        let (good, bad) = group_by_category(&interpreted);
        assert_eq!(good.len(), summary.auspicious);
        assert_eq!(bad.len(), summary.inauspicious);
    }
}
