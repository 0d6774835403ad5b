use crate::core::rule_tables::{
    TWELVE_STAGES, TWELVE_STAGE_DESCRIPTIONS, TWELVE_STAGE_HANJA,
    TWELVE_STAGE_NAMES, TWELVE_STAGE_TABLE,
};
use crate::domain::model::{Chart, PillarPosition, StageResult, TwelveStage};
use crate::utils::error::{Result, SajuError};

/// 運星索引 → 名稱/漢字/說明
pub fn stage_result(pillar: PillarPosition, index: u8) -> Result<StageResult> {
    let i = usize::from(index);
    let stage = *TWELVE_STAGES.get(i).ok_or_else(|| {
        tracing::error!("❌ Twelve-stage index {} out of range", index);
        SajuError::invariant(format!("twelve-stage index {} is outside 0..12", index))
    })?;

    Ok(StageResult {
        pillar,
        stage,
        name: TWELVE_STAGE_NAMES[i],
        hanja: TWELVE_STAGE_HANJA[i],
        description: TWELVE_STAGE_DESCRIPTIONS[i],
    })
}

/// 十二運星: 以日干為基準，求四柱各地支的運星
pub fn calculate_stages(chart: &Chart) -> Result<Vec<StageResult>> {
    let day_stem = usize::from(chart.day_master().id);
    let row = TWELVE_STAGE_TABLE.get(day_stem).ok_or_else(|| {
        SajuError::invariant(format!("no twelve-stage row for stem {}", day_stem))
    })?;

    chart
        .entries()
        .into_iter()
        .map(|(position, pillar)| {
            let index = row
                .get(usize::from(pillar.branch.id))
                .copied()
                .ok_or_else(|| {
                    SajuError::invariant(format!(
                        "no twelve-stage column for branch {}",
                        pillar.branch.id
                    ))
                })?;
            stage_result(position, index)
        })
        .collect()
}

/// 運星的基礎力量分數 (0.0 ~ 1.0)，依傳統旺衰排序: 帝旺最高、絶最低
pub fn stage_power(stage: TwelveStage) -> f64 {
    match stage {
        TwelveStage::Jewang => 1.0,
        TwelveStage::Geonrok => 0.9,
        TwelveStage::Gwandae => 0.8,
        TwelveStage::Jangsaeng => 0.75,
        TwelveStage::Mokyok => 0.6,
        TwelveStage::Yang => 0.5,
        TwelveStage::Tae => 0.4,
        TwelveStage::Soe => 0.3,
        TwelveStage::Byeong => 0.2,
        TwelveStage::Sa => 0.1,
        TwelveStage::Myo => 0.05,
        TwelveStage::Jeol => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve_chart;
    use crate::domain::model::{RawFourPillars, RawPillar, PILLAR_POSITIONS};

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
    fn test_one_result_per_position() {
        let stages = calculate_stages(&chart([(0, 0), (2, 2), (4, 4), (6, 6)])).unwrap();
        let positions: Vec<_> = stages.iter().map(|s| s.pillar).collect();
        assert_eq!(positions, PILLAR_POSITIONS.to_vec());
    }

    #[test]
    fn test_gap_day_master() {
        // 甲日: 亥=長生, 寅=建祿, 卯=帝旺, 申=絶
        let stages = calculate_stages(&chart([(1, 11), (2, 2), (0, 3), (6, 8)])).unwrap();
        assert_eq!(stages[0].stage, TwelveStage::Jangsaeng);
        assert_eq!(stages[1].stage, TwelveStage::Geonrok);
        assert_eq!(stages[2].stage, TwelveStage::Jewang);
        assert_eq!(stages[2].name, "제왕");
        assert_eq!(stages[3].stage, TwelveStage::Jeol);
        assert_eq!(stages[3].hanja, "絶");
    }

    #[test]
    fn test_yin_stem_runs_backwards() {
        // 乙日: 午=長生, 巳=沐浴, 卯=建祿, 寅=帝旺
        let stages = calculate_stages(&chart([(0, 6), (0, 5), (1, 3), (0, 2)])).unwrap();
        assert_eq!(stages[0].stage, TwelveStage::Jangsaeng);
        assert_eq!(stages[1].stage, TwelveStage::Mokyok);
        assert_eq!(stages[2].stage, TwelveStage::Geonrok);
        assert_eq!(stages[3].stage, TwelveStage::Jewang);
    }

    #[test]
    fn test_day_pillar_always_scored() {
        for stem in 0..10 {
            for branch in 0..12 {
                let c = chart([(0, 0), (0, 0), (stem, branch), (0, 0)]);
                let stages = calculate_stages(&c).unwrap();
                assert_eq!(stages[2].pillar, PillarPosition::Day);
            }
        }
    }

    #[test]
    fn test_invalid_index_is_invariant_violation() {
        assert!(matches!(
            stage_result(PillarPosition::Year, 12),
            Err(SajuError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_stage_power_extremes() {
        assert_eq!(stage_power(TwelveStage::Jewang), 1.0);
        assert_eq!(stage_power(TwelveStage::Jeol), 0.0);
        assert_eq!(stage_power(TwelveStage::Jangsaeng), 0.75);
    }

    #[test]
    fn test_stage_power_ranking_is_strict() {
        let ranked = [
            TwelveStage::Jewang,
            TwelveStage::Geonrok,
            TwelveStage::Gwandae,
            TwelveStage::Jangsaeng,
            TwelveStage::Mokyok,
            TwelveStage::Yang,
            TwelveStage::Tae,
            TwelveStage::Soe,
            TwelveStage::Byeong,
            TwelveStage::Sa,
            TwelveStage::Myo,
            TwelveStage::Jeol,
        ];
        for pair in ranked.windows(2) {
            assert!(stage_power(pair[0]) > stage_power(pair[1]), "{:?}", pair);
        }
        for stage in TWELVE_STAGES {
            assert!(ranked.contains(&stage));
            assert!((0.0..=1.0).contains(&stage_power(stage)));
        }
    }
}
