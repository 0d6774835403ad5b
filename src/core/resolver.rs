use crate::core::tables::{branch_by_id, stem_by_id};
use crate::domain::model::{Chart, Pillar, RawFourPillars, RawPillar};
use crate::utils::error::{Result, SajuError};

pub fn resolve_pillar(raw: RawPillar) -> Result<Pillar> {
    let stem = stem_by_id(raw.stem_id)?;
    let branch = branch_by_id(raw.branch_id)?;
    Ok(Pillar::new(stem, branch))
}

/// 萬歲曆原始編號 → 四柱。任一編號無效或缺時柱時整體失敗，不會產生部分結果
pub fn resolve_chart(raw: &RawFourPillars) -> Result<Chart> {
    let hour_raw = raw.hour.ok_or(SajuError::MissingHourPillar)?;

    let chart = Chart {
        year: resolve_pillar(raw.year)?,
        month: resolve_pillar(raw.month)?,
        day: resolve_pillar(raw.day)?,
        hour: resolve_pillar(hour_raw)?,
    };

    for (position, pillar) in chart.entries() {
        if pillar.sexagenary_index().is_none() {
            tracing::warn!(
                "⚠️ {} pillar {} is outside the sexagenary cycle",
                position.as_str(),
                pillar
            );
        }
    }

    tracing::debug!(
        "Resolved chart: {} {} {} {}",
        chart.year,
        chart.month,
        chart.day,
        chart.hour
    );
    Ok(chart)
}
