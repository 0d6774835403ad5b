//! 神煞規則引擎。
//!
//! 28 條規則彼此獨立，每條都是 `Chart → Vec<Marker>` 的純函式。規則的形態以
//! [`Matcher`] 列舉表示，查表資料放在 [`crate::core::rule_tables`]，不寫在判斷式裡。

use crate::core::rule_tables::*;
use crate::domain::model::MarkerCategory::{Auspicious, Inauspicious};
use crate::domain::model::{Chart, Marker, MarkerCategory, PillarPosition, SinsalKind};

/// 規則形態，各自帶著自己的查表
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// 日干 → 單一地支，任一柱地支符合即成立
    DayStemBranch(&'static [u8; 10]),
    /// 日干 → 兩個地支
    DayStemBranchPair(&'static [[u8; 2]; 10]),
    /// 月支 → 天干或地支
    MonthBranchTarget(&'static [VirtueTarget; 12]),
    /// 日支與年支各自查表，兩個結果合為目標集合
    DayOrYearBranch(&'static [u8; 12]),
    /// 只以年支查表
    YearBranch(&'static [u8; 12]),
    /// 只以日支查表，日柱本身也算
    DayBranch(&'static [u8; 12]),
    /// 日柱干支完全符合清單中的組合
    DayPillarPair(&'static [(u8, u8)]),
    /// 三干一組，四柱天干中出現兩個以上即成立；只取第一個成立的組
    StemTriad(&'static [([u8; 3], &'static str)]),
    /// 兩個地支同時出現時，持有這兩支的柱都成立
    BranchNet(&'static [([u8; 2], &'static str)]),
    /// 日支 → 一到兩個地支，只看日柱以外的柱
    DayBranchPartner(&'static [&'static [u8]; 12]),
    /// 空亡: 由日柱推出的兩個地支
    Void,
}

#[derive(Debug, Clone, Copy)]
pub struct SinsalRule {
    pub kind: SinsalKind,
    pub name: &'static str,
    pub hanja: &'static str,
    pub category: MarkerCategory,
    pub description: &'static str,
    pub matcher: Matcher,
}

const fn rule(
    kind: SinsalKind,
    name: &'static str,
    hanja: &'static str,
    category: MarkerCategory,
    description: &'static str,
    matcher: Matcher,
) -> SinsalRule {
    SinsalRule {
        kind,
        name,
        hanja,
        category,
        description,
        matcher,
    }
}

/// 固定的規則順序，只影響輸出排列
pub static SINSAL_RULES: [SinsalRule; 28] = [
    rule(
        SinsalKind::CheoneulGwiin,
        "천을귀인",
        "天乙貴人",
        Auspicious,
        "가장 존귀한 길신. 위기 시 귀인의 도움을 받음",
        Matcher::DayStemBranchPair(&CHEONEUL_GWIIN),
    ),
    rule(
        SinsalKind::MunchangGwiin,
        "문창귀인",
        "文昌貴人",
        Auspicious,
        "학문과 예술에 뛰어난 재능. 시험운이 좋음",
        Matcher::DayStemBranch(&MUNCHANG_GWIIN),
    ),
    rule(
        SinsalKind::HakdangGwiin,
        "학당귀인",
        "學堂貴人",
        Auspicious,
        "학문을 좋아하고 총명함. 학업에서 성과를 얻음",
        Matcher::DayStemBranch(&HAKDANG_GWIIN),
    ),
    rule(
        SinsalKind::CheondeokGwiin,
        "천덕귀인",
        "天德貴人",
        Auspicious,
        "하늘의 덕을 받아 재앙을 면함. 음덕이 있음",
        Matcher::MonthBranchTarget(&CHEONDEOK_GWIIN),
    ),
    rule(
        SinsalKind::WoldeokGwiin,
        "월덕귀인",
        "月德貴人",
        Auspicious,
        "월의 덕을 받아 흉사를 막음. 온화한 성품",
        Matcher::MonthBranchTarget(&WOLDEOK_GWIIN),
    ),
    rule(
        SinsalKind::CheongwanGwiin,
        "천관귀인",
        "天官貴人",
        Auspicious,
        "관직운이 좋음. 직장에서 승진이 빠름",
        Matcher::DayStemBranch(&CHEONGWAN_GWIIN),
    ),
    rule(
        SinsalKind::BokseongGwiin,
        "복성귀인",
        "福星貴人",
        Auspicious,
        "복을 주관하는 길신. 일생 복록이 풍부함",
        Matcher::DayStemBranch(&BOKSEONG_GWIIN),
    ),
    rule(
        SinsalKind::SamgiGwiin,
        "삼기귀인",
        "三奇貴人",
        Auspicious,
        "특별한 재능과 기회가 있음",
        Matcher::StemTriad(&SAMGI_GROUPS),
    ),
    rule(
        SinsalKind::Geumyeorok,
        "금여록",
        "金輿祿",
        Auspicious,
        "배우자궁이 좋고 부부인연이 좋음",
        Matcher::DayStemBranch(&GEUMYEOROK),
    ),
    rule(
        SinsalKind::Geonrok,
        "건록",
        "建祿",
        Auspicious,
        "녹봉이 있어 경제적으로 안정됨. 자수성가의 기운",
        Matcher::DayStemBranch(&GEONROK),
    ),
    rule(
        SinsalKind::Yeokma,
        "역마살",
        "驛馬殺",
        Inauspicious,
        "이동이 많고 변동이 잦음. 해외운이 있을 수 있음",
        Matcher::DayOrYearBranch(&YEOKMA),
    ),
    rule(
        SinsalKind::Dohwa,
        "도화살",
        "桃花殺",
        Inauspicious,
        "매력이 넘치고 이성운이 강함. 예술적 감성",
        Matcher::DayOrYearBranch(&DOHWA),
    ),
    rule(
        SinsalKind::Hwagae,
        "화개살",
        "華蓋殺",
        Inauspicious,
        "종교, 철학, 예술에 재능. 고독할 수 있음",
        Matcher::DayOrYearBranch(&HWAGAE),
    ),
    rule(
        SinsalKind::Baekho,
        "백호살",
        "白虎殺",
        Inauspicious,
        "혈광이나 사고에 주의. 수술수가 있을 수 있음",
        Matcher::DayBranch(&BAEKHO),
    ),
    rule(
        SinsalKind::Goegang,
        "괴강살",
        "魁罡殺",
        Inauspicious,
        "성격이 강하고 결단력이 있음. 리더십이 강함",
        Matcher::DayPillarPair(&GOEGANG),
    ),
    rule(
        SinsalKind::Yangin,
        "양인살",
        "羊刃殺",
        Inauspicious,
        "기운이 지나치게 강함. 성격이 급하고 과단성이 있음",
        Matcher::DayStemBranch(&YANGIN),
    ),
    rule(
        SinsalKind::Geopsal,
        "겁살",
        "劫殺",
        Inauspicious,
        "강도, 도난, 강탈의 위험. 예기치 않은 손해",
        Matcher::DayOrYearBranch(&GEOPSAL),
    ),
    rule(
        SinsalKind::Mangsin,
        "망신살",
        "亡身殺",
        Inauspicious,
        "명예 실추, 망신의 위험. 구설수에 주의",
        Matcher::DayOrYearBranch(&MANGSIN),
    ),
    rule(
        SinsalKind::Jaesal,
        "재살",
        "災殺",
        Inauspicious,
        "재난과 재앙에 주의. 질병이나 사고의 위험",
        Matcher::DayOrYearBranch(&JAESAL),
    ),
    rule(
        SinsalKind::Cheonsal,
        "천살",
        "天殺",
        Inauspicious,
        "하늘에서 내리는 재앙. 자연재해나 불가항력",
        Matcher::YearBranch(&CHEONSAL),
    ),
    rule(
        SinsalKind::Jisal,
        "지살",
        "地殺",
        Inauspicious,
        "땅에서 발생하는 재앙. 이사나 이동에 주의",
        Matcher::YearBranch(&JISAL),
    ),
    rule(
        SinsalKind::Nyeonsal,
        "년살",
        "年殺",
        Inauspicious,
        "해당 년도에 주의가 필요. 질병이나 구설수",
        Matcher::YearBranch(&NYEONSAL),
    ),
    rule(
        SinsalKind::Wolsal,
        "월살",
        "月殺",
        Inauspicious,
        "고독과 이별의 살. 가족과 멀어질 수 있음",
        Matcher::YearBranch(&WOLSAL),
    ),
    rule(
        SinsalKind::Wonjin,
        "원진살",
        "怨嗔殺",
        Inauspicious,
        "원한과 미움의 살. 대인관계에서 갈등이 생길 수 있음",
        Matcher::DayBranchPartner(&WONJIN),
    ),
    rule(
        SinsalKind::Gwimungwan,
        "귀문관살",
        "鬼門關殺",
        Inauspicious,
        "귀신의 문을 여닫는 살. 정신적 불안이나 신비체험",
        Matcher::DayBranchPartner(&GWIMUNGWAN),
    ),
    rule(
        SinsalKind::Gongmang,
        "공망",
        "空亡",
        Inauspicious,
        "비어있는 기운. 해당 기둥의 작용이 약해짐",
        Matcher::Void,
    ),
    rule(
        SinsalKind::CheonraJimang,
        "천라지망",
        "天羅地網",
        Inauspicious,
        "그물에 걸린 형상",
        Matcher::BranchNet(&CHEONRA_JIMANG),
    ),
    rule(
        SinsalKind::Gyeokgak,
        "격각살",
        "隔角殺",
        Inauspicious,
        "가까운 사이에서 틈이 생김. 부부나 동료와 불화",
        Matcher::DayBranchPartner(&GYEOKGAK),
    ),
];

/// 空亡地支: 日柱所屬旬中配不到天干的兩個地支。
/// `((日支 − 日干) mod 12 + 12) mod 12` 為旬首地支，空亡為其 +10、+11
pub fn void_branches(chart: &Chart) -> [u8; 2] {
    let day_stem = i32::from(chart.day.stem.id);
    let day_branch = i32::from(chart.day.branch.id);
    let start = (day_branch - day_stem).rem_euclid(12);
    // rem_euclid(12) 的結果必在 0..12
    [((start + 10) % 12) as u8, ((start + 11) % 12) as u8]
}

fn lookup<T: Copy>(table: &[T], id: u8) -> Option<T> {
    table.get(usize::from(id)).copied()
}

impl SinsalRule {
    fn marker(&self, pillar: PillarPosition, description: String) -> Marker {
        Marker {
            kind: self.kind,
            name: self.name,
            hanja: self.hanja,
            category: self.category,
            pillar,
            description,
        }
    }

    /// 對所有柱套用地支判斷
    fn mark_branches(
        &self,
        chart: &Chart,
        include_day: bool,
        hit: impl Fn(u8) -> bool,
    ) -> Vec<Marker> {
        chart
            .entries()
            .into_iter()
            .filter(|(position, _)| include_day || *position != PillarPosition::Day)
            .filter(|(_, pillar)| hit(pillar.branch.id))
            .map(|(position, _)| self.marker(position, self.description.to_string()))
            .collect()
    }

    pub fn evaluate(&self, chart: &Chart) -> Vec<Marker> {
        let day_stem = chart.day.stem.id;
        let day_branch = chart.day.branch.id;
        let year_branch = chart.year.branch.id;

        match self.matcher {
            Matcher::DayStemBranch(table) => match lookup(table, day_stem) {
                Some(target) => self.mark_branches(chart, true, |b| b == target),
                None => Vec::new(),
            },
            Matcher::DayStemBranchPair(table) => match lookup(table, day_stem) {
                Some(targets) => self.mark_branches(chart, true, |b| targets.contains(&b)),
                None => Vec::new(),
            },
            Matcher::MonthBranchTarget(table) => {
                let Some(target) = lookup(table, chart.month.branch.id) else {
                    return Vec::new();
                };
                chart
                    .entries()
                    .into_iter()
                    .filter(|(_, pillar)| match target {
                        VirtueTarget::Stem(id) => pillar.stem.id == id,
                        VirtueTarget::Branch(id) => pillar.branch.id == id,
                    })
                    .map(|(position, _)| self.marker(position, self.description.to_string()))
                    .collect()
            }
            Matcher::DayOrYearBranch(table) => {
                let targets = [lookup(table, day_branch), lookup(table, year_branch)];
                self.mark_branches(chart, true, |b| targets.contains(&Some(b)))
            }
            Matcher::YearBranch(table) => match lookup(table, year_branch) {
                Some(target) => self.mark_branches(chart, true, |b| b == target),
                None => Vec::new(),
            },
            Matcher::DayBranch(table) => match lookup(table, day_branch) {
                Some(target) => self.mark_branches(chart, true, |b| b == target),
                None => Vec::new(),
            },
            Matcher::DayPillarPair(pairs) => {
                if pairs.contains(&(day_stem, day_branch)) {
                    vec![self.marker(PillarPosition::Day, self.description.to_string())]
                } else {
                    Vec::new()
                }
            }
            Matcher::StemTriad(groups) => {
                let stems = chart.stem_ids();
                let Some((group, label)) = groups
                    .iter()
                    .find(|(group, _)| group.iter().filter(|id| stems.contains(id)).count() >= 2)
                else {
                    return Vec::new();
                };
                let description = format!("{}에 해당. {}", label, self.description);
                chart
                    .entries()
                    .into_iter()
                    .filter(|(_, pillar)| group.contains(&pillar.stem.id))
                    .map(|(position, _)| self.marker(position, description.clone()))
                    .collect()
            }
            Matcher::BranchNet(nets) => {
                let branches = chart.branch_ids();
                let mut markers = Vec::new();
                for (pair, description) in nets.iter() {
                    if pair.iter().all(|b| branches.contains(b)) {
                        markers.extend(
                            chart
                                .entries()
                                .into_iter()
                                .filter(|(_, pillar)| pair.contains(&pillar.branch.id))
                                .map(|(position, _)| {
                                    self.marker(position, description.to_string())
                                }),
                        );
                    }
                }
                markers
            }
            Matcher::DayBranchPartner(table) => match lookup(table, day_branch) {
                Some(targets) => self.mark_branches(chart, false, |b| targets.contains(&b)),
                None => Vec::new(),
            },
            Matcher::Void => {
                let void = void_branches(chart);
                self.mark_branches(chart, true, |b| void.contains(&b))
            }
        }
    }
}

pub fn sinsal_rule(kind: SinsalKind) -> &'static SinsalRule {
    // SINSAL_RULES 與 SinsalKind 的宣告順序一致
    &SINSAL_RULES[kind as usize]
}

/// 依固定順序執行全部規則並串接結果
pub fn calculate_sinsal(chart: &Chart) -> Vec<Marker> {
    let markers: Vec<Marker> = SINSAL_RULES
        .iter()
        .flat_map(|rule| rule.evaluate(chart))
        .collect();
    tracing::debug!("Sinsal engine produced {} markers", markers.len());
    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve_chart;
    use crate::domain::model::{RawFourPillars, RawPillar};
    use std::collections::HashSet;
    use crate::domain::model::PillarPosition::{Day, Hour, Month, Year};

    /// (年, 月, 日, 時) 的 (天干, 地支)
    fn chart(pairs: [(i32, i32); 4]) -> Chart {
        resolve_chart(&RawFourPillars {
            year: RawPillar::new(pairs[0].0, pairs[0].1),
            month: RawPillar::new(pairs[1].0, pairs[1].1),
            day: RawPillar::new(pairs[2].0, pairs[2].1),
            hour: Some(RawPillar::new(pairs[3].0, pairs[3].1)),
        })
        .unwrap()
    }

    fn fired(kind: SinsalKind, c: &Chart) -> Vec<PillarPosition> {
        sinsal_rule(kind).evaluate(c).iter().map(|m| m.pillar).collect()
    }

    #[test]
    fn test_every_kind_has_exactly_one_rule() {
        let kinds: HashSet<_> = SINSAL_RULES.iter().map(|r| r.kind).collect();
        assert_eq!(kinds.len(), SINSAL_RULES.len());
        assert_eq!(SINSAL_RULES.len(), 28);
        for (i, r) in SINSAL_RULES.iter().enumerate() {
            assert_eq!(r.kind as usize, i);
        }
    }

    #[test]
    fn test_cheoneul_gwiin_two_targets() {
        // 甲日: 丑, 未
        let c = chart([(1, 1), (3, 7), (0, 0), (4, 4)]);
        assert_eq!(fired(SinsalKind::CheoneulGwiin, &c), vec![Year, Month]);
        let m = &sinsal_rule(SinsalKind::CheoneulGwiin).evaluate(&c)[0];
        assert_eq!(m.category, MarkerCategory::Auspicious);
        assert_eq!(m.hanja, "天乙貴人");
    }

    #[test]
    fn test_munchang_and_hakdang() {
        // 丙日: 文昌=申, 學堂=寅
        let c = chart([(0, 8), (2, 2), (2, 6), (6, 8)]);
        assert_eq!(fired(SinsalKind::MunchangGwiin, &c), vec![Year, Hour]);
        assert_eq!(fired(SinsalKind::HakdangGwiin, &c), vec![Month]);
    }

    #[test]
    fn test_cheondeok_stem_and_branch_targets() {
        // 寅月 → 丁干
        let c = chart([(3, 1), (0, 2), (3, 9), (0, 0)]);
        assert_eq!(fired(SinsalKind::CheondeokGwiin, &c), vec![Year, Day]);
        // 卯月 → 申支
        let c = chart([(0, 8), (1, 3), (0, 0), (6, 8)]);
        assert_eq!(fired(SinsalKind::CheondeokGwiin, &c), vec![Year, Hour]);
    }

    #[test]
    fn test_woldeok() {
        // 午月 → 丙干
        let c = chart([(2, 2), (4, 6), (2, 6), (0, 0)]);
        assert_eq!(fired(SinsalKind::WoldeokGwiin, &c), vec![Year, Day]);
    }

    #[test]
    fn test_samgi_needs_two_of_three_and_stops_at_first_group() {
        // 甲, 戊 (天上) 與 乙, 丙 (地下) 同時成立時只取天上三奇
        let c = chart([(0, 0), (4, 4), (1, 1), (2, 2)]);
        let markers = sinsal_rule(SinsalKind::SamgiGwiin).evaluate(&c);
        let positions: Vec<_> = markers.iter().map(|m| m.pillar).collect();
        assert_eq!(positions, vec![Year, Month]);
        assert!(markers[0].description.starts_with("천상삼기"));

        // 只有一個成員時不成立
        let c = chart([(0, 0), (1, 1), (8, 8), (5, 5)]);
        assert!(fired(SinsalKind::SamgiGwiin, &c).is_empty());
    }

    #[test]
    fn test_geonrok_and_yangin() {
        // 庚日: 祿=申, 刃=酉
        let c = chart([(6, 8), (7, 9), (6, 0), (0, 8)]);
        assert_eq!(fired(SinsalKind::Geonrok, &c), vec![Year, Hour]);
        assert_eq!(fired(SinsalKind::Yangin, &c), vec![Month]);
    }

    #[test]
    fn test_cheongwan_and_bokseong() {
        // 甲日 天官在未
        let c = chart([(1, 7), (2, 2), (0, 0), (3, 7)]);
        assert_eq!(fired(SinsalKind::CheongwanGwiin, &c), vec![Year, Hour]);
        // 丙日 福星在子
        let c = chart([(0, 0), (2, 2), (2, 2), (4, 0)]);
        assert_eq!(fired(SinsalKind::BokseongGwiin, &c), vec![Year, Hour]);
        let m = &sinsal_rule(SinsalKind::BokseongGwiin).evaluate(&c)[0];
        assert_eq!(m.category, MarkerCategory::Auspicious);
    }

    #[test]
    fn test_geumyeorok() {
        // 甲日 金輿在辰
        let c = chart([(4, 4), (2, 2), (0, 0), (6, 6)]);
        assert_eq!(fired(SinsalKind::Geumyeorok, &c), vec![Year]);
    }

    #[test]
    fn test_hwagae_geopsal_mangsin_jaesal() {
        // 華蓋: 子 → 辰, 午 → 戌
        let c = chart([(2, 6), (4, 4), (0, 0), (8, 10)]);
        assert_eq!(fired(SinsalKind::Hwagae, &c), vec![Month, Hour]);
        // 劫殺: 子 → 巳, 午 → 亥
        let c = chart([(2, 6), (1, 5), (0, 0), (9, 11)]);
        assert_eq!(fired(SinsalKind::Geopsal, &c), vec![Month, Hour]);
        // 亡身: 子 → 亥, 午 → 巳
        let c = chart([(2, 6), (9, 11), (0, 0), (1, 5)]);
        assert_eq!(fired(SinsalKind::Mangsin, &c), vec![Month, Hour]);
        // 災殺: 日支子 → 午, 年支卯 → 酉
        let c = chart([(1, 3), (2, 6), (0, 0), (7, 9)]);
        assert_eq!(fired(SinsalKind::Jaesal, &c), vec![Month, Hour]);
        let m = &sinsal_rule(SinsalKind::Jaesal).evaluate(&c)[0];
        assert_eq!(m.category, MarkerCategory::Inauspicious);
        assert_eq!(m.hanja, "災殺");
    }

    #[test]
    fn test_day_or_year_branch_targets() {
        // 日支子 → 驛馬寅; 年支午 → 驛馬申
        let c = chart([(2, 6), (0, 2), (0, 0), (6, 8)]);
        assert_eq!(fired(SinsalKind::Yeokma, &c), vec![Month, Hour]);
        // 桃花: 子 → 酉, 午 → 卯
        let c = chart([(2, 6), (1, 3), (0, 0), (9, 9)]);
        assert_eq!(fired(SinsalKind::Dohwa, &c), vec![Month, Hour]);
    }

    #[test]
    fn test_year_branch_only() {
        // 年支子 → 天殺未; 日支的查表結果不算
        let c = chart([(0, 0), (5, 7), (6, 6), (7, 1)]);
        assert_eq!(fired(SinsalKind::Cheonsal, &c), vec![Month]);
        // 年支子 → 地殺申, 年殺酉, 月殺戌
        let c = chart([(0, 0), (6, 8), (7, 9), (8, 10)]);
        assert_eq!(fired(SinsalKind::Jisal, &c), vec![Month]);
        assert_eq!(fired(SinsalKind::Nyeonsal, &c), vec![Day]);
        assert_eq!(fired(SinsalKind::Wolsal, &c), vec![Hour]);
    }

    #[test]
    fn test_goegang_only_on_day() {
        let c = chart([(6, 4), (6, 4), (6, 10), (6, 4)]);
        assert_eq!(fired(SinsalKind::Goegang, &c), vec![Day]);
        let c = chart([(6, 4), (6, 4), (0, 0), (8, 10)]);
        assert!(fired(SinsalKind::Goegang, &c).is_empty());
    }

    #[test]
    fn test_partner_rules_skip_day_pillar() {
        // 日支子: 怨嗔未, 鬼門酉, 隔角寅/戌
        let c = chart([(1, 7), (7, 9), (0, 0), (2, 2)]);
        assert_eq!(fired(SinsalKind::Wonjin, &c), vec![Year]);
        assert_eq!(fired(SinsalKind::Gwimungwan, &c), vec![Month]);
        assert_eq!(fired(SinsalKind::Gyeokgak, &c), vec![Hour]);

        // 其他柱都與日支相同時不成立
        let c = chart([(0, 0), (2, 0), (0, 0), (4, 0)]);
        assert!(fired(SinsalKind::Wonjin, &c).is_empty());
        assert!(fired(SinsalKind::Gyeokgak, &c).is_empty());
    }

    #[test]
    fn test_baekho_includes_day() {
        // 日支辰 → 子
        let c = chart([(0, 0), (2, 2), (4, 4), (8, 0)]);
        assert_eq!(fired(SinsalKind::Baekho, &c), vec![Year, Hour]);
    }

    #[test]
    fn test_cheonra_jimang_requires_both_branches() {
        let c = chart([(4, 4), (7, 5), (0, 0), (4, 4)]);
        let markers = sinsal_rule(SinsalKind::CheonraJimang).evaluate(&c);
        let positions: Vec<_> = markers.iter().map(|m| m.pillar).collect();
        assert_eq!(positions, vec![Year, Month, Hour]);
        assert!(markers[0].description.starts_with("천라"));

        // 辰只有一個時不成立
        let c = chart([(4, 4), (0, 0), (0, 0), (0, 0)]);
        assert!(fired(SinsalKind::CheonraJimang, &c).is_empty());

        // 戌亥 → 地網
        let c = chart([(8, 10), (9, 11), (0, 0), (0, 0)]);
        let markers = sinsal_rule(SinsalKind::CheonraJimang).evaluate(&c);
        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.description.starts_with("지망")));
    }

    #[test]
    fn test_void_branches_gapja() {
        // 甲子日: 旬首子, 空亡戌亥
        let c = chart([(0, 10), (1, 11), (0, 0), (2, 2)]);
        assert_eq!(void_branches(&c), [10, 11]);
        assert_eq!(fired(SinsalKind::Gongmang, &c), vec![Year, Month]);
    }

    #[test]
    fn test_void_branches_always_distinct_and_in_range() {
        for stem in 0..10 {
            for branch in 0..12 {
                let c = chart([(0, 0), (0, 0), (stem, branch), (0, 0)]);
                let [a, b] = void_branches(&c);
                assert!(a < 12 && b < 12);
                assert_ne!(a, b);
                assert_eq!((a + 1) % 12, b);
            }
        }
    }

    #[test]
    fn test_void_marker_absent_when_no_branch_matches() {
        // 甲子日 空亡戌亥，四支都不同且不在其中
        let c = chart([(2, 2), (3, 3), (0, 0), (4, 4)]);
        assert!(fired(SinsalKind::Gongmang, &c).is_empty());
    }

    #[test]
    fn test_engine_output_is_union_of_rules() {
        let c = chart([(6, 8), (8, 0), (0, 0), (9, 11)]);
        let all = calculate_sinsal(&c);
        let expected: usize = SINSAL_RULES.iter().map(|r| r.evaluate(&c).len()).sum();
        assert_eq!(all.len(), expected);
        assert_eq!(calculate_sinsal(&c), all);
    }
}
