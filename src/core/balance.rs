use crate::domain::model::{Chart, ElementBalance, ElementCounts, ELEMENT_ORDER};

/// 五行分析: 統計八字 (四天干 + 四地支) 的五行數量並判斷偏旺/偏弱
pub fn analyze_elements(chart: &Chart) -> ElementBalance {
    let mut counts = ElementCounts::default();
    for (_, pillar) in chart.entries() {
        counts.increment(pillar.stem.element);
        counts.increment(pillar.branch.element);
    }

    // 依 ELEMENT_ORDER 單次掃描，同分時保留先出現者
    let mut strongest = ELEMENT_ORDER[0];
    let mut weakest = ELEMENT_ORDER[0];
    for element in ELEMENT_ORDER {
        if counts.get(element) > counts.get(strongest) {
            strongest = element;
        }
        if counts.get(element) < counts.get(weakest) {
            weakest = element;
        }
    }

    let missing = ELEMENT_ORDER
        .into_iter()
        .filter(|e| counts.get(*e) == 0)
        .collect();

    ElementBalance {
        counts,
        strongest,
        weakest,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve_chart;
    use crate::domain::model::{Element, RawFourPillars, RawPillar};

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
    fn test_counts_sum_to_eight() {
        let balance = analyze_elements(&chart([(0, 0), (3, 5), (6, 8), (9, 11)]));
        assert_eq!(balance.counts.total(), 8);
    }

    #[test]
    fn test_all_wood_chart() {
        // 甲寅 乙卯 甲寅 乙卯
        let balance = analyze_elements(&chart([(0, 2), (1, 3), (0, 2), (1, 3)]));
        assert_eq!(balance.counts.wood, 8);
        assert_eq!(balance.strongest, Element::Wood);
        assert_eq!(balance.weakest, Element::Fire);
        assert_eq!(
            balance.missing,
            vec![Element::Fire, Element::Earth, Element::Metal, Element::Water]
        );
    }

    #[test]
    fn test_ties_resolve_to_first_in_order() {
        // 甲子 丙午 庚申 壬子: 木1 火2 土0 金2 水3
        let balance = analyze_elements(&chart([(0, 0), (2, 6), (6, 8), (8, 0)]));
        assert_eq!(balance.counts.fire, 2);
        assert_eq!(balance.counts.metal, 2);
        assert_eq!(balance.strongest, Element::Water);
        assert_eq!(balance.weakest, Element::Earth);

        // 甲子 丙午 戊辰 庚申: 木1 火2 土2 金2 水1
        let balance = analyze_elements(&chart([(0, 0), (2, 6), (4, 4), (6, 8)]));
        assert_eq!(balance.strongest, Element::Fire);
        assert_eq!(balance.weakest, Element::Wood);
        assert!(balance.missing.is_empty());
    }
}
