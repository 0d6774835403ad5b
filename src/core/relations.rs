use crate::core::rule_tables::{
    CLASHES, PUNISHMENTS, SIX_HARMONIES, STEM_COMBINATIONS, THREE_HARMONIES,
};
use crate::core::tables::{branches, stems};
use crate::domain::model::{Chart, Element, PillarPosition, Relation, RelationKind};

fn positions_with(chart: &Chart, hit: impl Fn(u8, u8) -> bool) -> Vec<PillarPosition> {
    chart
        .entries()
        .into_iter()
        .filter(|(_, pillar)| hit(pillar.stem.id, pillar.branch.id))
        .map(|(position, _)| position)
        .collect()
}

fn pair_relations(
    chart: &Chart,
    kind: RelationKind,
    label: &str,
    pairs: impl IntoIterator<Item = (u8, u8, Option<Element>)>,
    on_stem: bool,
) -> Vec<Relation> {
    let ids = if on_stem {
        chart.stem_ids()
    } else {
        chart.branch_ids()
    };
    let mut out = Vec::new();

    for (a, b, element) in pairs {
        if !(ids.contains(&a) && ids.contains(&b)) {
            continue;
        }
        let positions = positions_with(chart, |s, br| {
            let id = if on_stem { s } else { br };
            id == a || id == b
        });
        let (first, second) = if on_stem {
            (stems()[usize::from(a)].name, stems()[usize::from(b)].name)
        } else {
            (branches()[usize::from(a)].name, branches()[usize::from(b)].name)
        };
        out.push(Relation {
            kind,
            name: format!("{}{}{}", first, second, label),
            positions,
            element,
        });
    }
    out
}

/// 四柱之間的天干合、地支六合/三合/半合、沖、刑
pub fn find_relations(chart: &Chart) -> Vec<Relation> {
    let mut relations = Vec::new();

    relations.extend(pair_relations(
        chart,
        RelationKind::StemCombination,
        "합",
        STEM_COMBINATIONS.map(|(a, b, e)| (a, b, Some(e))),
        true,
    ));
    relations.extend(pair_relations(
        chart,
        RelationKind::SixHarmony,
        "합",
        SIX_HARMONIES.map(|(a, b, e)| (a, b, Some(e))),
        false,
    ));

    let chart_branches = chart.branch_ids();
    for (frame, element) in THREE_HARMONIES {
        let present: Vec<u8> = frame
            .iter()
            .copied()
            .filter(|b| chart_branches.contains(b))
            .collect();
        // 半合必須包含中間的旺地
        let kind = match present.len() {
            3 => RelationKind::ThreeHarmony,
            2 if present.contains(&frame[1]) => RelationKind::HalfHarmony,
            _ => continue,
        };
        let names: String = present
            .iter()
            .map(|b| branches()[usize::from(*b)].name)
            .collect();
        let suffix = if kind == RelationKind::ThreeHarmony {
            "삼합"
        } else {
            "반합"
        };
        relations.push(Relation {
            kind,
            name: format!("{}{}{}국", names, suffix, element.korean()),
            positions: positions_with(chart, |_, b| present.contains(&b)),
            element: Some(element),
        });
    }

    relations.extend(pair_relations(
        chart,
        RelationKind::Clash,
        "충",
        CLASHES.map(|(a, b)| (a, b, None)),
        false,
    ));
    relations.extend(pair_relations(
        chart,
        RelationKind::Punishment,
        "형",
        PUNISHMENTS.map(|(a, b)| (a, b, None)),
        false,
    ));

    tracing::debug!("Found {} stem/branch relations", relations.len());
    relations
}
