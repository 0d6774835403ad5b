//! 天干/地支對照表。表格為唯讀常數，只透過會檢查編號的存取函式對外提供。

use crate::domain::model::{Branch, Element, Pillar, Polarity, Stem};
use crate::utils::error::{Result, SajuError, SymbolKind};

pub const STEM_COUNT: usize = 10;
pub const BRANCH_COUNT: usize = 12;

const fn stem(
    id: u8,
    name: &'static str,
    hanja: &'static str,
    element: Element,
    polarity: Polarity,
) -> Stem {
    Stem {
        id,
        name,
        hanja,
        element,
        polarity,
    }
}

const fn branch(
    id: u8,
    name: &'static str,
    hanja: &'static str,
    element: Element,
    polarity: Polarity,
) -> Branch {
    Branch {
        id,
        name,
        hanja,
        element,
        polarity,
    }
}

static STEMS: [Stem; STEM_COUNT] = [
    stem(0, "갑", "甲", Element::Wood, Polarity::Yang),
    stem(1, "을", "乙", Element::Wood, Polarity::Yin),
    stem(2, "병", "丙", Element::Fire, Polarity::Yang),
    stem(3, "정", "丁", Element::Fire, Polarity::Yin),
    stem(4, "무", "戊", Element::Earth, Polarity::Yang),
    stem(5, "기", "己", Element::Earth, Polarity::Yin),
    stem(6, "경", "庚", Element::Metal, Polarity::Yang),
    stem(7, "신", "辛", Element::Metal, Polarity::Yin),
    stem(8, "임", "壬", Element::Water, Polarity::Yang),
    stem(9, "계", "癸", Element::Water, Polarity::Yin),
];

// 地支本氣五行: 寅卯=木, 巳午=火, 申酉=金, 亥子=水, 辰戌丑未=土
static BRANCHES: [Branch; BRANCH_COUNT] = [
    branch(0, "자", "子", Element::Water, Polarity::Yang),
    branch(1, "축", "丑", Element::Earth, Polarity::Yin),
    branch(2, "인", "寅", Element::Wood, Polarity::Yang),
    branch(3, "묘", "卯", Element::Wood, Polarity::Yin),
    branch(4, "진", "辰", Element::Earth, Polarity::Yang),
    branch(5, "사", "巳", Element::Fire, Polarity::Yin),
    branch(6, "오", "午", Element::Fire, Polarity::Yang),
    branch(7, "미", "未", Element::Earth, Polarity::Yin),
    branch(8, "신", "申", Element::Metal, Polarity::Yang),
    branch(9, "유", "酉", Element::Metal, Polarity::Yin),
    branch(10, "술", "戌", Element::Earth, Polarity::Yang),
    branch(11, "해", "亥", Element::Water, Polarity::Yin),
];

pub fn stems() -> &'static [Stem; STEM_COUNT] {
    &STEMS
}

pub fn branches() -> &'static [Branch; BRANCH_COUNT] {
    &BRANCHES
}

pub fn stem_by_id(id: i32) -> Result<Stem> {
    usize::try_from(id)
        .ok()
        .and_then(|i| STEMS.get(i))
        .copied()
        .ok_or(SajuError::InvalidSymbolId {
            kind: SymbolKind::Stem,
            id: i64::from(id),
        })
}

pub fn branch_by_id(id: i32) -> Result<Branch> {
    usize::try_from(id)
        .ok()
        .and_then(|i| BRANCHES.get(i))
        .copied()
        .ok_or(SajuError::InvalidSymbolId {
            kind: SymbolKind::Branch,
            id: i64::from(id),
        })
}

/// 以韓文名稱或漢字查詢天干
pub fn stem_by_name(name: &str) -> Result<Stem> {
    STEMS
        .iter()
        .find(|s| s.name == name || s.hanja == name)
        .copied()
        .ok_or_else(|| SajuError::UnknownSymbolName {
            kind: SymbolKind::Stem,
            name: name.to_string(),
        })
}

/// 以韓文名稱或漢字查詢地支
pub fn branch_by_name(name: &str) -> Result<Branch> {
    BRANCHES
        .iter()
        .find(|b| b.name == name || b.hanja == name)
        .copied()
        .ok_or_else(|| SajuError::UnknownSymbolName {
            kind: SymbolKind::Branch,
            name: name.to_string(),
        })
}

/// 解析兩個字的干支，例如 "갑자" 或 "甲子"
pub fn pillar_by_name(text: &str) -> Result<Pillar> {
    let mut chars = text.trim().chars();
    let (Some(s), Some(b), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(SajuError::InvalidInputError {
            field: "pillar".to_string(),
            value: text.to_string(),
            reason: "A pillar is exactly one stem and one branch character".to_string(),
        });
    };

    let stem = stem_by_name(s.encode_utf8(&mut [0; 4]))?;
    let branch = branch_by_name(b.encode_utf8(&mut [0; 4]))?;
    Ok(Pillar::new(stem, branch))
}
