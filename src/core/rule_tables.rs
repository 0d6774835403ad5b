//! 十二運星表、神煞查表與干支作用表。
//!
//! 地支編號: 子0 丑1 寅2 卯3 辰4 巳5 午6 未7 申8 酉9 戌10 亥11
//! 天干編號: 甲0 乙1 丙2 丁3 戊4 己5 庚6 辛7 壬8 癸9

use crate::domain::model::{Element, TwelveStage};

// ---------------------------------------------------------------------------
// 十二運星
// ---------------------------------------------------------------------------

/// 列 = 日干, 欄 = 地支, 值 = 運星索引 (長生 = 0)。
/// 陽干順行、陰干逆行，長生位: 甲亥 乙午 丙戊寅 丁己酉 庚巳 辛子 壬申 癸卯
pub const TWELVE_STAGE_TABLE: [[u8; 12]; 10] = [
    [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0],
    [6, 5, 4, 3, 2, 1, 0, 11, 10, 9, 8, 7],
    [10, 11, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 11, 10],
    [10, 11, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0, 11, 10],
    [7, 8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 6],
    [0, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
    [4, 5, 6, 7, 8, 9, 10, 11, 0, 1, 2, 3],
    [3, 2, 1, 0, 11, 10, 9, 8, 7, 6, 5, 4],
];

pub const TWELVE_STAGES: [TwelveStage; 12] = [
    TwelveStage::Jangsaeng,
    TwelveStage::Mokyok,
    TwelveStage::Gwandae,
    TwelveStage::Geonrok,
    TwelveStage::Jewang,
    TwelveStage::Soe,
    TwelveStage::Byeong,
    TwelveStage::Sa,
    TwelveStage::Myo,
    TwelveStage::Jeol,
    TwelveStage::Tae,
    TwelveStage::Yang,
];

pub const TWELVE_STAGE_NAMES: [&str; 12] = [
    "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절", "태", "양",
];

pub const TWELVE_STAGE_HANJA: [&str; 12] = [
    "長生", "沐浴", "冠帶", "建祿", "帝旺", "衰", "病", "死", "墓", "絶", "胎", "養",
];

pub const TWELVE_STAGE_DESCRIPTIONS: [&str; 12] = [
    "새로 태어나는 기운. 성장과 시작의 힘이 있음",
    "씻기고 단장하는 시기. 감수성이 풍부하나 불안정함",
    "의관을 갖추는 시기. 자존심과 추진력이 생김",
    "녹을 받아 독립하는 시기. 안정되고 실속이 있음",
    "기운이 정점에 이른 시기. 강한 주도력과 자신감",
    "정점에서 내려오는 시기. 노련하고 신중함",
    "기운이 약해지는 시기. 섬세하고 배려심이 있음",
    "활동이 멈추는 시기. 정신적 깊이와 탐구심",
    "기운을 저장하는 시기. 절약과 축적의 힘",
    "기운이 끊어지는 시기. 변화가 많고 새 출발의 계기",
    "새 기운이 잉태되는 시기. 가능성과 희망",
    "기운을 기르는 시기. 보살핌을 받고 차분히 성장함",
];

// ---------------------------------------------------------------------------
// 神煞: 日干基準
// ---------------------------------------------------------------------------

/// 天乙貴人: 甲戊庚牛羊, 乙己鼠猴, 丙丁猪鷄, 辛馬虎, 壬癸兎蛇
pub const CHEONEUL_GWIIN: [[u8; 2]; 10] = [
    [1, 7],
    [0, 8],
    [11, 9],
    [11, 9],
    [1, 7],
    [0, 8],
    [1, 7],
    [2, 6],
    [3, 5],
    [3, 5],
];

/// 文昌貴人
pub const MUNCHANG_GWIIN: [u8; 10] = [5, 6, 8, 9, 8, 9, 11, 0, 2, 3];

/// 學堂貴人 (日干五行的長生位)
pub const HAKDANG_GWIIN: [u8; 10] = [11, 6, 2, 9, 2, 9, 5, 0, 8, 3];

/// 天官貴人
pub const CHEONGWAN_GWIIN: [u8; 10] = [7, 4, 5, 2, 3, 9, 11, 8, 10, 6];

/// 福星貴人
pub const BOKSEONG_GWIIN: [u8; 10] = [2, 1, 0, 9, 8, 7, 6, 5, 4, 3];

/// 金輿祿
pub const GEUMYEOROK: [u8; 10] = [4, 5, 7, 8, 7, 8, 10, 11, 1, 2];

/// 建祿 (祿位)
pub const GEONROK: [u8; 10] = [2, 3, 5, 6, 5, 6, 8, 9, 11, 0];

/// 羊刃 (祿位的下一位)
pub const YANGIN: [u8; 10] = [3, 4, 6, 7, 6, 7, 9, 10, 0, 1];

// ---------------------------------------------------------------------------
// 神煞: 月支基準
// ---------------------------------------------------------------------------

/// 天德貴人的目標可能是天干，也可能是地支
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VirtueTarget {
    Stem(u8),
    Branch(u8),
}

/// 天德貴人: 寅丁 卯申 辰壬 巳辛 午亥 未甲 申癸 酉寅 戌丙 亥乙 子巳 丑庚
pub const CHEONDEOK_GWIIN: [VirtueTarget; 12] = [
    VirtueTarget::Branch(5),
    VirtueTarget::Stem(6),
    VirtueTarget::Stem(3),
    VirtueTarget::Branch(8),
    VirtueTarget::Stem(8),
    VirtueTarget::Stem(7),
    VirtueTarget::Branch(11),
    VirtueTarget::Stem(0),
    VirtueTarget::Stem(9),
    VirtueTarget::Branch(2),
    VirtueTarget::Stem(2),
    VirtueTarget::Stem(1),
];

/// 月德貴人: 寅午戌丙, 申子辰壬, 亥卯未甲, 巳酉丑庚
pub const WOLDEOK_GWIIN: [VirtueTarget; 12] = [
    VirtueTarget::Stem(8),
    VirtueTarget::Stem(6),
    VirtueTarget::Stem(2),
    VirtueTarget::Stem(0),
    VirtueTarget::Stem(8),
    VirtueTarget::Stem(6),
    VirtueTarget::Stem(2),
    VirtueTarget::Stem(0),
    VirtueTarget::Stem(8),
    VirtueTarget::Stem(6),
    VirtueTarget::Stem(2),
    VirtueTarget::Stem(0),
];

// ---------------------------------------------------------------------------
// 十二神煞 (三合局基準): 申子辰, 巳酉丑, 寅午戌, 亥卯未 依序循環
// ---------------------------------------------------------------------------

pub const YEOKMA: [u8; 12] = [2, 11, 8, 5, 2, 11, 8, 5, 2, 11, 8, 5];
pub const DOHWA: [u8; 12] = [9, 6, 3, 0, 9, 6, 3, 0, 9, 6, 3, 0];
pub const HWAGAE: [u8; 12] = [4, 1, 10, 7, 4, 1, 10, 7, 4, 1, 10, 7];
pub const GEOPSAL: [u8; 12] = [5, 2, 11, 8, 5, 2, 11, 8, 5, 2, 11, 8];
pub const JAESAL: [u8; 12] = [6, 3, 0, 9, 6, 3, 0, 9, 6, 3, 0, 9];
pub const CHEONSAL: [u8; 12] = [7, 4, 1, 10, 7, 4, 1, 10, 7, 4, 1, 10];
pub const JISAL: [u8; 12] = [8, 5, 2, 11, 8, 5, 2, 11, 8, 5, 2, 11];
pub const NYEONSAL: [u8; 12] = [9, 6, 3, 0, 9, 6, 3, 0, 9, 6, 3, 0];
pub const WOLSAL: [u8; 12] = [10, 7, 4, 1, 10, 7, 4, 1, 10, 7, 4, 1];
pub const MANGSIN: [u8; 12] = [11, 8, 5, 2, 11, 8, 5, 2, 11, 8, 5, 2];

/// 白虎: 歲君十二神中自本支起算第九位
pub const BAEKHO: [u8; 12] = [8, 9, 10, 11, 0, 1, 2, 3, 4, 5, 6, 7];

// ---------------------------------------------------------------------------
// 神煞: 其他形態
// ---------------------------------------------------------------------------

/// 魁罡日: 庚辰 庚戌 壬辰 壬戌 戊戌
pub const GOEGANG: [(u8, u8); 5] = [(6, 4), (6, 10), (8, 4), (8, 10), (4, 10)];

/// 三奇: 天上(甲戊庚), 地下(乙丙丁), 人中(壬癸辛)
pub const SAMGI_GROUPS: [([u8; 3], &str); 3] = [
    ([0, 4, 6], "천상삼기"),
    ([1, 2, 3], "지하삼기"),
    ([8, 9, 7], "인중삼기"),
];

/// 天羅地網: 辰巳 = 天羅, 戌亥 = 地網
pub const CHEONRA_JIMANG: [([u8; 2], &str); 2] = [
    (
        [4, 5],
        "천라(天羅). 하늘의 그물에 걸림. 관재수나 구속에 주의",
    ),
    (
        [10, 11],
        "지망(地網). 땅의 그물에 걸림. 질병이나 재난에 주의",
    ),
];

/// 怨嗔: 子未 丑午 寅酉 卯申 辰亥 巳戌
pub const WONJIN: [&[u8]; 12] = [
    &[7],
    &[6],
    &[9],
    &[8],
    &[11],
    &[10],
    &[1],
    &[0],
    &[3],
    &[2],
    &[5],
    &[4],
];

/// 鬼門關: 子酉 丑午 寅未 卯申 辰亥 巳戌
pub const GWIMUNGWAN: [&[u8]; 12] = [
    &[9],
    &[6],
    &[7],
    &[8],
    &[11],
    &[10],
    &[1],
    &[2],
    &[3],
    &[0],
    &[5],
    &[4],
];

/// 隔角: 日支前後隔一位
pub const GYEOKGAK: [&[u8]; 12] = [
    &[2, 10],
    &[3, 11],
    &[4, 0],
    &[5, 1],
    &[6, 2],
    &[7, 3],
    &[8, 4],
    &[9, 5],
    &[10, 6],
    &[11, 7],
    &[0, 8],
    &[1, 9],
];

// ---------------------------------------------------------------------------
// 干支作用
// ---------------------------------------------------------------------------

/// 天干合: 甲己土 乙庚金 丙辛水 丁壬木 戊癸火
pub const STEM_COMBINATIONS: [(u8, u8, Element); 5] = [
    (0, 5, Element::Earth),
    (1, 6, Element::Metal),
    (2, 7, Element::Water),
    (3, 8, Element::Wood),
    (4, 9, Element::Fire),
];

/// 地支六合: 子丑土 寅亥木 卯戌火 辰酉金 巳申水 午未土
pub const SIX_HARMONIES: [(u8, u8, Element); 6] = [
    (0, 1, Element::Earth),
    (2, 11, Element::Wood),
    (3, 10, Element::Fire),
    (4, 9, Element::Metal),
    (5, 8, Element::Water),
    (6, 7, Element::Earth),
];

/// 地支三合 (生地, 旺地, 墓地): 申子辰水 亥卯未木 寅午戌火 巳酉丑金
pub const THREE_HARMONIES: [([u8; 3], Element); 4] = [
    ([8, 0, 4], Element::Water),
    ([11, 3, 7], Element::Wood),
    ([2, 6, 10], Element::Fire),
    ([5, 9, 1], Element::Metal),
];

/// 地支沖
pub const CLASHES: [(u8, u8); 6] = [(0, 6), (1, 7), (2, 8), (3, 9), (4, 10), (5, 11)];

/// 地支刑: 寅巳 巳申 丑戌 戌未 子卯
pub const PUNISHMENTS: [(u8, u8); 5] = [(2, 5), (5, 8), (1, 10), (10, 7), (0, 3)];
