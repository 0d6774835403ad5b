use serde::{Deserialize, Serialize};
use std::fmt;

/// 五行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// 五行的固定掃描順序，最強/最弱同分時以先出現者為準
pub const ELEMENT_ORDER: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    pub fn index(self) -> usize {
        match self {
            Element::Wood => 0,
            Element::Fire => 1,
            Element::Earth => 2,
            Element::Metal => 3,
            Element::Water => 4,
        }
    }

    pub fn korean(self) -> &'static str {
        match self {
            Element::Wood => "목",
            Element::Fire => "화",
            Element::Earth => "토",
            Element::Metal => "금",
            Element::Water => "수",
        }
    }

    pub fn hanja(self) -> &'static str {
        match self {
            Element::Wood => "木",
            Element::Fire => "火",
            Element::Earth => "土",
            Element::Metal => "金",
            Element::Water => "水",
        }
    }

    /// 相生: 木→火→土→金→水→木
    pub fn generates(self) -> Element {
        ELEMENT_ORDER[(self.index() + 1) % 5]
    }

    /// 相剋: 木→土→水→火→金→木
    pub fn controls(self) -> Element {
        ELEMENT_ORDER[(self.index() + 2) % 5]
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.korean(), self.hanja())
    }
}

/// 陰陽
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yin,
    Yang,
}

/// 天干
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Stem {
    pub id: u8,
    pub name: &'static str,
    pub hanja: &'static str,
    pub element: Element,
    pub polarity: Polarity,
}

/// 地支
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Branch {
    pub id: u8,
    pub name: &'static str,
    pub hanja: &'static str,
    pub element: Element,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

pub const PILLAR_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub fn korean(self) -> &'static str {
        match self {
            PillarPosition::Year => "년주",
            PillarPosition::Month => "월주",
            PillarPosition::Day => "일주",
            PillarPosition::Hour => "시주",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PillarPosition::Year => "year",
            PillarPosition::Month => "month",
            PillarPosition::Day => "day",
            PillarPosition::Hour => "hour",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    pub fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// 六十甲子中的序號 (甲子 = 0)。陰陽不一致的組合不在週期內，回傳 None
    pub fn sexagenary_index(&self) -> Option<u8> {
        let (s, b) = (self.stem.id, self.branch.id);
        if s % 2 != b % 2 {
            return None;
        }
        (0u8..60).find(|n| n % 10 == s && n % 12 == b)
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}({}{})",
            self.stem.name, self.branch.name, self.stem.hanja, self.branch.hanja
        )
    }
}

/// 四柱。建立後不再變更，日柱天干 (日主) 為所有推算的基準
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Chart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl Chart {
    pub fn pillar(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    pub fn entries(&self) -> [(PillarPosition, &Pillar); 4] {
        PILLAR_POSITIONS.map(|position| (position, self.pillar(position)))
    }

    pub fn day_master(&self) -> &Stem {
        &self.day.stem
    }

    pub fn stem_ids(&self) -> [u8; 4] {
        PILLAR_POSITIONS.map(|position| self.pillar(position).stem.id)
    }

    pub fn branch_ids(&self) -> [u8; 4] {
        PILLAR_POSITIONS.map(|position| self.pillar(position).branch.id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ElementCounts {
    pub wood: u8,
    pub fire: u8,
    pub earth: u8,
    pub metal: u8,
    pub water: u8,
}

impl ElementCounts {
    pub fn get(&self, element: Element) -> u8 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    pub fn increment(&mut self, element: Element) {
        let slot = match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        };
        *slot += 1;
    }

    pub fn total(&self) -> u32 {
        ELEMENT_ORDER.iter().map(|e| u32::from(self.get(*e))).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementBalance {
    pub counts: ElementCounts,
    pub strongest: Element,
    pub weakest: Element,
    pub missing: Vec<Element>,
}

/// 十二運星，順序與運星表的索引一致 (長生 = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TwelveStage {
    Jangsaeng,
    Mokyok,
    Gwandae,
    Geonrok,
    Jewang,
    Soe,
    Byeong,
    Sa,
    Myo,
    Jeol,
    Tae,
    Yang,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageResult {
    pub pillar: PillarPosition,
    pub stage: TwelveStage,
    pub name: &'static str,
    pub hanja: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    Auspicious,
    Inauspicious,
}

impl MarkerCategory {
    pub fn korean(self) -> &'static str {
        match self {
            MarkerCategory::Auspicious => "길신",
            MarkerCategory::Inauspicious => "흉신",
        }
    }
}

/// 神煞種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SinsalKind {
    CheoneulGwiin,
    MunchangGwiin,
    HakdangGwiin,
    CheondeokGwiin,
    WoldeokGwiin,
    CheongwanGwiin,
    BokseongGwiin,
    SamgiGwiin,
    Geumyeorok,
    Geonrok,
    Yeokma,
    Dohwa,
    Hwagae,
    Baekho,
    Goegang,
    Yangin,
    Geopsal,
    Mangsin,
    Jaesal,
    Cheonsal,
    Jisal,
    Nyeonsal,
    Wolsal,
    Wonjin,
    Gwimungwan,
    Gongmang,
    CheonraJimang,
    Gyeokgak,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: SinsalKind,
    pub name: &'static str,
    pub hanja: &'static str,
    pub category: MarkerCategory,
    pub pillar: PillarPosition,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Strong,
    Moderate,
    Weak,
    Negligible,
}

impl Severity {
    pub fn korean(self) -> &'static str {
        match self {
            Severity::Strong => "강",
            Severity::Moderate => "중",
            Severity::Weak => "약",
            Severity::Negligible => "미약",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedMarker {
    pub marker: Marker,
    pub stage: StageResult,
    pub is_void: bool,
    pub effective_power: f64,
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    StemCombination,
    SixHarmony,
    ThreeHarmony,
    HalfHarmony,
    Clash,
    Punishment,
}

/// 四柱之間的干支作用 (合/沖/刑)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub name: String,
    pub positions: Vec<PillarPosition>,
    pub element: Option<Element>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullAnalysis {
    pub chart: Chart,
    pub balance: ElementBalance,
    pub stages: Vec<StageResult>,
    pub markers: Vec<Marker>,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterpretationSummary {
    pub auspicious: usize,
    pub inauspicious: usize,
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
    pub negligible: usize,
    pub void_markers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretedAnalysis {
    #[serde(flatten)]
    pub analysis: FullAnalysis,
    pub interpreted: Vec<InterpretedMarker>,
    pub summary: InterpretationSummary,
}

/// 外部萬歲曆回傳的原始干支編號
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawPillar {
    pub stem_id: i32,
    pub branch_id: i32,
}

impl RawPillar {
    pub fn new(stem_id: i32, branch_id: i32) -> Self {
        Self { stem_id, branch_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFourPillars {
    pub year: RawPillar,
    pub month: RawPillar,
    pub day: RawPillar,
    pub hour: Option<RawPillar>,
}

/// 已換算為陽曆的出生資料
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BirthInput {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub longitude: Option<f64>,
}

impl BirthInput {
    pub fn new(year: i32, month: u32, day: u32, hour: Option<u32>) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute: None,
            longitude: None,
        }
    }

    pub fn with_minute(mut self, minute: u32) -> Self {
        self.minute = Some(minute);
        self
    }

    pub fn with_longitude(mut self, longitude: f64) -> Self {
        self.longitude = Some(longitude);
        self
    }
}
