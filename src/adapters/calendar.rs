use crate::domain::model::{BirthInput, RawFourPillars};
use crate::domain::ports::CalendarAdapter;
use crate::utils::error::{Result, SajuError};
use std::collections::HashMap;

/// 查表用的鍵: 年、月、日、時、分、經度。經度會影響時柱，以位元表示參與比對
pub type BirthKey = (i32, u32, u32, Option<u32>, Option<u32>, Option<u64>);

pub fn birth_key(input: &BirthInput) -> BirthKey {
    (
        input.year,
        input.month,
        input.day,
        input.hour,
        input.minute,
        input.longitude.map(f64::to_bits),
    )
}

/// 由外部萬歲曆預先匯出的干支表
#[derive(Debug, Clone, Default)]
pub struct StaticCalendar {
    entries: HashMap<BirthKey, RawFourPillars>,
}

impl StaticCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 回傳被取代的舊資料 (同一出生資料重複登錄時)
    pub fn insert(&mut self, input: &BirthInput, pillars: RawFourPillars) -> Option<RawFourPillars> {
        self.entries.insert(birth_key(input), pillars)
    }

    pub fn with_entry(mut self, input: &BirthInput, pillars: RawFourPillars) -> Self {
        self.insert(input, pillars);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CalendarAdapter for StaticCalendar {
    fn four_pillars(&self, input: &BirthInput) -> Result<RawFourPillars> {
        let mut pillars = self
            .entries
            .get(&birth_key(input))
            .copied()
            .ok_or_else(|| SajuError::CalendarError {
                message: format!(
                    "no pillars recorded for {}-{:02}-{:02} {:?}:{:?}",
                    input.year, input.month, input.day, input.hour, input.minute
                ),
            })?;

        // 未提供時辰就無法決定時柱
        if input.hour.is_none() {
            pillars.hour = None;
        }
        Ok(pillars)
    }
}

/// 不論輸入為何都回傳同一組四柱。用於直接指定干支的情境
#[derive(Debug, Clone, Copy)]
pub struct FixedCalendar {
    pillars: RawFourPillars,
}

impl FixedCalendar {
    pub fn new(pillars: RawFourPillars) -> Self {
        Self { pillars }
    }
}

impl CalendarAdapter for FixedCalendar {
    fn four_pillars(&self, _input: &BirthInput) -> Result<RawFourPillars> {
        Ok(self.pillars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RawPillar;

    fn pillars() -> RawFourPillars {
        RawFourPillars {
            year: RawPillar::new(6, 6),
            month: RawPillar::new(8, 8),
            day: RawPillar::new(0, 0),
            hour: Some(RawPillar::new(2, 2)),
        }
    }

    #[test]
    fn test_static_calendar_lookup() {
        let input = BirthInput::new(1990, 6, 15, Some(4));
        let calendar = StaticCalendar::new().with_entry(&input, pillars());

        assert_eq!(calendar.len(), 1);
        assert_eq!(calendar.four_pillars(&input).unwrap(), pillars());

        let other = BirthInput::new(1990, 6, 16, Some(4));
        assert!(matches!(
            calendar.four_pillars(&other),
            Err(SajuError::CalendarError { .. })
        ));
    }

    #[test]
    fn test_static_calendar_drops_hour_without_time() {
        let input = BirthInput::new(1990, 6, 15, None);
        let calendar = StaticCalendar::new().with_entry(&input, pillars());
        assert_eq!(calendar.four_pillars(&input).unwrap().hour, None);
    }

    #[test]
    fn test_longitude_is_part_of_the_key() {
        let plain = BirthInput::new(1990, 6, 15, Some(4));
        let seoul = plain.with_longitude(127.0);
        let mut shifted = pillars();
        shifted.hour = Some(RawPillar::new(1, 1));

        let mut calendar = StaticCalendar::new();
        assert!(calendar.insert(&plain, pillars()).is_none());
        assert!(calendar.insert(&seoul, shifted).is_none());

        assert_eq!(calendar.len(), 2);
        assert_eq!(calendar.four_pillars(&plain).unwrap(), pillars());
        assert_eq!(calendar.four_pillars(&seoul).unwrap(), shifted);
        assert_eq!(calendar.insert(&plain, shifted), Some(pillars()));
    }

    #[test]
    fn test_fixed_calendar_ignores_input() {
        let calendar = FixedCalendar::new(pillars());
        let a = calendar.four_pillars(&BirthInput::new(1950, 1, 1, None)).unwrap();
        let b = calendar.four_pillars(&BirthInput::new(2020, 12, 31, Some(23))).unwrap();
        assert_eq!(a, b);
    }
}
