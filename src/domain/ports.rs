use crate::domain::model::{BirthInput, RawFourPillars};
use crate::utils::error::{Result, SajuError};
use crate::utils::validation::{validate_range, Validate};
use chrono::NaiveDate;

/// 萬歲曆 (外部干支推算) 的注入點。核心不做任何曆法運算
pub trait CalendarAdapter: Send + Sync {
    /// 依陽曆出生資料取得四柱原始干支編號。
    /// 無法決定時柱 (例如未提供時辰) 時，`hour` 為 `None`
    fn four_pillars(&self, input: &BirthInput) -> Result<RawFourPillars>;
}

impl<T: CalendarAdapter + ?Sized> CalendarAdapter for &T {
    fn four_pillars(&self, input: &BirthInput) -> Result<RawFourPillars> {
        (**self).four_pillars(input)
    }
}

impl<T: CalendarAdapter + ?Sized> CalendarAdapter for std::sync::Arc<T> {
    fn four_pillars(&self, input: &BirthInput) -> Result<RawFourPillars> {
        (**self).four_pillars(input)
    }
}

/// 批次結果的輸出目的地
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

impl Validate for BirthInput {
    fn validate(&self) -> Result<()> {
        validate_range("year", self.year, 1900, 2050)?;
        validate_range("month", self.month, 1, 12)?;
        validate_range("day", self.day, 1, 31)?;

        if NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(SajuError::InvalidInputError {
                field: "day".to_string(),
                value: format!("{}-{:02}-{:02}", self.year, self.month, self.day),
                reason: "Not a valid solar calendar date".to_string(),
            });
        }

        if let Some(hour) = self.hour {
            validate_range("hour", hour, 0, 23)?;
        }
        if let Some(minute) = self.minute {
            validate_range("minute", minute, 0, 59)?;
        }
        if let Some(longitude) = self.longitude {
            validate_range("longitude", longitude, -180.0, 180.0)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_birth_input_validation() {
        assert!(BirthInput::new(1990, 5, 15, Some(14)).validate().is_ok());
        assert!(BirthInput::new(2024, 2, 29, None).validate().is_ok());
        assert!(BirthInput::new(2023, 2, 29, Some(3)).validate().is_err());
        assert!(BirthInput::new(1899, 12, 31, Some(3)).validate().is_err());
        assert!(BirthInput::new(1990, 5, 15, Some(24)).validate().is_err());
        assert!(BirthInput::new(1990, 5, 15, Some(1))
            .with_minute(60)
            .validate()
            .is_err());
        assert!(BirthInput::new(1990, 5, 15, Some(1))
            .with_longitude(127.0)
            .validate()
            .is_ok());
    }
}
