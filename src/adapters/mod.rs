// 外部系統的具體實作: 萬歲曆資料來源與輸出儲存
pub mod calendar;
pub mod storage;

pub use calendar::{FixedCalendar, StaticCalendar};
pub use storage::LocalStorage;
