//! 日期时间工具模块
//!
//! 基于 chrono 提供时区归一化和按天迭代工具。

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 将 naive 时间按本地时区解释并转换为 UTC
///
/// 本地时区出现歧义（夏令时回拨）时取较早的一个解释，
/// 不存在的本地时间（夏令时跳变）按 UTC 直接解释。
pub fn ensure_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        chrono::LocalResult::None => Utc.from_utc_datetime(&naive),
    }
}

/// 将任意时区的时间转换为 UTC
pub fn to_utc<Tz: TimeZone>(value: DateTime<Tz>) -> DateTime<Utc> {
    value.with_timezone(&Utc)
}

/// 按天迭代日期区间
///
/// 区间为半开区间 `[from, until)`，`until <= from` 时为空。
///
/// # 示例
///
/// ```
/// use chrono::NaiveDate;
/// use utilx::datetime::date_range;
///
/// let from = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
/// let until = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let days: Vec<NaiveDate> = date_range(from, until).collect();
/// assert_eq!(days.len(), 3); // 27, 28, 29（闰年）
/// ```
pub fn date_range(from: NaiveDate, until: NaiveDate) -> DateRange {
    DateRange {
        current: from,
        until,
    }
}

/// `date_range` 返回的按天迭代器
pub struct DateRange {
    current: NaiveDate,
    until: NaiveDate,
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.until {
            return None;
        }
        let current = self.current;
        self.current = current.succ_opt()?;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_utc_keeps_instant() {
        let naive = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();

        let utc = ensure_utc(naive);

        // 转换后表示的是同一时刻：换回本地时区应该等于原 naive 值
        let local = utc.with_timezone(&Local);
        assert_eq!(local.naive_local(), naive);
    }

    #[test]
    fn test_to_utc() {
        let local = Local.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        let utc = to_utc(local);
        assert_eq!(utc.timestamp(), local.timestamp());
    }

    #[test]
    fn test_date_range_leap_february() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let until = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let days: Vec<NaiveDate> = date_range(from, until).collect();

        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            ]
        );
    }

    #[test]
    fn test_date_range_empty() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_range(day, day).count(), 0);

        let earlier = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(date_range(day, earlier).count(), 0);
    }

    #[test]
    fn test_date_range_single_day() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let until = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let days: Vec<NaiveDate> = date_range(from, until).collect();
        assert_eq!(days, vec![from]);
    }
}
