//! Gregorian calendar dates and era-date resolution.
//!
//! An era-relative date as written in text (era name, year counted from
//! 元年, month, day or 末日) resolves to a validated [`CalendarDate`].
//! Resolution is a pure lookup-and-arithmetic step over the static era
//! table; it never guesses — anything that does not form a real calendar
//! date within the named era is an error.

use std::fmt;

use thiserror::Error;

use crate::era::{Era, ERAS};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    /// Era name not present in the era table.
    #[error("unknown era name: {0}")]
    UnknownEra(String),
    /// The fields do not form a valid calendar date.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

// ── Calendar dates ───────────────────────────────────────────────────────

/// A validated Gregorian calendar date.
///
/// Construction goes through [`CalendarDate::new`], so a value of this
/// type is always a real date. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if year == 0 {
            return Err(DateError::InvalidDate("year 0 does not exist".to_string()));
        }
        let last = days_in_month(year, month)
            .ok_or_else(|| DateError::InvalidDate(format!("month {month} out of range")))?;
        if day == 0 || day > last {
            return Err(DateError::InvalidDate(format!(
                "day {day} out of range for {year}-{month:02}"
            )));
        }
        Ok(CalendarDate { year, month, day })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Standard Gregorian leap-year rule: divisible by 4, except centuries
/// not divisible by 400.
pub fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in the given month, or None for a month outside 1–12.
pub fn days_in_month(year: u16, month: u8) -> Option<u8> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 => Some(if is_leap_year(year) { 29 } else { 28 }),
        _ => None,
    }
}

// ── Era-relative dates ───────────────────────────────────────────────────

/// Year field of an era date: 元年 or an explicit number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraYear {
    /// 元年 — the first year of the era.
    First,
    Year(u16),
}

/// Day field of an era date: an explicit day, or 末日 (last day of month).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOfMonth {
    Day(u8),
    /// 末日
    LastDay,
}

/// An era-relative date as it appears in text, before resolution.
/// The era is referenced by name; resolution looks it up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraDate {
    pub era: String,
    pub year: EraYear,
    pub month: Option<u8>,
    pub day: Option<DayOfMonth>,
}

/// Resolve an era-relative date to a Gregorian calendar date.
///
/// The Gregorian year is the era's start year plus the era year minus one.
/// Years are proleptic past the next era's start (昭和65年 resolves to
/// 1990), but a date before the era's own start is rejected.
pub fn resolve(date: &EraDate) -> Result<CalendarDate, DateError> {
    let era = Era::from_name(&date.era).ok_or_else(|| DateError::UnknownEra(date.era.clone()))?;

    let era_year = match date.year {
        EraYear::First => 1,
        EraYear::Year(0) => {
            return Err(DateError::InvalidDate(format!(
                "{}0年 does not exist",
                date.era
            )));
        }
        EraYear::Year(n) => n,
    };
    let month = date
        .month
        .ok_or_else(|| DateError::InvalidDate("month missing".to_string()))?;
    let day = date
        .day
        .ok_or_else(|| DateError::InvalidDate("day missing".to_string()))?;

    let year = u32::from(era.start_year()) + u32::from(era_year) - 1;
    let year = u16::try_from(year)
        .map_err(|_| DateError::InvalidDate(format!("era year {era_year} out of range")))?;

    let day = match day {
        DayOfMonth::Day(d) => d,
        DayOfMonth::LastDay => days_in_month(year, month)
            .ok_or_else(|| DateError::InvalidDate(format!("month {month} out of range")))?,
    };

    let resolved = CalendarDate::new(year, month, day)?;
    if resolved < era_start(era) {
        return Err(DateError::InvalidDate(format!(
            "{resolved} predates the start of {}",
            date.era
        )));
    }
    Ok(resolved)
}

/// The era containing a Gregorian date, with the year count inside it.
/// None for dates before the first era in the table.
pub fn era_of(date: &CalendarDate) -> Option<(Era, u16)> {
    ERAS.iter()
        .rev()
        .find(|era| *date >= era_start(**era))
        .map(|era| (*era, date.year() - era.start_year() + 1))
}

fn era_start(era: Era) -> CalendarDate {
    let (year, month, day) = era.start();
    CalendarDate { year, month, day }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn era_date(era: &str, year: EraYear, month: u8, day: DayOfMonth) -> EraDate {
        EraDate {
            era: era.to_string(),
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    fn date(year: u16, month: u8, day: u8) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    // ── CalendarDate ─────────────────────────────────────────────────

    #[test]
    fn test_calendar_date_display_zero_pads() {
        assert_eq!(date(2023, 3, 1).to_string(), "2023-03-01");
        assert_eq!(date(794, 11, 22).to_string(), "0794-11-22");
    }

    #[test]
    fn test_calendar_date_rejects_bad_fields() {
        assert!(CalendarDate::new(2023, 13, 1).is_err());
        assert!(CalendarDate::new(2023, 0, 1).is_err());
        assert!(CalendarDate::new(2023, 4, 31).is_err());
        assert!(CalendarDate::new(2023, 1, 0).is_err());
        assert!(CalendarDate::new(0, 1, 1).is_err());
    }

    #[test]
    fn test_calendar_date_ordering() {
        assert!(date(2019, 4, 30) < date(2019, 5, 1));
        assert!(date(2019, 12, 31) < date(2020, 1, 1));
    }

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2023, 3), Some(31));
        assert_eq!(days_in_month(2023, 4), Some(30));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2023, 13), None);
    }

    // ── resolve ──────────────────────────────────────────────────────

    #[test]
    fn test_resolve_last_day_of_march() {
        let d = resolve(&era_date("令和", EraYear::Year(5), 3, DayOfMonth::LastDay)).unwrap();
        assert_eq!(d, date(2023, 3, 31));
    }

    #[test]
    fn test_resolve_era_first_year_boundary() {
        // Reiwa starts 2019-05-01
        let d = resolve(&era_date("令和", EraYear::Year(1), 5, DayOfMonth::Day(1))).unwrap();
        assert_eq!(d, date(2019, 5, 1));
        let d = resolve(&era_date("令和", EraYear::First, 5, DayOfMonth::Day(1))).unwrap();
        assert_eq!(d, date(2019, 5, 1));
    }

    #[test]
    fn test_resolve_year_arithmetic_per_era() {
        // Gregorian year = era start year + era year - 1, for every era
        for (name, year, expected) in [
            ("明治", 33, 1900),
            ("大正", 10, 1921),
            ("昭和", 39, 1964),
            ("平成", 31, 2019),
            ("令和", 5, 2023),
        ] {
            let d = resolve(&era_date(name, EraYear::Year(year), 6, DayOfMonth::Day(15))).unwrap();
            assert_eq!(d.year(), expected, "{name}{year}年");
        }
    }

    #[test]
    fn test_resolve_year_zero_fails() {
        let err = resolve(&era_date("明治", EraYear::Year(0), 1, DayOfMonth::Day(1))).unwrap_err();
        assert!(matches!(err, DateError::InvalidDate(_)));
    }

    #[test]
    fn test_resolve_unknown_era() {
        let err = resolve(&era_date("天保", EraYear::Year(3), 1, DayOfMonth::Day(1))).unwrap_err();
        assert_eq!(err, DateError::UnknownEra("天保".to_string()));
    }

    #[test]
    fn test_resolve_rejects_date_before_era_start() {
        // 2019-04-30 is the day before Reiwa began
        let err = resolve(&era_date("令和", EraYear::Year(1), 4, DayOfMonth::Day(30))).unwrap_err();
        assert!(matches!(err, DateError::InvalidDate(_)));
    }

    #[test]
    fn test_resolve_allows_years_past_next_era() {
        // 昭和65年 never happened on paper but appears in real documents
        let d = resolve(&era_date("昭和", EraYear::Year(65), 1, DayOfMonth::Day(7))).unwrap();
        assert_eq!(d, date(1990, 1, 7));
    }

    #[test]
    fn test_resolve_leap_aware_last_day() {
        let d = resolve(&era_date("令和", EraYear::Year(6), 2, DayOfMonth::LastDay)).unwrap();
        assert_eq!(d, date(2024, 2, 29));
        let d = resolve(&era_date("令和", EraYear::Year(5), 2, DayOfMonth::LastDay)).unwrap();
        assert_eq!(d, date(2023, 2, 28));
        // 明治33年 = 1900, a century non-leap year
        let d = resolve(&era_date("明治", EraYear::Year(33), 2, DayOfMonth::LastDay)).unwrap();
        assert_eq!(d, date(1900, 2, 28));
    }

    #[test]
    fn test_resolve_invalid_day_for_month() {
        let err = resolve(&era_date("令和", EraYear::Year(5), 4, DayOfMonth::Day(31))).unwrap_err();
        assert!(matches!(err, DateError::InvalidDate(_)));
        let err = resolve(&era_date("令和", EraYear::Year(5), 2, DayOfMonth::Day(29))).unwrap_err();
        assert!(matches!(err, DateError::InvalidDate(_)));
    }

    #[test]
    fn test_resolve_missing_fields_fail() {
        let missing_month = EraDate {
            era: "令和".to_string(),
            year: EraYear::Year(5),
            month: None,
            day: Some(DayOfMonth::Day(1)),
        };
        assert!(resolve(&missing_month).is_err());

        let missing_day = EraDate {
            era: "令和".to_string(),
            year: EraYear::Year(5),
            month: Some(3),
            day: None,
        };
        assert!(resolve(&missing_day).is_err());
    }

    // ── era_of ───────────────────────────────────────────────────────

    #[test]
    fn test_era_of_boundaries() {
        assert_eq!(era_of(&date(2019, 4, 30)), Some((Era::Heisei, 31)));
        assert_eq!(era_of(&date(2019, 5, 1)), Some((Era::Reiwa, 1)));
        assert_eq!(era_of(&date(1926, 12, 25)), Some((Era::Showa, 1)));
        assert_eq!(era_of(&date(1868, 1, 1)), None);
    }

    #[test]
    fn test_round_trip_through_era_form() {
        // resolve → era_of → resolve reproduces the same date
        let original = resolve(&era_date("令和", EraYear::Year(5), 3, DayOfMonth::LastDay)).unwrap();
        let (era, year) = era_of(&original).unwrap();
        let again = resolve(&era_date(
            era.as_japanese(),
            EraYear::Year(year),
            original.month(),
            DayOfMonth::Day(original.day()),
        ))
        .unwrap();
        assert_eq!(original, again);
    }
}
