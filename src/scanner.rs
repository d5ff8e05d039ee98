//! Date expression scanning and rewriting.
//!
//! Finds era-based (令和五年三月末日), Gregorian (2023年3月31日),
//! abbreviated (R5.3.2) and delimiter-separated (2023/3/31) date
//! expressions in running text and rewrites them to ISO `YYYY-MM-DD`.
//! A candidate that does not resolve to a real calendar date is left
//! untouched; the typed resolution errors never escape this layer.

use regex::{Captures, Regex};

use norm_types::RewriteStats;

use crate::date::{self, CalendarDate, DateError, DayOfMonth, EraDate, EraYear};
use crate::era::{self, Era};
use crate::numeral;

/// Characters of a kanji/ASCII numeral inside a date field.
const NUM_CHARS: &str = "[元0-9〇一二三四五六七八九十百]";
/// Year characters for Gregorian notation (adds 千 for years like 千九百).
const YEAR_CHARS: &str = "[0-9〇一二三四五六七八九十百千]";

pub struct DateScanner {
    re_era: Regex,
    re_gregorian: Regex,
    re_abbreviated: Regex,
    re_delimited: Regex,
}

impl DateScanner {
    pub fn new() -> Self {
        let era_re = era::build_era_regex();
        let abbr_class = era::build_abbreviation_class();

        // 令和五年三月末日 / 平成31年4月30日
        let re_era = Regex::new(&format!(
            "({era_re})({NUM_CHARS}+)年({NUM_CHARS}+)月(末日|{NUM_CHARS}+日)"
        ))
        .expect("era date regex");

        // 2023年3月31日 / 二〇二三年三月末日 — year of 2-4 characters
        let re_gregorian = Regex::new(&format!(
            "({YEAR_CHARS}{{2,4}})年({NUM_CHARS}+)月(末日|{NUM_CHARS}+日)"
        ))
        .expect("gregorian date regex");

        // R5.3.2 / H31.4.30, with 年/月 accepted as separators too
        let re_abbreviated = Regex::new(&format!(
            r"({abbr_class})([元0-9]+)[年./](\d{{1,2}})[月./](末日|\d{{1,2}})日?"
        ))
        .expect("abbreviated date regex");

        // 2023.3.31 / 2023/3/31
        let re_delimited =
            Regex::new(r"(\d{4})[./](\d{1,2})[./](\d{1,2})").expect("delimited date regex");

        DateScanner {
            re_era,
            re_gregorian,
            re_abbreviated,
            re_delimited,
        }
    }

    /// Rewrite every date expression in `text` to ISO form, folding
    /// full-width digits first. Returns the text and rewrite counts.
    pub fn normalize_with_stats(&self, text: &str) -> (String, RewriteStats) {
        let mut stats = RewriteStats::default();
        let text = fold_fullwidth_digits(text);
        let text = rewrite(&self.re_era, &text, &mut stats.era_dates, rewrite_era);
        let text = rewrite(
            &self.re_gregorian,
            &text,
            &mut stats.gregorian_dates,
            rewrite_gregorian,
        );
        let text = rewrite(
            &self.re_abbreviated,
            &text,
            &mut stats.abbreviated_dates,
            rewrite_abbreviated,
        );
        let text = rewrite(
            &self.re_delimited,
            &text,
            &mut stats.delimited_dates,
            rewrite_delimited,
        );
        (text, stats)
    }

    /// Rewrite every date expression in `text` to ISO form.
    pub fn normalize(&self, text: &str) -> String {
        self.normalize_with_stats(text).0
    }

    /// Parse a standalone date expression: era, Gregorian, abbreviated or
    /// delimiter form. The whole string must be a single date expression.
    pub fn parse_date(&self, expr: &str) -> Result<CalendarDate, DateError> {
        let expr = fold_fullwidth_digits(expr.trim());

        if let Some(caps) = full_captures(&self.re_era, &expr) {
            return date::resolve(&era_date_from(&caps)?);
        }
        if let Some(caps) = full_captures(&self.re_abbreviated, &expr) {
            return date::resolve(&abbreviated_date_from(&caps)?);
        }
        if let Some(caps) = full_captures(&self.re_gregorian, &expr) {
            let year =
                numeral::parse(&caps[1]).map_err(|e| DateError::InvalidDate(e.to_string()))?;
            let month = parse_month_field(&caps[2])
                .ok_or_else(|| DateError::InvalidDate(format!("unreadable month: {}", &caps[2])))?;
            let day = parse_day_field(&caps[3])
                .ok_or_else(|| DateError::InvalidDate(format!("unreadable day: {}", &caps[3])))?;
            return gregorian_from(year, month, day);
        }
        if let Some(caps) = full_captures(&self.re_delimited, &expr) {
            let year: u64 = caps[1].parse().expect("digits");
            let month: u8 = caps[2].parse().expect("digits");
            let day: u8 = caps[3].parse().expect("digits");
            return gregorian_from(year, month, DayOfMonth::Day(day));
        }
        Err(DateError::InvalidDate(format!(
            "unrecognized date expression: {expr}"
        )))
    }
}

impl Default for DateScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold full-width digits ０-９ to their ASCII forms.
fn fold_fullwidth_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (u32::from(c) - u32::from('０')) as u8),
            _ => c,
        })
        .collect()
}

/// Apply one pattern over the text, replacing each resolvable match with
/// its ISO form and leaving unresolvable matches as they were.
fn rewrite<F>(re: &Regex, text: &str, count: &mut usize, f: F) -> String
where
    F: Fn(&Captures) -> Option<String>,
{
    re.replace_all(text, |caps: &Captures| match f(caps) {
        Some(iso) => {
            *count += 1;
            iso
        }
        None => caps[0].to_string(),
    })
    .into_owned()
}

fn full_captures<'t>(re: &Regex, text: &'t str) -> Option<Captures<'t>> {
    let caps = re.captures(text)?;
    (caps.get(0).map(|m| m.as_str()) == Some(text)).then_some(caps)
}

// ── Field parsing ────────────────────────────────────────────────────────

/// "元" → first year; otherwise a kanji or ASCII number.
fn parse_year_field(s: &str) -> Option<EraYear> {
    if s == "元" {
        return Some(EraYear::First);
    }
    u16::try_from(numeral::parse(s).ok()?)
        .ok()
        .map(EraYear::Year)
}

fn parse_month_field(s: &str) -> Option<u8> {
    u8::try_from(numeral::parse(s).ok()?).ok()
}

/// "末日", or "{number}日" with the 日 optional (abbreviated forms).
fn parse_day_field(s: &str) -> Option<DayOfMonth> {
    if s == "末日" {
        return Some(DayOfMonth::LastDay);
    }
    let s = s.strip_suffix('日').unwrap_or(s);
    u8::try_from(numeral::parse(s).ok()?)
        .ok()
        .map(DayOfMonth::Day)
}

fn era_date_from(caps: &Captures) -> Result<EraDate, DateError> {
    Ok(EraDate {
        era: caps[1].to_string(),
        year: parse_year_field(&caps[2])
            .ok_or_else(|| DateError::InvalidDate(format!("unreadable year: {}", &caps[2])))?,
        month: Some(
            parse_month_field(&caps[3])
                .ok_or_else(|| DateError::InvalidDate(format!("unreadable month: {}", &caps[3])))?,
        ),
        day: Some(
            parse_day_field(&caps[4])
                .ok_or_else(|| DateError::InvalidDate(format!("unreadable day: {}", &caps[4])))?,
        ),
    })
}

fn abbreviated_date_from(caps: &Captures) -> Result<EraDate, DateError> {
    let letter = caps[1].chars().next().unwrap_or_default();
    let era = Era::from_abbreviation(letter)
        .ok_or_else(|| DateError::UnknownEra(caps[1].to_string()))?;
    Ok(EraDate {
        era: era.as_japanese().to_string(),
        year: parse_year_field(&caps[2])
            .ok_or_else(|| DateError::InvalidDate(format!("unreadable year: {}", &caps[2])))?,
        month: Some(
            parse_month_field(&caps[3])
                .ok_or_else(|| DateError::InvalidDate(format!("unreadable month: {}", &caps[3])))?,
        ),
        day: Some(
            parse_day_field(&caps[4])
                .ok_or_else(|| DateError::InvalidDate(format!("unreadable day: {}", &caps[4])))?,
        ),
    })
}

fn gregorian_from(year: u64, month: u8, day: DayOfMonth) -> Result<CalendarDate, DateError> {
    let year = u16::try_from(year)
        .map_err(|_| DateError::InvalidDate(format!("year {year} out of range")))?;
    let day = match day {
        DayOfMonth::Day(d) => d,
        DayOfMonth::LastDay => date::days_in_month(year, month)
            .ok_or_else(|| DateError::InvalidDate(format!("month {month} out of range")))?,
    };
    CalendarDate::new(year, month, day)
}

// ── Per-pattern rewrite callbacks ────────────────────────────────────────

fn rewrite_era(caps: &Captures) -> Option<String> {
    let parsed = era_date_from(caps).ok()?;
    date::resolve(&parsed).ok().map(|d| d.to_string())
}

fn rewrite_gregorian(caps: &Captures) -> Option<String> {
    let year = numeral::parse(&caps[1]).ok()?;
    let month = parse_month_field(&caps[2])?;
    let day = parse_day_field(&caps[3])?;
    gregorian_from(year, month, day).ok().map(|d| d.to_string())
}

fn rewrite_abbreviated(caps: &Captures) -> Option<String> {
    let parsed = abbreviated_date_from(caps).ok()?;
    date::resolve(&parsed).ok().map(|d| d.to_string())
}

fn rewrite_delimited(caps: &Captures) -> Option<String> {
    let year: u64 = caps[1].parse().ok()?;
    let month: u8 = caps[2].parse().ok()?;
    let day: u8 = caps[3].parse().ok()?;
    gregorian_from(year, month, DayOfMonth::Day(day))
        .ok()
        .map(|d| d.to_string())
}
