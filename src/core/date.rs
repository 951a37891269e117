use crate::core::error::CalendarError;
use chrono::{Datelike, Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Calendar identity ─────────────────────────────────────────────────────────

/// Calendar systems the engine can drive. `Jalali` is the secondary,
/// locale-specific calendar (solar Hijri).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarId {
    Gregorian,
    #[default]
    #[serde(alias = "secondary")]
    Jalali,
}

impl CalendarId {
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarId::Gregorian => "gregorian",
            CalendarId::Jalali => "jalali",
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarId {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gregorian" => Ok(CalendarId::Gregorian),
            "jalali" | "secondary" => Ok(CalendarId::Jalali),
            other => Err(CalendarError::UnknownCalendar(other.to_string())),
        }
    }
}

// ── Locale ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Locale {
    En,
    #[default]
    Fa,
}

impl Locale {
    /// Any tag in the `fa` family selects Persian labels; everything else
    /// falls back to English.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "fa" || tag.starts_with("fa-") || tag.starts_with("fa_") {
            Locale::Fa
        } else {
            Locale::En
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }
}

impl From<String> for Locale {
    fn from(tag: String) -> Self {
        Locale::from_tag(&tag)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.tag().to_string()
    }
}

// ── DateParts ─────────────────────────────────────────────────────────────────

/// A (year, month, day) triple. Only meaningful relative to the calendar
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateParts {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_iso(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl fmt::Display for DateParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

// ── Gregorian arithmetic ──────────────────────────────────────────────────────

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub fn is_valid_gregorian(parts: DateParts) -> bool {
    (1..=12).contains(&parts.month)
        && parts.day >= 1
        && parts.day <= days_in_month(parts.year, parts.month)
}

// ── NeutralDate ───────────────────────────────────────────────────────────────

/// Calendar-independent pivot: a proleptic Gregorian day with no time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeutralDate(NaiveDate);

impl NeutralDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Builds the pivot from Gregorian fields. The month must be in range;
    /// the day rolls over month boundaries (day 0 is the last day of the
    /// previous month, day 32 of a 31-day month is the 1st of the next).
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::MonthOutOfRange(month));
        }
        let out_of_range = || CalendarError::DateOutOfRange { year, month, day };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
        let date = if day >= 1 {
            first.checked_add_days(Days::new(u64::from(day - 1)))
        } else {
            first.checked_sub_days(Days::new(1))
        };
        date.map(Self).ok_or_else(out_of_range)
    }

    pub fn from_parts(parts: DateParts) -> Result<Self, CalendarError> {
        Self::from_gregorian(parts.year, parts.month, parts.day)
    }

    pub fn parse_iso(text: &str) -> Result<Self, CalendarError> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| CalendarError::InvalidIso(text.to_string()))
    }

    pub fn gregorian_parts(self) -> DateParts {
        DateParts {
            year: self.0.year(),
            month: self.0.month(),
            day: self.0.day(),
        }
    }

    /// 0 = Sunday .. 6 = Saturday.
    pub fn weekday(self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn to_iso(self) -> String {
        self.gregorian_parts().to_iso()
    }
}

impl From<NaiveDate> for NeutralDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

pub trait Clock {
    fn today(&self) -> NeutralDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NeutralDate {
        NeutralDate(Local::now().date_naive())
    }
}

/// Clock pinned to a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NeutralDate);

impl FixedClock {
    pub fn gregorian(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        NeutralDate::from_gregorian(year, month, day).map(Self)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NeutralDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_february_has_29_days() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
    }

    #[test]
    fn neutral_date_rolls_day_overflow_into_next_month() {
        let rolled = NeutralDate::from_gregorian(2024, 2, 31).expect("in range");
        assert_eq!(rolled.gregorian_parts(), DateParts::new(2024, 3, 2));

        let before = NeutralDate::from_gregorian(2024, 3, 0).expect("in range");
        assert_eq!(before.gregorian_parts(), DateParts::new(2024, 2, 29));
    }

    #[test]
    fn neutral_date_rejects_month_out_of_range() {
        let err = NeutralDate::from_gregorian(2024, 13, 1).unwrap_err();
        assert_eq!(err, CalendarError::MonthOutOfRange(13));
    }

    #[test]
    fn weekday_counts_from_sunday() {
        let date = NeutralDate::from_gregorian(2024, 9, 1).expect("date");
        assert_eq!(date.weekday(), 0);
        let date = NeutralDate::from_gregorian(2024, 3, 1).expect("date");
        assert_eq!(date.weekday(), 5);
    }

    #[test]
    fn calendar_id_parses_known_names_only() {
        assert_eq!("gregorian".parse::<CalendarId>(), Ok(CalendarId::Gregorian));
        assert_eq!("secondary".parse::<CalendarId>(), Ok(CalendarId::Jalali));
        assert_eq!(
            "hebrew".parse::<CalendarId>(),
            Err(CalendarError::UnknownCalendar("hebrew".to_string()))
        );
    }

    #[test]
    fn locale_tags_resolve_to_bundled_sets() {
        assert_eq!(Locale::from_tag("fa-IR"), Locale::Fa);
        assert_eq!(Locale::from_tag("FA"), Locale::Fa);
        assert_eq!(Locale::from_tag("de"), Locale::En);
    }

    #[test]
    fn parts_format_as_zero_padded_iso() {
        assert_eq!(DateParts::new(987, 3, 5).to_iso(), "0987-03-05");
    }
}
