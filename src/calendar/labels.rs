use crate::core::date::Locale;
use serde::Serialize;

const GREGORIAN_MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const GREGORIAN_MONTHS_FA: [&str; 12] = [
    "ژانویه",
    "فوریه",
    "مارس",
    "آوریل",
    "مه",
    "ژوئن",
    "ژوئیه",
    "اوت",
    "سپتامبر",
    "اکتبر",
    "نوامبر",
    "دسامبر",
];

const JALALI_MONTHS_EN: [&str; 12] = [
    "Farvardin",
    "Ordibehesht",
    "Khordad",
    "Tir",
    "Mordad",
    "Shahrivar",
    "Mehr",
    "Aban",
    "Azar",
    "Dey",
    "Bahman",
    "Esfand",
];

const JALALI_MONTHS_FA: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

// Indexed by weekday number, Sunday first, for both calendars.
const WEEKDAYS_EN: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const WEEKDAYS_FA: [&str; 7] = ["ی", "د", "س", "چ", "پ", "ج", "ش"];

pub const GREGORIAN_WEEK_START: u32 = 1;
pub const JALALI_WEEK_START: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub months: [&'static str; 12],
    pub weekdays: [&'static str; 7],
    pub week_start: u32,
}

impl Labels {
    pub fn gregorian(locale: Locale, week_start: u32) -> Self {
        let months = match locale {
            Locale::Fa => GREGORIAN_MONTHS_FA,
            Locale::En => GREGORIAN_MONTHS_EN,
        };
        Self::with_months(months, locale, week_start)
    }

    pub fn jalali(locale: Locale, week_start: u32) -> Self {
        let months = match locale {
            Locale::Fa => JALALI_MONTHS_FA,
            Locale::En => JALALI_MONTHS_EN,
        };
        Self::with_months(months, locale, week_start)
    }

    fn with_months(months: [&'static str; 12], locale: Locale, week_start: u32) -> Self {
        let weekdays = match locale {
            Locale::Fa => WEEKDAYS_FA,
            Locale::En => WEEKDAYS_EN,
        };
        Self {
            months,
            weekdays,
            week_start,
        }
    }

    pub fn month_name(&self, month: u32) -> &'static str {
        self.months[(month as usize).saturating_sub(1) % 12]
    }

    /// Weekday header columns, starting at `week_start`.
    pub fn ordered_weekdays(&self) -> [&'static str; 7] {
        let mut out = [""; 7];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.weekdays[(self.week_start as usize + i) % 7];
        }
        out
    }
}
