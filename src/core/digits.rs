use crate::core::date::Locale;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigitMode {
    /// Persian digits for the `fa` locale, Latin otherwise.
    #[default]
    Auto,
    Latin,
    Persian,
}

impl DigitMode {
    pub fn resolve(self, locale: Locale) -> DigitMode {
        match self {
            DigitMode::Auto => match locale {
                Locale::Fa => DigitMode::Persian,
                Locale::En => DigitMode::Latin,
            },
            other => other,
        }
    }
}

pub fn to_persian_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) if c.is_ascii_digit() => PERSIAN_DIGITS[d as usize],
            _ => c,
        })
        .collect()
}

pub fn to_latin_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match PERSIAN_DIGITS.iter().position(|p| *p == c) {
            Some(d) => char::from(b'0' + d as u8),
            None => c,
        })
        .collect()
}

pub fn format_digits(value: impl Display, locale: Locale, mode: DigitMode) -> String {
    let raw = value.to_string();
    match mode.resolve(locale) {
        DigitMode::Persian => to_persian_digits(&raw),
        _ => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_follows_locale() {
        assert_eq!(format_digits(2024, Locale::Fa, DigitMode::Auto), "۲۰۲۴");
        assert_eq!(format_digits(2024, Locale::En, DigitMode::Auto), "2024");
    }

    #[test]
    fn explicit_mode_overrides_locale() {
        assert_eq!(format_digits("1403/01/05", Locale::En, DigitMode::Persian), "۱۴۰۳/۰۱/۰۵");
        assert_eq!(format_digits(15, Locale::Fa, DigitMode::Latin), "15");
    }

    #[test]
    fn latin_conversion_leaves_other_characters() {
        assert_eq!(to_latin_digits("۱۴۰۳-۱۲-x۹"), "1403-12-x9");
        assert_eq!(to_latin_digits(&to_persian_digits("0123456789")), "0123456789");
    }
}
