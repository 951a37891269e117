use crate::core::date::{CalendarId, Locale};
use crate::core::digits::DigitMode;
use crate::core::error::{CalendarError, ConfigError};
use serde::{Deserialize, Serialize};

/// Plain-data engine settings. Capabilities that are not data (the Jalali
/// conversion, the clock) go through [`EngineBuilder`](crate::EngineBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub calendar: CalendarId,
    pub locale: Locale,
    pub digits: DigitMode,
    /// Overrides the calendar's default first column (0 = Sunday).
    pub week_start: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            calendar: CalendarId::Jalali,
            locale: Locale::Fa,
            digits: DigitMode::Auto,
            week_start: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        match self.week_start {
            Some(week_start) if week_start > 6 => Err(CalendarError::InvalidWeekStart(week_start)),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_persian_setup() {
        let config = EngineConfig::default();
        assert_eq!(config.calendar, CalendarId::Jalali);
        assert_eq!(config.locale, Locale::Fa);
        assert_eq!(config.digits, DigitMode::Auto);
        assert_eq!(config.week_start, None);
    }

    #[test]
    fn loads_partial_json() {
        let config =
            EngineConfig::from_json_str(r#"{ "calendar": "gregorian", "locale": "en-US", "weekStart": 0 }"#)
                .expect("config");
        assert_eq!(config.calendar, CalendarId::Gregorian);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.week_start, Some(0));
        assert_eq!(config.digits, DigitMode::Auto);
    }

    #[test]
    fn loads_yaml() {
        let yaml = "calendar: secondary\nlocale: fa\ndigits: latin\n";
        let config = EngineConfig::from_yaml_str(yaml).expect("config");
        assert_eq!(config.calendar, CalendarId::Jalali);
        assert_eq!(config.digits, DigitMode::Latin);
    }

    #[test]
    fn rejects_week_start_past_saturday() {
        let err = EngineConfig::from_json_str(r#"{ "weekStart": 9 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Calendar(CalendarError::InvalidWeekStart(9))
        ));
    }

    #[test]
    fn rejects_unknown_calendar() {
        let err = EngineConfig::from_json_str(r#"{ "calendar": "hebrew" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
