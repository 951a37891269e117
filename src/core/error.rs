use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("jalali calendar requires a conversion capability; none was supplied")]
    MissingConversion,

    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(u32),

    #[error("date {year}-{month}-{day} cannot be represented")]
    DateOutOfRange { year: i32, month: u32, day: u32 },

    #[error("week start {0} is outside 0..=6")]
    InvalidWeekStart(u32),

    #[error("unknown calendar: {0}")]
    UnknownCalendar(String),

    #[error("invalid ISO date \"{0}\" (expected YYYY-MM-DD)")]
    InvalidIso(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("plugin {name} failed to install: {message}")]
    Plugin { name: String, message: String },
}

impl EngineError {
    pub fn plugin(name: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Plugin {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn as_calendar(&self) -> Option<&CalendarError> {
        match self {
            EngineError::Calendar(err) => Some(err),
            EngineError::Config(ConfigError::Calendar(err)) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_conversion() {
        let err = CalendarError::MissingConversion;
        assert_eq!(
            err.to_string(),
            "jalali calendar requires a conversion capability; none was supplied"
        );
    }

    #[test]
    fn display_plugin_failure() {
        let err = EngineError::plugin("constraints", "bad min");
        assert_eq!(
            err.to_string(),
            "plugin constraints failed to install: bad min"
        );
    }

    #[test]
    fn calendar_errors_pass_through_engine_error() {
        let err = EngineError::from(CalendarError::MonthOutOfRange(0));
        assert_eq!(err.to_string(), "month 0 is outside 1..=12");
        assert_eq!(err.as_calendar(), Some(&CalendarError::MonthOutOfRange(0)));
    }
}
