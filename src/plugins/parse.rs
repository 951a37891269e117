use crate::calendar::SharedConversion;
use crate::core::date::{self, CalendarId, DateParts};
use crate::core::digits::to_latin_digits;
use crate::core::engine::Engine;
use crate::core::error::EngineError;
use crate::core::intercept::{InputParser, ParsedInput};
use crate::core::plugin::{Plugin, Teardown};
use crate::plugins::format::DEFAULT_PATTERN;
use regex::Regex;
use std::rc::Rc;

const NAME: &str = "parse";

pub type InvalidCallback = Rc<dyn Fn(&str)>;

#[derive(Clone)]
pub struct ParseOptions {
    pub pattern: String,
    /// `None` reads input in the engine's active calendar.
    pub calendar: Option<CalendarId>,
    /// Require two-digit months and days.
    pub strict: bool,
    pub allow_empty: bool,
    pub on_invalid: Option<InvalidCallback>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            calendar: None,
            strict: false,
            allow_empty: true,
            on_invalid: None,
        }
    }
}

impl ParseOptions {
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn allow_empty(mut self, allow_empty: bool) -> Self {
        self.allow_empty = allow_empty;
        self
    }

    pub fn on_invalid(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_invalid = Some(Rc::new(callback));
        self
    }
}

/// Pattern-driven text to date parser.
pub struct DateParser {
    regex: Regex,
    calendar: Option<CalendarId>,
    allow_empty: bool,
    on_invalid: Option<InvalidCallback>,
}

impl DateParser {
    pub fn new(options: ParseOptions) -> Result<Self, EngineError> {
        let regex = pattern_regex(&options.pattern, options.strict)?;
        Ok(Self {
            regex,
            calendar: options.calendar,
            allow_empty: options.allow_empty,
            on_invalid: options.on_invalid,
        })
    }

    fn invalid(&self, raw: &str, reason: impl Into<String>) -> ParsedInput {
        if let Some(callback) = &self.on_invalid {
            callback(raw);
        }
        ParsedInput::Invalid(reason.into())
    }

    fn captures(&self, latin: &str) -> Option<DateParts> {
        let caps = self.regex.captures(latin)?;
        let field = |name: &str| caps.name(name).map(|m| m.as_str());
        Some(DateParts::new(
            field("year")?.parse().ok()?,
            field("month")?.parse().ok()?,
            field("day")?.parse().ok()?,
        ))
    }
}

impl InputParser for DateParser {
    fn parse(
        &self,
        raw: &str,
        active: CalendarId,
        conversion: Option<&SharedConversion>,
    ) -> ParsedInput {
        let raw = raw.trim();
        if raw.is_empty() {
            return if self.allow_empty {
                ParsedInput::Empty
            } else {
                self.invalid(raw, "empty input")
            };
        }

        let latin = to_latin_digits(raw);
        let Some(parts) = self.captures(&latin) else {
            return self.invalid(raw, format!("`{raw}` does not match the pattern"));
        };

        let calendar = self.calendar.unwrap_or(active);
        let valid = match calendar {
            CalendarId::Gregorian => date::is_valid_gregorian(parts),
            CalendarId::Jalali => match conversion {
                Some(conversion) => conversion.is_valid(parts),
                None => return self.invalid(raw, "jalali conversion is not available"),
            },
        };
        if !valid {
            return self.invalid(raw, format!("{parts} is not a valid {calendar} date"));
        }
        ParsedInput::Date { calendar, parts }
    }
}

fn pattern_regex(pattern: &str, strict: bool) -> Result<Regex, EngineError> {
    let field = if strict { "[0-9]{2}" } else { "[0-9]{1,2}" };
    let escaped = regex::escape(pattern);
    for token in ["YYYY", "MM", "DD"] {
        if !escaped.contains(token) {
            return Err(EngineError::plugin(
                NAME,
                format!("pattern `{pattern}` has no {token} field"),
            ));
        }
    }
    let source = escaped
        .replacen("YYYY", "(?P<year>[0-9]{4})", 1)
        .replacen("MM", &format!("(?P<month>{field})"), 1)
        .replacen("DD", &format!("(?P<day>{field})"), 1);
    Regex::new(&format!("^{source}$")).map_err(|err| EngineError::plugin(NAME, err.to_string()))
}

/// Lets [`Engine::submit_text`] accept typed dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parse;

impl Plugin for Parse {
    type Options = ParseOptions;

    fn name(&self) -> &str {
        NAME
    }

    fn install(self, engine: &mut Engine, options: ParseOptions) -> Result<Teardown, EngineError> {
        let parser = DateParser::new(options)?;
        if engine.set_input_parser(parser).is_some() {
            tracing::warn!("parse replaced an existing input parser");
        }
        Ok(Teardown::callback(|engine: &mut Engine| {
            engine.clear_input_parser();
        }))
    }
}
