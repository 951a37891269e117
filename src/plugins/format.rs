use crate::core::date::{CalendarId, DateParts, Locale};
use crate::core::digits::{self, DigitMode};
use crate::core::engine::Engine;
use crate::core::error::EngineError;
use crate::core::event::{Channel, Event, SelectionInfo};
use crate::core::intercept::ValueFormatter;
use crate::core::plugin::{Plugin, Teardown};
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_PATTERN: &str = "YYYY/MM/DD";

/// Shared text buffer standing in for an input field.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: Rc<RefCell<String>>,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set(&self, value: impl Into<String>) {
        *self.value.borrow_mut() = value.into();
    }

    pub fn is_empty(&self) -> bool {
        self.value.borrow().is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FormatOptions {
    pub pattern: String,
    /// `None` formats in whichever calendar the selection was made in.
    pub calendar: Option<CalendarId>,
    /// Falls back to the engine's digit mode.
    pub digits: Option<DigitMode>,
    pub target: Option<TextField>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            calendar: None,
            digits: None,
            target: None,
        }
    }
}

impl FormatOptions {
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = Some(calendar);
        self
    }

    pub fn with_digits(mut self, digits: DigitMode) -> Self {
        self.digits = Some(digits);
        self
    }

    pub fn with_target(mut self, target: TextField) -> Self {
        self.target = Some(target);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    pattern: String,
    calendar: Option<CalendarId>,
    locale: Locale,
    digits: DigitMode,
}

impl DateFormatter {
    pub fn new(pattern: impl Into<String>, locale: Locale, digits: DigitMode) -> Self {
        Self {
            pattern: pattern.into(),
            calendar: None,
            locale,
            digits,
        }
    }

    pub fn with_calendar(mut self, calendar: Option<CalendarId>) -> Self {
        self.calendar = calendar;
        self
    }
}

impl ValueFormatter for DateFormatter {
    /// Substitutes `YYYY`, `MM` and `DD`. Month and day are zero-padded to
    /// two places; the year is written as is.
    fn format_parts(&self, parts: DateParts) -> String {
        let raw = self
            .pattern
            .replace("YYYY", &parts.year.to_string())
            .replace("MM", &format!("{:02}", parts.month))
            .replace("DD", &format!("{:02}", parts.day));
        digits::format_digits(raw, self.locale, self.digits)
    }

    /// Empty when the wanted representation is not available, which happens
    /// for Jalali output from a Gregorian engine without the conversion.
    fn format_selection(&self, info: &SelectionInfo) -> String {
        let parts = match self.calendar.unwrap_or(info.calendar) {
            CalendarId::Gregorian => Some(info.gregorian),
            CalendarId::Jalali => info.secondary,
        };
        parts.map(|p| self.format_parts(p)).unwrap_or_default()
    }
}

/// Installs a [`DateFormatter`] as the engine's value formatter and, when a
/// target is given, writes the formatted selection into it on every `change`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Format;

impl Plugin for Format {
    type Options = FormatOptions;

    fn name(&self) -> &str {
        "format"
    }

    fn install(self, engine: &mut Engine, options: FormatOptions) -> Result<Teardown, EngineError> {
        let config = engine.config();
        let formatter = Rc::new(
            DateFormatter::new(
                options.pattern,
                config.locale,
                options.digits.unwrap_or(config.digits),
            )
            .with_calendar(options.calendar),
        );
        if engine.set_value_formatter(formatter.clone()).is_some() {
            tracing::warn!("format replaced an existing value formatter");
        }

        let subscription = options.target.map(|target| {
            engine.subscribe(Channel::Change, move |event: &Event| {
                if let Event::Change(info) = event {
                    target.set(formatter.format_selection(info));
                }
            })
        });

        Ok(Teardown::callback(move |engine: &mut Engine| {
            engine.clear_value_formatter();
            if let Some(subscription) = subscription {
                subscription.unsubscribe();
            }
        }))
    }
}
