use crate::calendar::SharedConversion;
use crate::core::date::{CalendarId, DateParts, NeutralDate};
use crate::core::engine::Engine;
use crate::core::error::EngineError;
use crate::core::event::SelectionInfo;
use crate::core::plugin::{Plugin, Teardown};
use std::rc::Rc;

const NAME: &str = "constraints";

pub type DisabledPredicate = Rc<dyn Fn(&SelectionInfo) -> bool>;

/// A min/max bound, in whichever form the caller has at hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bound {
    /// Gregorian `YYYY-MM-DD`.
    Iso(String),
    /// Parts in `calendar`, or in the engine's active calendar when `None`.
    Parts {
        parts: DateParts,
        calendar: Option<CalendarId>,
    },
    Neutral(NeutralDate),
}

impl Bound {
    pub fn iso(text: impl Into<String>) -> Self {
        Bound::Iso(text.into())
    }

    pub fn gregorian(year: i32, month: u32, day: u32) -> Self {
        Bound::Parts {
            parts: DateParts::new(year, month, day),
            calendar: Some(CalendarId::Gregorian),
        }
    }

    pub fn jalali(year: i32, month: u32, day: u32) -> Self {
        Bound::Parts {
            parts: DateParts::new(year, month, day),
            calendar: Some(CalendarId::Jalali),
        }
    }

    fn resolve(
        &self,
        active: CalendarId,
        conversion: Option<&SharedConversion>,
    ) -> Result<NeutralDate, EngineError> {
        match self {
            Bound::Neutral(date) => Ok(*date),
            Bound::Iso(text) => NeutralDate::parse_iso(text)
                .map_err(|err| EngineError::plugin(NAME, err.to_string())),
            Bound::Parts { parts, calendar } => match calendar.unwrap_or(active) {
                CalendarId::Gregorian => NeutralDate::from_parts(*parts)
                    .map_err(|err| EngineError::plugin(NAME, err.to_string())),
                CalendarId::Jalali => {
                    let conversion = conversion.ok_or_else(|| {
                        EngineError::plugin(NAME, "a jalali bound needs the jalali conversion")
                    })?;
                    NeutralDate::from_parts(conversion.to_gregorian(*parts))
                        .map_err(|err| EngineError::plugin(NAME, err.to_string()))
                }
            },
        }
    }
}

#[derive(Clone, Default)]
pub struct ConstraintOptions {
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    pub is_disabled: Option<DisabledPredicate>,
}

impl ConstraintOptions {
    pub fn min(mut self, bound: Bound) -> Self {
        self.min = Some(bound);
        self
    }

    pub fn max(mut self, bound: Bound) -> Self {
        self.max = Some(bound);
        self
    }

    pub fn disabled_when(mut self, predicate: impl Fn(&SelectionInfo) -> bool + 'static) -> Self {
        self.is_disabled = Some(Rc::new(predicate));
        self
    }
}

/// Rejects selections outside `[min, max]` or matching the disabled
/// predicate. Bounds compare on the neutral date, so they apply the same
/// way whichever calendar is active.
#[derive(Debug, Clone, Copy, Default)]
pub struct Constraints;

impl Plugin for Constraints {
    type Options = ConstraintOptions;

    fn name(&self) -> &str {
        NAME
    }

    fn install(self, engine: &mut Engine, options: ConstraintOptions) -> Result<Teardown, EngineError> {
        let active = engine.calendar();
        let conversion = engine.conversion();
        let min = options
            .min
            .as_ref()
            .map(|b| b.resolve(active, conversion))
            .transpose()?;
        let max = options
            .max
            .as_ref()
            .map(|b| b.resolve(active, conversion))
            .transpose()?;
        let is_disabled = options.is_disabled;

        let guard = engine.add_select_guard(move |info: &SelectionInfo| {
            let key = info.neutral_date;
            if min.is_some_and(|min| key < min) || max.is_some_and(|max| key > max) {
                return false;
            }
            !is_disabled.as_ref().is_some_and(|disabled| disabled(info))
        });

        Ok(Teardown::callback(move |engine: &mut Engine| {
            engine.remove_select_guard(guard);
        }))
    }
}
