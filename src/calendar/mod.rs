//! Calendar adapters.
//!
//! Every calendar the engine can show implements [`CalendarAdapter`]. The
//! engine never talks to a concrete adapter directly; it holds an
//! [`Adapter`], a closed enum keyed by [`CalendarId`], so adding a calendar
//! means adding a variant and letting the compiler find every call site.

pub mod gregorian;
pub mod grid;
pub mod jalali;
pub mod labels;

pub use gregorian::GregorianAdapter;
pub use grid::MonthGrid;
pub use jalali::{JalaliAdapter, JalaliConversion, SharedConversion};
pub use labels::Labels;

use crate::core::date::{CalendarId, Clock, DateParts, Locale, NeutralDate, SystemClock};
use crate::core::error::CalendarError;
use std::rc::Rc;

pub type SharedClock = Rc<dyn Clock>;

pub trait CalendarAdapter {
    fn id(&self) -> CalendarId;

    fn today_parts(&self) -> DateParts;

    fn month_length(&self, year: i32, month: u32) -> u32;

    fn to_neutral(&self, year: i32, month: u32, day: u32) -> Result<NeutralDate, CalendarError>;

    fn from_neutral(&self, date: NeutralDate) -> DateParts;

    fn labels(&self) -> Labels;

    fn parts_to_neutral(&self, parts: DateParts) -> Result<NeutralDate, CalendarError> {
        self.to_neutral(parts.year, parts.month, parts.day)
    }

    /// 0 = Sunday .. 6 = Saturday.
    fn first_weekday_of_month(&self, year: i32, month: u32) -> Result<u32, CalendarError> {
        Ok(self.to_neutral(year, month, 1)?.weekday())
    }

    fn month_grid(&self, year: i32, month: u32) -> Result<MonthGrid, CalendarError> {
        let first = self.first_weekday_of_month(year, month)?;
        let days = self.month_length(year, month);
        Ok(MonthGrid::new(
            year,
            month,
            first,
            self.labels().week_start,
            days,
        ))
    }
}

/// Everything an adapter may need at construction.
#[derive(Clone)]
pub struct AdapterOptions {
    pub locale: Locale,
    pub week_start: Option<u32>,
    pub conversion: Option<SharedConversion>,
    pub clock: SharedClock,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            week_start: None,
            conversion: None,
            clock: Rc::new(SystemClock),
        }
    }
}

pub enum Adapter {
    Gregorian(GregorianAdapter),
    Jalali(JalaliAdapter),
}

impl Adapter {
    pub fn new(id: CalendarId, options: &AdapterOptions) -> Result<Self, CalendarError> {
        if let Some(week_start) = options.week_start {
            if week_start > 6 {
                return Err(CalendarError::InvalidWeekStart(week_start));
            }
        }
        match id {
            CalendarId::Gregorian => Ok(Adapter::Gregorian(GregorianAdapter::new(options))),
            CalendarId::Jalali => JalaliAdapter::new(options).map(Adapter::Jalali),
        }
    }

    fn inner(&self) -> &dyn CalendarAdapter {
        match self {
            Adapter::Gregorian(adapter) => adapter,
            Adapter::Jalali(adapter) => adapter,
        }
    }
}

impl CalendarAdapter for Adapter {
    fn id(&self) -> CalendarId {
        self.inner().id()
    }

    fn today_parts(&self) -> DateParts {
        self.inner().today_parts()
    }

    fn month_length(&self, year: i32, month: u32) -> u32 {
        self.inner().month_length(year, month)
    }

    fn to_neutral(&self, year: i32, month: u32, day: u32) -> Result<NeutralDate, CalendarError> {
        self.inner().to_neutral(year, month, day)
    }

    fn from_neutral(&self, date: NeutralDate) -> DateParts {
        self.inner().from_neutral(date)
    }

    fn labels(&self) -> Labels {
        self.inner().labels()
    }
}

impl std::fmt::Debug for Adapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Adapter").field(&self.id()).finish()
    }
}
