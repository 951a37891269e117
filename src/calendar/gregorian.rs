use crate::calendar::labels::{GREGORIAN_WEEK_START, Labels};
use crate::calendar::{AdapterOptions, CalendarAdapter, SharedClock};
use crate::core::date::{self, CalendarId, DateParts, NeutralDate};
use crate::core::error::CalendarError;

pub struct GregorianAdapter {
    labels: Labels,
    clock: SharedClock,
}

impl GregorianAdapter {
    pub fn new(options: &AdapterOptions) -> Self {
        let week_start = options.week_start.unwrap_or(GREGORIAN_WEEK_START);
        Self {
            labels: Labels::gregorian(options.locale, week_start),
            clock: options.clock.clone(),
        }
    }
}

impl CalendarAdapter for GregorianAdapter {
    fn id(&self) -> CalendarId {
        CalendarId::Gregorian
    }

    fn today_parts(&self) -> DateParts {
        self.clock.today().gregorian_parts()
    }

    fn month_length(&self, year: i32, month: u32) -> u32 {
        date::days_in_month(year, month)
    }

    fn to_neutral(&self, year: i32, month: u32, day: u32) -> Result<NeutralDate, CalendarError> {
        NeutralDate::from_gregorian(year, month, day)
    }

    fn from_neutral(&self, date: NeutralDate) -> DateParts {
        date.gregorian_parts()
    }

    fn labels(&self) -> Labels {
        self.labels
    }
}
