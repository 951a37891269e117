use crate::calendar::labels::{JALALI_WEEK_START, Labels};
use crate::calendar::{AdapterOptions, CalendarAdapter, SharedClock};
use crate::core::date::{CalendarId, DateParts, NeutralDate};
use crate::core::error::CalendarError;
use std::rc::Rc;

/// Numeric Jalali <-> Gregorian conversion supplied by the host.
///
/// The engine never computes Jalali dates itself; every Jalali field it
/// produces comes through this capability.
pub trait JalaliConversion {
    fn to_jalali(&self, gregorian: DateParts) -> DateParts;

    fn to_gregorian(&self, jalali: DateParts) -> DateParts;

    fn month_length(&self, year: i32, month: u32) -> u32;

    fn is_valid(&self, jalali: DateParts) -> bool {
        (1..=12).contains(&jalali.month)
            && jalali.day >= 1
            && jalali.day <= self.month_length(jalali.year, jalali.month)
    }
}

pub type SharedConversion = Rc<dyn JalaliConversion>;

pub struct JalaliAdapter {
    conversion: SharedConversion,
    labels: Labels,
    clock: SharedClock,
}

impl JalaliAdapter {
    pub fn new(options: &AdapterOptions) -> Result<Self, CalendarError> {
        let conversion = options
            .conversion
            .clone()
            .ok_or(CalendarError::MissingConversion)?;
        let week_start = options.week_start.unwrap_or(JALALI_WEEK_START);
        Ok(Self {
            conversion,
            labels: Labels::jalali(options.locale, week_start),
            clock: options.clock.clone(),
        })
    }

    pub fn conversion(&self) -> &SharedConversion {
        &self.conversion
    }
}

impl CalendarAdapter for JalaliAdapter {
    fn id(&self) -> CalendarId {
        CalendarId::Jalali
    }

    fn today_parts(&self) -> DateParts {
        self.from_neutral(self.clock.today())
    }

    fn month_length(&self, year: i32, month: u32) -> u32 {
        self.conversion.month_length(year, month)
    }

    fn to_neutral(&self, year: i32, month: u32, day: u32) -> Result<NeutralDate, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::MonthOutOfRange(month));
        }
        let gregorian = self.conversion.to_gregorian(DateParts::new(year, month, day));
        NeutralDate::from_parts(gregorian)
    }

    fn from_neutral(&self, date: NeutralDate) -> DateParts {
        self.conversion.to_jalali(date.gregorian_parts())
    }

    fn labels(&self) -> Labels {
        self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::date::{FixedClock, Locale};
    use crate::testing::ArithmeticJalali;

    fn adapter() -> JalaliAdapter {
        JalaliAdapter::new(&AdapterOptions {
            locale: Locale::En,
            conversion: Some(ArithmeticJalali::shared()),
            clock: Rc::new(FixedClock::gregorian(2024, 3, 15).expect("clock")),
            ..AdapterOptions::default()
        })
        .expect("adapter")
    }

    #[test]
    fn missing_conversion_is_reported() {
        let err = JalaliAdapter::new(&AdapterOptions::default()).err();
        assert_eq!(err, Some(CalendarError::MissingConversion));
    }

    #[test]
    fn today_is_derived_through_the_conversion() {
        assert_eq!(adapter().today_parts(), DateParts::new(1402, 12, 25));
    }

    #[test]
    fn farvardin_1403_starts_on_wednesday() {
        let adapter = adapter();
        assert_eq!(adapter.first_weekday_of_month(1403, 1), Ok(3));
        let grid = adapter.month_grid(1403, 1).expect("grid");
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn esfand_length_follows_leap_years() {
        let adapter = adapter();
        assert_eq!(adapter.month_length(1403, 12), 30);
        assert_eq!(adapter.month_length(1402, 12), 29);
    }

    #[test]
    fn round_trips_through_neutral_date() {
        let adapter = adapter();
        for year in [1300, 1399, 1402, 1403, 1404, 1500] {
            for month in 1..=12 {
                for day in 1..=adapter.month_length(year, month) {
                    let neutral = adapter.to_neutral(year, month, day).expect("valid");
                    assert_eq!(adapter.from_neutral(neutral), DateParts::new(year, month, day));
                }
            }
        }
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        assert_eq!(
            adapter().to_neutral(1403, 0, 1),
            Err(CalendarError::MonthOutOfRange(0))
        );
    }

    #[test]
    fn labels_default_to_saturday_start() {
        let labels = adapter().labels();
        assert_eq!(labels.week_start, 6);
        assert_eq!(labels.month_name(1), "Farvardin");
        assert_eq!(labels.month_name(12), "Esfand");
    }
}
