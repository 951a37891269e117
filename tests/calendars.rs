use rooz::calendar::{AdapterOptions, JalaliConversion};
use rooz::testing::ArithmeticJalali;
use rooz::{Adapter, CalendarAdapter, CalendarId, DateParts, Locale, NeutralDate};

fn adapter(id: CalendarId) -> Adapter {
    let options = AdapterOptions {
        locale: Locale::En,
        conversion: Some(ArithmeticJalali::shared()),
        ..AdapterOptions::default()
    };
    Adapter::new(id, &options).expect("adapter")
}

#[test]
fn every_month_grid_is_whole_weeks_holding_every_day() {
    for id in [CalendarId::Gregorian, CalendarId::Jalali] {
        let adapter = adapter(id);
        let years = match id {
            CalendarId::Gregorian => 1990..2030,
            CalendarId::Jalali => 1370..1410,
        };
        for year in years {
            for month in 1..=12 {
                let grid = adapter.month_grid(year, month).expect("grid");
                assert_eq!(grid.len() % 7, 0, "{id} {year}/{month}");
                assert_eq!(grid.day_count() as u32, adapter.month_length(year, month));
                assert!(grid.leading_blanks() < 7);
                let first = adapter.first_weekday_of_month(year, month).expect("weekday");
                assert_eq!(
                    grid.leading_blanks() as u32,
                    (first + 7 - adapter.labels().week_start) % 7
                );
            }
        }
    }
}

#[test]
fn jalali_round_trips_across_centuries() {
    let adapter = adapter(CalendarId::Jalali);
    for year in (1200..1600).step_by(7) {
        for month in 1..=12 {
            for day in 1..=adapter.month_length(year, month) {
                let neutral = adapter.to_neutral(year, month, day).expect("neutral");
                assert_eq!(adapter.from_neutral(neutral), DateParts::new(year, month, day));
            }
        }
    }
}

#[test]
fn consecutive_jalali_days_are_consecutive_neutral_days() {
    let adapter = adapter(CalendarId::Jalali);
    let mut previous: Option<NeutralDate> = None;
    for month in 1..=12 {
        for day in 1..=adapter.month_length(1403, month) {
            let neutral = adapter.to_neutral(1403, month, day).expect("neutral");
            if let Some(previous) = previous {
                assert_eq!((neutral.naive() - previous.naive()).num_days(), 1);
            }
            previous = Some(neutral);
        }
    }
    // 1403 is a leap year: 366 days, ending the day before 1404/01/01.
    let next_year = adapter.to_neutral(1404, 1, 1).expect("neutral");
    assert_eq!(previous.map(|p| (next_year.naive() - p.naive()).num_days()), Some(1));
}

#[test]
fn known_anchor_dates() {
    let conversion = ArithmeticJalali;
    assert_eq!(
        conversion.to_gregorian(DateParts::new(1403, 7, 1)),
        DateParts::new(2024, 9, 22)
    );
    assert_eq!(
        conversion.to_jalali(DateParts::new(2026, 10, 16)),
        DateParts::new(1405, 7, 24)
    );
    assert!(conversion.is_leap_year(1399));
    assert!(!conversion.is_leap_year(1402));
}

#[test]
fn gregorian_day_overflow_rolls_forward() {
    let adapter = adapter(CalendarId::Gregorian);
    let neutral = adapter.to_neutral(2023, 12, 32).expect("neutral");
    assert_eq!(neutral.to_iso(), "2024-01-01");
}
