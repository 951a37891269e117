//! Deterministic fixtures for tests (feature `test-support`).
//!
//! [`ArithmeticJalali`] is a reference implementation of the
//! [`JalaliConversion`] capability using the 33-year break table of the
//! widely used `jalaali` algorithm. Valid for Jalali years -61..3177.
//! [`EventLog`] records every event published on chosen channels.

use crate::calendar::JalaliConversion;
use crate::core::date::{DateParts, NeutralDate};
use crate::core::engine::Engine;
use crate::core::event::{Channel, Event};
use crate::core::event_bus::Subscription;
use chrono::{Datelike, NaiveDate};
use std::cell::RefCell;
use std::rc::Rc;

const BREAKS: [i64; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

// Julian day number of 0001-01-01 minus one.
const CE_JDN_OFFSET: i64 = 1_721_425;

#[derive(Debug, Clone, Copy, Default)]
pub struct ArithmeticJalali;

struct YearInfo {
    leap: i64,
    gregorian_year: i64,
    march: i64,
}

impl ArithmeticJalali {
    pub fn is_leap_year(&self, year: i32) -> bool {
        jal_cal(i64::from(year)).leap == 0
    }

    pub fn shared() -> Rc<dyn JalaliConversion> {
        Rc::new(ArithmeticJalali)
    }
}

impl JalaliConversion for ArithmeticJalali {
    fn to_jalali(&self, gregorian: DateParts) -> DateParts {
        let jdn = gregorian_to_jdn(
            i64::from(gregorian.year),
            i64::from(gregorian.month),
            i64::from(gregorian.day),
        );
        jdn_to_jalali(jdn)
    }

    fn to_gregorian(&self, jalali: DateParts) -> DateParts {
        let jdn = jalali_to_jdn(
            i64::from(jalali.year),
            i64::from(jalali.month),
            i64::from(jalali.day),
        );
        jdn_to_gregorian(jdn)
    }

    fn month_length(&self, year: i32, month: u32) -> u32 {
        match month {
            1..=6 => 31,
            7..=11 => 30,
            _ if self.is_leap_year(year) => 30,
            _ => 29,
        }
    }
}

fn jal_cal(jy: i64) -> YearInfo {
    let gy = jy + 621;
    let mut leap_j = -14;
    let mut jp = BREAKS[0];
    let mut jump = 0;
    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + (jump % 33) / 4;
        jp = jm;
    }
    let mut n = jy - jp;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }
    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }
    YearInfo {
        leap,
        gregorian_year: gy,
        march,
    }
}

fn jalali_to_jdn(jy: i64, jm: i64, jd: i64) -> i64 {
    let info = jal_cal(jy);
    gregorian_to_jdn(info.gregorian_year, 3, info.march) + (jm - 1) * 31 - jm / 7 * (jm - 7) + jd
        - 1
}

fn jdn_to_jalali(jdn: i64) -> DateParts {
    let gy = i64::from(jdn_to_gregorian(jdn).year);
    let mut jy = gy - 621;
    let info = jal_cal(jy);
    let farvardin_first = gregorian_to_jdn(gy, 3, info.march);
    let mut k = jdn - farvardin_first;
    if k >= 0 {
        if k <= 185 {
            return parts(jy, 1 + k / 31, k % 31 + 1);
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if info.leap == 1 {
            k += 1;
        }
    }
    parts(jy, 7 + k / 30, k % 30 + 1)
}

// Day rollover (e.g. March 32) is resolved the same way the neutral pivot does.
fn gregorian_to_jdn(year: i64, month: i64, day: i64) -> i64 {
    let first = NaiveDate::from_ymd_opt(year as i32, month as u32, 1)
        .unwrap_or(NaiveDate::MIN)
        .num_days_from_ce();
    i64::from(first) + day - 1 + CE_JDN_OFFSET
}

fn jdn_to_gregorian(jdn: i64) -> DateParts {
    let date = NaiveDate::from_num_days_from_ce_opt((jdn - CE_JDN_OFFSET) as i32)
        .unwrap_or(NaiveDate::MIN);
    NeutralDate::new(date).gregorian_parts()
}

fn parts(year: i64, month: i64, day: i64) -> DateParts {
    DateParts::new(year as i32, month as u32, day as u32)
}

// ── Event recording ───────────────────────────────────────────────────────────

/// Shared log of published events, in publish order.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to every listed channel on `engine`.
    pub fn attach(&self, engine: &Engine, channels: &[Channel]) -> Vec<Subscription> {
        channels
            .iter()
            .map(|channel| engine.subscribe(channel.clone(), self.handler()))
            .collect()
    }

    pub fn handler(&self) -> Box<dyn FnMut(&Event)> {
        let events = self.events.clone();
        Box::new(move |event: &Event| events.borrow_mut().push(event.clone()))
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn channels(&self) -> Vec<Channel> {
        self.events.borrow().iter().map(Event::channel).collect()
    }

    pub fn count(&self, channel: &Channel) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| &e.channel() == channel)
            .count()
    }

    pub fn last(&self, channel: &Channel) -> Option<Event> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find(|e| &e.channel() == channel)
            .cloned()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nowruz_1403_is_march_20_2024() {
        let conv = ArithmeticJalali;
        assert_eq!(
            conv.to_gregorian(DateParts::new(1403, 1, 1)),
            DateParts::new(2024, 3, 20)
        );
        assert_eq!(
            conv.to_jalali(DateParts::new(2024, 3, 15)),
            DateParts::new(1402, 12, 25)
        );
    }

    #[test]
    fn esfand_length_tracks_leap_years() {
        let conv = ArithmeticJalali;
        assert_eq!(conv.month_length(1403, 12), 30);
        assert_eq!(conv.month_length(1402, 12), 29);
        assert_eq!(conv.month_length(1399, 12), 30);
        assert_eq!(conv.month_length(1403, 7), 30);
        assert_eq!(conv.month_length(1403, 6), 31);
    }
}
