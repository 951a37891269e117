use rooz::testing::{ArithmeticJalali, EventLog};
use rooz::{
    CalendarAdapter, CalendarError, CalendarId, Channel, DateParts, Engine, EngineConfig, Event,
    FixedClock, Locale,
};
use std::rc::Rc;

fn clock(year: i32, month: u32, day: u32) -> Rc<FixedClock> {
    Rc::new(FixedClock::gregorian(year, month, day).expect("clock"))
}

fn gregorian_at(year: i32, month: u32, day: u32) -> Engine {
    Engine::builder()
        .calendar(CalendarId::Gregorian)
        .locale(Locale::En)
        .conversion(ArithmeticJalali::shared())
        .clock(clock(year, month, day))
        .build()
        .expect("engine")
}

#[test]
fn february_2024_grid_has_29_days() {
    let mut engine = gregorian_at(2024, 3, 15);
    engine.set_view(2024, 2).expect("view");

    let grid = engine.month_grid().expect("grid");
    assert_eq!(grid.day_count(), 29);
    assert_eq!(grid.leading_blanks(), 3);
    assert_eq!(grid.len(), 35);
}

#[test]
fn selecting_day_publishes_change_then_render() {
    let mut engine = gregorian_at(2024, 3, 1);
    let log = EventLog::new();
    let _subs = log.attach(&engine, &[Channel::Change, Channel::Render]);

    engine.select_day(15).expect("select");

    assert_eq!(log.channels(), vec![Channel::Change, Channel::Render]);
    let Some(Event::Change(info)) = log.last(&Channel::Change) else {
        panic!("expected a change event");
    };
    assert_eq!(info.iso, "2024-03-15");
    assert_eq!(info.gregorian, DateParts::new(2024, 3, 15));
    assert_eq!(info.secondary, Some(DateParts::new(1402, 12, 25)));
}

#[test]
fn jalali_engine_without_conversion_fails_at_build() {
    let err = Engine::new(EngineConfig::default()).unwrap_err();
    assert_eq!(err.as_calendar(), Some(&CalendarError::MissingConversion));
}

#[test]
fn switching_to_the_active_calendar_is_a_no_op() {
    let mut engine = gregorian_at(2024, 3, 1);
    engine.select_day(10).expect("select");
    let before = engine.state().clone();

    let log = EventLog::new();
    let _subs = log.attach(&engine, &[Channel::CalendarChange, Channel::Render]);
    engine.set_calendar(CalendarId::Gregorian).expect("switch");

    assert!(log.events().is_empty());
    assert_eq!(engine.state(), &before);
}

#[test]
fn calendar_round_trip_returns_to_todays_month() {
    let mut engine = gregorian_at(2024, 3, 15);
    let log = EventLog::new();
    let _subs = log.attach(&engine, &[Channel::CalendarChange, Channel::Render]);

    engine.set_calendar(CalendarId::Jalali).expect("to jalali");
    assert_eq!((engine.state().view_year, engine.state().view_month), (1402, 12));
    engine.set_calendar(CalendarId::Gregorian).expect("to gregorian");
    assert_eq!((engine.state().view_year, engine.state().view_month), (2024, 3));

    assert_eq!(
        log.channels(),
        vec![
            Channel::CalendarChange,
            Channel::Render,
            Channel::CalendarChange,
            Channel::Render
        ]
    );
}

#[test]
fn switching_calendar_follows_the_selection_and_clears_it() {
    let mut engine = gregorian_at(2024, 1, 1);
    engine.set_view(2024, 9).expect("view");
    engine.select_day(22).expect("select");

    engine.set_calendar(CalendarId::Jalali).expect("switch");
    assert_eq!((engine.state().view_year, engine.state().view_month), (1403, 7));
    assert_eq!(engine.state().selected, None);
}

#[test]
fn twelve_next_months_advance_one_year() {
    for calendar in [CalendarId::Gregorian, CalendarId::Jalali] {
        let mut engine = gregorian_at(2024, 11, 5);
        engine.set_calendar(calendar).expect("calendar");
        let (year, month) = (engine.state().view_year, engine.state().view_month);

        for _ in 0..12 {
            engine.next_month().expect("next");
        }
        assert_eq!((engine.state().view_year, engine.state().view_month), (year + 1, month));

        for _ in 0..12 {
            engine.prev_month().expect("prev");
        }
        assert_eq!((engine.state().view_year, engine.state().view_month), (year, month));
    }
}

#[test]
fn unsubscribed_handler_receives_nothing() {
    let mut engine = gregorian_at(2024, 3, 1);
    let log = EventLog::new();
    let sub = engine.subscribe(Channel::ViewChange, log.handler());
    assert!(sub.unsubscribe());

    engine.next_month().expect("next");
    assert!(log.events().is_empty());
    assert!(!engine.bus().has_channel(&Channel::ViewChange));
}

#[test]
fn custom_events_reach_named_channels() {
    let engine = gregorian_at(2024, 3, 1);
    let log = EventLog::new();
    let _subs = log.attach(&engine, &[Channel::from_name("open")]);

    engine.emit(Event::custom("open", serde_json::json!({ "source": "keyboard" })));
    engine.emit(Event::custom("close", serde_json::Value::Null));

    let events = log.events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].to_json(),
        serde_json::json!({ "name": "open", "payload": { "source": "keyboard" } })
    );
}

#[test]
fn render_payload_serializes_in_camel_case() {
    let engine = gregorian_at(2024, 3, 1);
    let log = EventLog::new();
    let _subs = log.attach(&engine, &[Channel::Render]);
    engine.render().expect("render");

    let payload = log.last(&Channel::Render).expect("render event").payload_json();
    assert_eq!(payload["state"]["viewYear"], 2024);
    assert_eq!(payload["state"]["viewMonth"], 3);
    assert_eq!(payload["labels"]["weekStart"], 1);
    assert_eq!(payload["grid"]["cells"].as_array().map(Vec::len), Some(35));
}

#[test]
fn select_date_in_other_calendar_switches_first() {
    let mut engine = gregorian_at(2024, 3, 1);
    let outcome = engine
        .select_date(CalendarId::Jalali, DateParts::new(1403, 12, 1))
        .expect("select");
    assert!(outcome.is_committed());
    assert_eq!(engine.calendar(), CalendarId::Jalali);
    assert_eq!(engine.adapter().id(), CalendarId::Jalali);

    let info = engine.describe_day(1403, 12, 1).expect("info");
    assert_eq!(info.iso, "2025-02-19");
    assert_eq!(info.neutral_date.weekday(), 3);
}

#[test]
fn engine_builds_from_yaml_config() {
    let config = EngineConfig::from_yaml_str("calendar: gregorian\nlocale: en\nweekStart: 0\n")
        .expect("config");
    let engine = Engine::builder()
        .config(config)
        .clock(clock(2024, 9, 1))
        .build()
        .expect("engine");

    let grid = engine.month_grid().expect("grid");
    assert_eq!(grid.leading_blanks(), 0);
    assert_eq!(engine.labels().ordered_weekdays()[0], "Su");
}
