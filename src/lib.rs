pub mod calendar;
pub mod core;
pub mod plugins;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use core::config;
pub use core::date;
pub use core::digits;
pub use core::engine;
pub use core::error;
pub use core::event;
pub use core::event_bus;
pub use core::intercept;
pub use core::plugin;

pub use calendar::{Adapter, CalendarAdapter, JalaliConversion, Labels, MonthGrid};
pub use core::config::EngineConfig;
pub use core::date::{CalendarId, Clock, DateParts, FixedClock, Locale, NeutralDate, SystemClock};
pub use core::digits::DigitMode;
pub use core::engine::{Engine, EngineBuilder, SelectOutcome, TextOutcome};
pub use core::error::{CalendarError, ConfigError, EngineError};
pub use core::event::{Channel, EngineState, Event, SelectionInfo};
pub use core::event_bus::{EventBus, Subscription};
pub use core::intercept::{InputParser, ValueFormatter};
pub use core::plugin::{Destroy, Plugin, Teardown};
