//! The date-selection state machine.
//!
//! [`Engine`] owns the [`EngineState`], the single active [`Adapter`], the
//! [`EventBus`] and the installed plugins. Every mutating operation follows
//! the same order: mutate state, publish the operation's event, then
//! publish `render`.

use crate::calendar::{
    Adapter, AdapterOptions, CalendarAdapter, Labels, MonthGrid, SharedClock, SharedConversion,
};
use crate::core::config::EngineConfig;
use crate::core::date::{CalendarId, DateParts, Locale, SystemClock};
use crate::core::digits::{self, DigitMode};
use crate::core::error::{CalendarError, EngineError};
use crate::core::event::{
    CalendarChangePayload, Channel, EngineState, Event, InitPayload, RenderPayload, SelectionInfo,
    ViewChangePayload,
};
use crate::core::event_bus::{EventBus, Subscription};
use crate::core::intercept::{GuardId, GuardSet, InputParser, ParsedInput, ValueFormatter};
use crate::core::plugin::{Plugin, PluginRegistry};
use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Committed,
    /// A selection guard rejected the day; nothing changed.
    Vetoed,
}

impl SelectOutcome {
    pub fn is_committed(self) -> bool {
        self == SelectOutcome::Committed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    Applied(SelectOutcome),
    Empty,
    Invalid(String),
    /// No input parser is installed.
    Unhandled,
}

// ── Builder ───────────────────────────────────────────────────────────────────

pub struct EngineBuilder {
    config: EngineConfig,
    conversion: Option<SharedConversion>,
    clock: SharedClock,
    bus: EventBus,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            conversion: None,
            clock: Rc::new(SystemClock),
            bus: EventBus::new(),
        }
    }
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn calendar(mut self, calendar: CalendarId) -> Self {
        self.config.calendar = calendar;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.config.locale = locale;
        self
    }

    pub fn digits(mut self, digits: DigitMode) -> Self {
        self.config.digits = digits;
        self
    }

    pub fn week_start(mut self, week_start: u32) -> Self {
        self.config.week_start = Some(week_start);
        self
    }

    pub fn conversion(mut self, conversion: SharedConversion) -> Self {
        self.conversion = Some(conversion);
        self
    }

    pub fn clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Registers a handler before the engine exists, so it observes `init`.
    pub fn subscribe<F>(self, channel: Channel, handler: F) -> Self
    where
        F: FnMut(&Event) + 'static,
    {
        let _ = self.bus.subscribe(channel, Box::new(handler));
        self
    }

    pub fn build(self) -> Result<Engine, EngineError> {
        self.config.validate()?;
        let adapter_options = AdapterOptions {
            locale: self.config.locale,
            week_start: self.config.week_start,
            conversion: self.conversion,
            clock: self.clock,
        };
        let adapter = Adapter::new(self.config.calendar, &adapter_options)?;
        let today = adapter.today_parts();
        let state = EngineState {
            calendar: adapter.id(),
            locale: self.config.locale,
            view_year: today.year,
            view_month: today.month,
            selected: None,
        };
        tracing::debug!(calendar = %state.calendar, year = state.view_year, month = state.view_month, "engine created");

        let engine = Engine {
            config: self.config,
            state,
            adapter,
            adapter_options,
            bus: self.bus,
            guards: GuardSet::new(),
            input_parser: None,
            value_formatter: None,
            plugins: PluginRegistry::new(),
            destroyed: false,
        };
        engine.bus.publish(&Event::Init(InitPayload {
            state: engine.state.clone(),
        }));
        Ok(engine)
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

pub struct Engine {
    config: EngineConfig,
    state: EngineState,
    adapter: Adapter,
    adapter_options: AdapterOptions,
    bus: EventBus,
    guards: GuardSet,
    input_parser: Option<Box<dyn InputParser>>,
    value_formatter: Option<Rc<dyn ValueFormatter>>,
    plugins: PluginRegistry,
    destroyed: bool,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        Self::builder().config(config).build()
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn calendar(&self) -> CalendarId {
        self.state.calendar
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn adapter(&self) -> &Adapter {
        &self.adapter
    }

    pub fn labels(&self) -> Labels {
        self.adapter.labels()
    }

    pub fn conversion(&self) -> Option<&SharedConversion> {
        self.adapter_options.conversion.as_ref()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // ── Events ────────────────────────────────────────────────────────────────

    pub fn subscribe<F>(&self, channel: Channel, handler: F) -> Subscription
    where
        F: FnMut(&Event) + 'static,
    {
        self.bus.subscribe(channel, Box::new(handler))
    }

    pub fn emit(&self, event: Event) {
        self.bus.publish(&event);
    }

    // ── Calendar switching ────────────────────────────────────────────────────

    /// Switches the active calendar, keeping the view on the same point in
    /// time (the selection if any, otherwise today). Clears the selection.
    pub fn set_calendar(&mut self, id: CalendarId) -> Result<(), EngineError> {
        if id == self.state.calendar {
            return Ok(());
        }
        let anchor_parts = self
            .state
            .selected
            .unwrap_or_else(|| self.adapter.today_parts());
        let anchor = self.adapter.parts_to_neutral(anchor_parts)?;

        let next = Adapter::new(id, &self.adapter_options)?;
        let view = next.from_neutral(anchor);
        let grid = next.month_grid(view.year, view.month)?;
        let previous = self.state.calendar;

        self.adapter = next;
        self.state.calendar = id;
        self.state.view_year = view.year;
        self.state.view_month = view.month;
        self.state.selected = None;
        tracing::debug!(from = %previous, to = %id, year = view.year, month = view.month, "calendar switched");

        self.bus.publish(&Event::CalendarChange(CalendarChangePayload {
            calendar: id,
            previous,
        }));
        self.publish_render(grid);
        Ok(())
    }

    pub fn set_calendar_by_name(&mut self, name: &str) -> Result<(), EngineError> {
        let id: CalendarId = name.parse()?;
        self.set_calendar(id)
    }

    // ── View navigation ───────────────────────────────────────────────────────

    /// Moves the view cursor. Fails without touching state when the month
    /// is out of range or the adapter cannot lay the month out.
    pub fn set_view(&mut self, year: i32, month: u32) -> Result<(), EngineError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::MonthOutOfRange(month).into());
        }
        let grid = self.adapter.month_grid(year, month)?;
        self.state.view_year = year;
        self.state.view_month = month;
        tracing::debug!(year, month, "view changed");

        self.bus
            .publish(&Event::ViewChange(ViewChangePayload { year, month }));
        self.publish_render(grid);
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), EngineError> {
        self.shift_view(1)
    }

    pub fn prev_month(&mut self) -> Result<(), EngineError> {
        self.shift_view(-1)
    }

    fn shift_view(&mut self, delta: i32) -> Result<(), EngineError> {
        let total = self.state.view_month as i32 - 1 + delta;
        let year = self
            .state
            .view_year
            .checked_add(total.div_euclid(12))
            .ok_or(CalendarError::DateOutOfRange {
                year: self.state.view_year,
                month: self.state.view_month,
                day: 1,
            })?;
        let month = (total.rem_euclid(12) + 1) as u32;
        self.set_view(year, month)
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Describes a day of the active calendar in every representation the
    /// engine can produce, without touching state.
    pub fn describe_day(&self, year: i32, month: u32, day: u32) -> Result<SelectionInfo, EngineError> {
        let selected = DateParts::new(year, month, day);
        let neutral_date = self.adapter.parts_to_neutral(selected)?;
        let gregorian = neutral_date.gregorian_parts();
        let secondary = match self.state.calendar {
            CalendarId::Jalali => Some(selected),
            CalendarId::Gregorian => self.conversion().map(|c| c.to_jalali(gregorian)),
        };
        Ok(SelectionInfo {
            calendar: self.state.calendar,
            selected,
            neutral_date,
            gregorian,
            secondary,
            iso: gregorian.to_iso(),
        })
    }

    /// Selects `day` of the month in view. Day values are not checked
    /// against the month; callers pass days taken from [`Self::month_grid`].
    /// A day past the end of the month rolls over into the following ones,
    /// so the only day-driven failure is [`CalendarError::DateOutOfRange`],
    /// returned when the rolled-over date leaves the range `chrono` can
    /// represent (roughly ±262,000 years). State is untouched in that case.
    pub fn select_day(&mut self, day: u32) -> Result<SelectOutcome, EngineError> {
        let info = self.describe_day(self.state.view_year, self.state.view_month, day)?;
        if !self.guards.allows(&info) {
            tracing::debug!(date = %info.selected, calendar = %info.calendar, "selection vetoed");
            return Ok(SelectOutcome::Vetoed);
        }
        self.state.selected = Some(info.selected);
        tracing::debug!(date = %info.selected, iso = %info.iso, "day selected");

        self.bus.publish(&Event::Change(info));
        self.render()?;
        Ok(SelectOutcome::Committed)
    }

    /// Switches to `calendar`, moves the view to the date's month and
    /// selects it.
    pub fn select_date(&mut self, calendar: CalendarId, parts: DateParts) -> Result<SelectOutcome, EngineError> {
        self.set_calendar(calendar)?;
        self.set_view(parts.year, parts.month)?;
        self.select_day(parts.day)
    }

    pub fn is_disabled_day(&self, year: i32, month: u32, day: u32) -> Result<bool, EngineError> {
        let info = self.describe_day(year, month, day)?;
        Ok(!self.guards.allows(&info))
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn month_grid(&self) -> Result<MonthGrid, EngineError> {
        Ok(self
            .adapter
            .month_grid(self.state.view_year, self.state.view_month)?)
    }

    pub fn render(&self) -> Result<(), EngineError> {
        let grid = self.month_grid()?;
        self.publish_render(grid);
        Ok(())
    }

    fn publish_render(&self, grid: MonthGrid) {
        self.bus.publish(&Event::Render(RenderPayload {
            state: self.state.clone(),
            labels: self.adapter.labels(),
            grid,
        }));
    }

    pub fn format_digits(&self, value: impl Display) -> String {
        digits::format_digits(value, self.config.locale, self.config.digits)
    }

    // ── Interceptors ──────────────────────────────────────────────────────────

    pub fn add_select_guard<F>(&mut self, guard: F) -> GuardId
    where
        F: Fn(&SelectionInfo) -> bool + 'static,
    {
        self.guards.insert(Box::new(guard))
    }

    pub fn remove_select_guard(&mut self, id: GuardId) -> bool {
        self.guards.remove(id)
    }

    /// Installs the parser used by [`Self::submit_text`], returning the one
    /// it replaces.
    pub fn set_input_parser(
        &mut self,
        parser: impl InputParser + 'static,
    ) -> Option<Box<dyn InputParser>> {
        self.input_parser.replace(Box::new(parser))
    }

    pub fn clear_input_parser(&mut self) -> Option<Box<dyn InputParser>> {
        self.input_parser.take()
    }

    pub fn has_input_parser(&self) -> bool {
        self.input_parser.is_some()
    }

    pub fn submit_text(&mut self, raw: &str) -> Result<TextOutcome, EngineError> {
        let parsed = match &self.input_parser {
            Some(parser) => parser.parse(
                raw,
                self.state.calendar,
                self.adapter_options.conversion.as_ref(),
            ),
            None => return Ok(TextOutcome::Unhandled),
        };
        match parsed {
            ParsedInput::Empty => Ok(TextOutcome::Empty),
            ParsedInput::Invalid(reason) => {
                tracing::debug!(input = raw, %reason, "input rejected");
                Ok(TextOutcome::Invalid(reason))
            }
            ParsedInput::Date { calendar, parts } => {
                self.select_date(calendar, parts).map(TextOutcome::Applied)
            }
        }
    }

    /// Installs the formatter behind [`Self::format_selection`], returning
    /// the one it replaces.
    pub fn set_value_formatter(
        &mut self,
        formatter: Rc<dyn ValueFormatter>,
    ) -> Option<Rc<dyn ValueFormatter>> {
        self.value_formatter.replace(formatter)
    }

    pub fn clear_value_formatter(&mut self) -> Option<Rc<dyn ValueFormatter>> {
        self.value_formatter.take()
    }

    /// `None` when no formatter is installed.
    pub fn format_selection(&self, info: &SelectionInfo) -> Option<String> {
        self.value_formatter
            .as_ref()
            .map(|formatter| formatter.format_selection(info))
    }

    pub fn format_parts(&self, parts: DateParts) -> Option<String> {
        self.value_formatter
            .as_ref()
            .map(|formatter| formatter.format_parts(parts))
    }

    /// The current selection, formatted. `Ok(None)` when nothing is
    /// selected or no formatter is installed.
    pub fn formatted_value(&self) -> Result<Option<String>, EngineError> {
        let Some(selected) = self.state.selected else {
            return Ok(None);
        };
        let info = self.describe_day(selected.year, selected.month, selected.day)?;
        Ok(self.format_selection(&info))
    }

    // ── Plugins ───────────────────────────────────────────────────────────────

    pub fn use_plugin<P: Plugin>(&mut self, plugin: P, options: P::Options) -> Result<&mut Self, EngineError> {
        let name = plugin.name().to_string();
        let teardown = plugin.install(self, options)?;
        tracing::debug!(plugin = %name, "plugin installed");
        self.plugins.record(name, teardown);
        Ok(self)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.names()
    }

    /// Runs every plugin teardown, newest first, then drops all subscribers.
    /// Safe to call repeatedly; each teardown runs once.
    pub fn destroy(&mut self) {
        if self.destroyed && self.plugins.is_empty() {
            tracing::warn!("destroy called on an already destroyed engine");
        }
        self.destroyed = true;
        for plugin in self.plugins.drain_for_teardown() {
            tracing::debug!(plugin = %plugin.name, "plugin teardown");
            plugin.teardown.run(self);
        }
        self.bus.clear();
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if !self.plugins.is_empty() {
            self.destroy();
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("plugins", &self.plugins.names())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
