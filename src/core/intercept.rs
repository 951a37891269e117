use crate::calendar::SharedConversion;
use crate::core::date::{CalendarId, DateParts};
use crate::core::event::SelectionInfo;
use indexmap::IndexMap;

/// Consulted before a selection commits. Returning `false` vetoes it.
pub type SelectionGuard = Box<dyn Fn(&SelectionInfo) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuardId(u64);

#[derive(Default)]
pub struct GuardSet {
    guards: IndexMap<GuardId, SelectionGuard>,
    next_id: u64,
}

impl GuardSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, guard: SelectionGuard) -> GuardId {
        let id = GuardId(self.next_id);
        self.next_id += 1;
        self.guards.insert(id, guard);
        id
    }

    pub fn remove(&mut self, id: GuardId) -> bool {
        self.guards.shift_remove(&id).is_some()
    }

    /// Guards run in registration order; the first veto wins.
    pub fn allows(&self, info: &SelectionInfo) -> bool {
        self.guards.values().all(|guard| guard(info))
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    pub fn clear(&mut self) {
        self.guards.clear();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    Empty,
    Date {
        calendar: CalendarId,
        parts: DateParts,
    },
    Invalid(String),
}

/// Turns raw text into a date for [`Engine::submit_text`](crate::Engine::submit_text).
pub trait InputParser {
    fn parse(
        &self,
        raw: &str,
        active: CalendarId,
        conversion: Option<&SharedConversion>,
    ) -> ParsedInput;
}

/// Turns selections into display text for
/// [`Engine::format_selection`](crate::Engine::format_selection).
pub trait ValueFormatter {
    fn format_parts(&self, parts: DateParts) -> String;

    fn format_selection(&self, info: &SelectionInfo) -> String;
}
