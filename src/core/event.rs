use crate::calendar::{Labels, MonthGrid};
use crate::core::date::{CalendarId, DateParts, Locale, NeutralDate};
use serde::Serialize;
use std::fmt;

/// Snapshot of the engine's date-selection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub calendar: CalendarId,
    pub locale: Locale,
    pub view_year: i32,
    pub view_month: u32,
    /// Expressed in `calendar` units.
    pub selected: Option<DateParts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    Init,
    CalendarChange,
    ViewChange,
    Change,
    Render,
    Custom(String),
}

impl Channel {
    pub fn name(&self) -> &str {
        match self {
            Channel::Init => "init",
            Channel::CalendarChange => "calendarChange",
            Channel::ViewChange => "viewChange",
            Channel::Change => "change",
            Channel::Render => "render",
            Channel::Custom(name) => name,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "init" => Channel::Init,
            "calendarChange" => Channel::CalendarChange,
            "viewChange" => Channel::ViewChange,
            "change" => Channel::Change,
            "render" => Channel::Render,
            other => Channel::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitPayload {
    pub state: EngineState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarChangePayload {
    pub calendar: CalendarId,
    pub previous: CalendarId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewChangePayload {
    pub year: i32,
    pub month: u32,
}

/// A day described in every representation the engine knows about.
/// Published on `change` and handed to selection guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionInfo {
    pub calendar: CalendarId,
    pub selected: DateParts,
    pub neutral_date: NeutralDate,
    pub gregorian: DateParts,
    /// Jalali representation; `None` when it cannot be derived.
    pub secondary: Option<DateParts>,
    pub iso: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub state: EngineState,
    pub labels: Labels,
    pub grid: MonthGrid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Init(InitPayload),
    CalendarChange(CalendarChangePayload),
    ViewChange(ViewChangePayload),
    Change(SelectionInfo),
    Render(RenderPayload),
    Custom {
        name: String,
        payload: serde_json::Value,
    },
}

impl Event {
    pub fn channel(&self) -> Channel {
        match self {
            Event::Init(_) => Channel::Init,
            Event::CalendarChange(_) => Channel::CalendarChange,
            Event::ViewChange(_) => Channel::ViewChange,
            Event::Change(_) => Channel::Change,
            Event::Render(_) => Channel::Render,
            Event::Custom { name, .. } => Channel::Custom(name.clone()),
        }
    }

    /// A plugin-defined event. It always travels on `Channel::Custom`, even
    /// when `name` matches a built-in channel, so built-in subscribers only
    /// ever see their own payload type.
    pub fn custom(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Event::Custom {
            name: name.into(),
            payload,
        }
    }

    pub fn payload_json(&self) -> serde_json::Value {
        let payload = match self {
            Event::Init(p) => serde_json::to_value(p),
            Event::CalendarChange(p) => serde_json::to_value(p),
            Event::ViewChange(p) => serde_json::to_value(p),
            Event::Change(p) => serde_json::to_value(p),
            Event::Render(p) => serde_json::to_value(p),
            Event::Custom { payload, .. } => Ok(payload.clone()),
        };
        payload.unwrap_or(serde_json::Value::Null)
    }

    /// `{ "name": <channel>, "payload": <payload> }`, the shape handed to
    /// out-of-process renderers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.channel().name(),
            "payload": self.payload_json(),
        })
    }
}
