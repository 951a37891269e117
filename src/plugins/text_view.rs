//! Plain-text month view, redrawn on every `render`.

use crate::core::date::Locale;
use crate::core::digits::{self, DigitMode};
use crate::core::engine::Engine;
use crate::core::error::EngineError;
use crate::core::event::{Channel, Event, RenderPayload};
use crate::core::plugin::{Plugin, Teardown};
use std::cell::RefCell;
use std::rc::Rc;
use unicode_width::UnicodeWidthStr;

const COLUMN_WIDTH: usize = 4;

/// Line buffer the view draws into.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    lines: Rc<RefCell<Vec<String>>>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn text(&self) -> String {
        self.lines.borrow().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    fn replace(&self, lines: Vec<String>) {
        *self.lines.borrow_mut() = lines;
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextViewOptions {
    pub surface: TextSurface,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TextView;

impl Plugin for TextView {
    type Options = TextViewOptions;

    fn name(&self) -> &str {
        "text_view"
    }

    fn install(self, engine: &mut Engine, options: TextViewOptions) -> Result<Teardown, EngineError> {
        let locale = engine.config().locale;
        let digits = engine.config().digits;
        let surface = options.surface;

        let subscription = engine.subscribe(Channel::Render, move |event: &Event| {
            if let Event::Render(payload) = event {
                surface.replace(draw(payload, locale, digits));
            }
        });
        if let Err(err) = engine.render() {
            subscription.unsubscribe();
            return Err(err);
        }

        Ok(Teardown::callback(move |_engine: &mut Engine| {
            subscription.unsubscribe();
        }))
    }
}

fn draw(payload: &RenderPayload, locale: Locale, mode: DigitMode) -> Vec<String> {
    let state = &payload.state;
    let number = |value: u32| digits::format_digits(value, locale, mode);

    let title = format!(
        "{} {}",
        payload.labels.month_name(state.view_month),
        digits::format_digits(state.view_year, locale, mode)
    );
    let header = payload
        .labels
        .ordered_weekdays()
        .iter()
        .map(|label| pad(label))
        .collect::<String>();

    let selected = state
        .selected
        .filter(|s| s.year == state.view_year && s.month == state.view_month)
        .map(|s| s.day);

    let mut lines = vec![title, header.trim_end().to_string()];
    for row in payload.grid.rows() {
        let line = row
            .iter()
            .map(|cell| match cell {
                Some(day) if Some(*day) == selected => pad(&format!("[{}]", number(*day))),
                Some(day) => pad(&number(*day)),
                None => pad(""),
            })
            .collect::<String>();
        lines.push(line.trim_end().to_string());
    }
    lines
}

// Right-aligns by display width, so Persian digits and labels line up with
// Latin ones.
fn pad(text: &str) -> String {
    let width = text.width();
    let fill = COLUMN_WIDTH.saturating_sub(width);
    format!("{}{text}", " ".repeat(fill))
}
