use serde::Serialize;

/// Render-ready month layout: leading blanks up to the first weekday,
/// the day numbers, then trailing blanks to complete the last week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_start: u32,
    pub cells: Vec<Option<u32>>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32, first_weekday: u32, week_start: u32, days: u32) -> Self {
        let leading = ((first_weekday + 7 - week_start % 7) % 7) as usize;
        let mut cells = Vec::with_capacity(42);
        cells.resize(leading, None);
        cells.extend((1..=days).map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        MonthGrid {
            year,
            month,
            week_start,
            cells,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(7)
    }

    pub fn day_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn leading_blanks(&self) -> usize {
        self.cells.iter().take_while(|c| c.is_none()).count()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn position_of(&self, day: u32) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .position(|c| *c == Some(day))
            .map(|pos| (pos / 7, pos % 7))
    }
}
