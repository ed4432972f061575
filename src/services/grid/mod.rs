//! Timetable grid geometry.
//!
//! Converts between day labels, column indices, time slots and integer pixel
//! coordinates. The grid has a time-label column of `header_width` pixels on
//! the left and a day-label row of `header_height` pixels on top; each day
//! column is `col_width` wide and each slot row `row_height` tall.

use thiserror::Error;

use crate::models::schedule::Day;
use crate::models::settings::GridSettings;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The label is not one of the six day glyphs
    #[error("Invalid day label: {0:?}")]
    InvalidDay(String),
}

/// A pixel offset or position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Translate by `offset`
    pub fn translate(&self, offset: Point) -> Rect {
        Rect {
            left: self.left + offset.x,
            top: self.top + offset.y,
            ..*self
        }
    }

    /// True when `other` lies entirely within this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Grid conversions parameterized by [`GridSettings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    settings: GridSettings,
}

impl GridGeometry {
    pub fn new(settings: GridSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    /// Column index of a day label.
    ///
    /// # Examples
    /// ```
    /// use timetable_planner::models::settings::GridSettings;
    /// use timetable_planner::services::grid::{GridError, GridGeometry};
    ///
    /// let grid = GridGeometry::new(GridSettings::default());
    /// assert_eq!(grid.day_index("수"), Ok(2));
    /// assert_eq!(grid.day_index("일"), Err(GridError::InvalidDay("일".to_string())));
    /// ```
    pub fn day_index(&self, label: &str) -> Result<usize, GridError> {
        Day::from_label(label)
            .map(Day::index)
            .ok_or_else(|| GridError::InvalidDay(label.to_string()))
    }

    /// Day at a possibly out-of-range column index
    pub fn day_at(&self, index: i64) -> Option<Day> {
        usize::try_from(index).ok().and_then(Day::from_index)
    }

    /// Rectangle of a meeting block, relative to the grid's top-left corner.
    /// Returns `None` for an empty range.
    pub fn pixel_position(&self, day: Day, range: &[u32]) -> Option<Rect> {
        let first = *range.first()?;
        let s = &self.settings;

        let slot_offset = i64::from(first) - i64::from(s.min_slot);
        let top = slot_offset * i64::from(s.row_height) + i64::from(s.header_height);
        let left = day.index() as i64 * i64::from(s.col_width) + i64::from(s.header_width);
        let height = range.len() as i64 * i64::from(s.row_height);

        Some(Rect {
            left: saturate(left),
            top: saturate(top),
            width: s.col_width,
            height: saturate(height),
        })
    }

    /// Round a raw pointer delta to whole cells: `round(delta / size) * size`
    /// per axis, with halves rounding towards positive infinity.
    pub fn snap_delta(&self, raw_dx: i32, raw_dy: i32) -> Point {
        Point {
            x: snap_axis(raw_dx, self.settings.col_width),
            y: snap_axis(raw_dy, self.settings.row_height),
        }
    }

    /// Clamp a drag offset so `dragged` stays inside `container`, never
    /// covering the header column or header row.
    pub fn clamp_to_container(&self, offset: Point, container: Rect, dragged: Rect) -> Point {
        let min_x = container.left + self.settings.header_width - dragged.left;
        let min_y = container.top + self.settings.header_height - dragged.top;
        let max_x = container.right() - dragged.right();
        let max_y = container.bottom() - dragged.bottom();

        // Upper bound wins when the element is larger than the free area.
        Point {
            x: offset.x.max(min_x).min(max_x),
            y: offset.y.max(min_y).min(max_y),
        }
    }

    /// Visual offset shown while dragging: snapped, then clamped
    pub fn snapped_transform(&self, raw: Point, container: Rect, dragged: Rect) -> Point {
        let snapped = self.snap_delta(raw.x, raw.y);
        self.clamp_to_container(snapped, container, dragged)
    }

    /// Whole-cell steps of a raw delta, rounded towards negative infinity.
    /// An axis with a non-positive cell size never steps.
    pub fn cell_steps(&self, raw: Point) -> (i64, i64) {
        (
            floor_steps(raw.x, self.settings.col_width),
            floor_steps(raw.y, self.settings.row_height),
        )
    }

    /// The cell under a point relative to the grid's top-left corner.
    /// Header areas and points past the last row or column yield `None`.
    pub fn cell_at(&self, point: Point) -> Option<(Day, u32)> {
        let s = &self.settings;
        let x = point.x - s.header_width;
        let y = point.y - s.header_height;
        if x < 0 || y < 0 || s.col_width <= 0 || s.row_height <= 0 {
            return None;
        }

        let day = Day::from_index((x / s.col_width) as usize)?;
        let slot = s.min_slot.checked_add(u32::try_from(y / s.row_height).ok()?)?;
        if slot > s.max_slot {
            return None;
        }
        Some((day, slot))
    }

    /// Bounds of the whole grid including headers
    pub fn grid_bounds(&self) -> Rect {
        let s = &self.settings;
        let rows = i64::from(s.max_slot) - i64::from(s.min_slot) + 1;
        Rect {
            left: 0,
            top: 0,
            width: saturate(
                i64::from(s.header_width) + Day::ALL.len() as i64 * i64::from(s.col_width),
            ),
            height: saturate(i64::from(s.header_height) + rows * i64::from(s.row_height)),
        }
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}

fn snap_axis(delta: i32, size: i32) -> i32 {
    if size <= 0 {
        return delta;
    }
    let delta = i64::from(delta);
    let size = i64::from(size);
    // floor(delta / size + 1/2) in integers
    saturate((2 * delta + size).div_euclid(2 * size) * size)
}

fn floor_steps(delta: i32, size: i32) -> i64 {
    if size <= 0 {
        return 0;
    }
    i64::from(delta).div_euclid(i64::from(size))
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
