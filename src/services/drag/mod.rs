// Drag placement
//
// Repositions a placed schedule by dragging it across the timetable grid.
// - While dragging only the visual offset changes (snapped to whole cells,
//   clamped to the grid).
// - On release the raw pointer delta is converted to whole day/slot steps and
//   the move is validated; out-of-range moves leave the table untouched.

use std::sync::Arc;

use thiserror::Error;

use crate::models::schedule::{PlacedSchedule, ScheduleTable, TimeSlotRecord};
use crate::models::settings::GridSettings;
use crate::services::grid::{GridGeometry, Point, Rect};

/// Why a drop did not move the entry
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    #[error("target day column {0} is outside the grid")]
    DayOutOfRange(i64),

    #[error("target slot {0} is outside the valid range")]
    SlotOutOfRange(i64),

    #[error("schedule has no time slots")]
    EmptyRange,

    #[error("no schedule at index {0}")]
    MissingEntry(usize),

    #[error("drag started in table {expected} but ended in {actual}")]
    CrossTable { expected: String, actual: String },
}

/// Result of releasing a drag gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// No gesture was active
    NoGesture,
    /// The pointer did not cross a whole cell
    Unchanged,
    /// The entry at `index` was replaced by its moved copy
    Moved {
        index: usize,
        from: TimeSlotRecord,
        to: TimeSlotRecord,
    },
    /// The move was invalid; the table was not touched
    Rejected(MoveRejection),
}

/// Context for an active drag gesture
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragContext {
    /// Position of the dragged entry within its table
    pub schedule_index: usize,
    /// Rectangle of the entry when the gesture started
    pub origin: Rect,
    /// Bounds the entry must stay within
    pub container: Rect,
    /// Latest raw pointer delta since the gesture started
    pub raw_delta: Point,
    /// Latest snapped and clamped offset to render
    pub visual_offset: Point,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragContext),
}

/// Drag gesture state for one timetable. At most one gesture is active.
#[derive(Debug, Clone)]
pub struct DragSession {
    table_id: String,
    geometry: GridGeometry,
    state: DragState,
}

impl DragSession {
    pub fn new(table_id: impl Into<String>, geometry: GridGeometry) -> Self {
        Self {
            table_id: table_id.into(),
            geometry,
            state: DragState::Idle,
        }
    }

    pub fn table_id(&self) -> &str {
        &self.table_id
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Start dragging the entry at `index`. Returns false when a gesture is
    /// already active, the table is not this session's, or the index is bad.
    pub fn begin(&mut self, table: &ScheduleTable, index: usize, container: Rect) -> bool {
        if self.is_dragging() {
            log::warn!("Drag already active in table {}, ignoring new gesture", self.table_id);
            return false;
        }
        if table.id != self.table_id {
            log::warn!(
                "Drag session for {} cannot start in table {}",
                self.table_id,
                table.id
            );
            return false;
        }

        let Some(origin) = table
            .schedules
            .get(index)
            .and_then(|schedule| self.geometry.pixel_position(schedule.day, &schedule.range))
        else {
            return false;
        };

        self.state = DragState::Dragging(DragContext {
            schedule_index: index,
            origin,
            container,
            raw_delta: Point::ZERO,
            visual_offset: Point::ZERO,
        });
        true
    }

    /// Record pointer movement and return the offset to render.
    /// Nothing in the table changes until [`DragSession::end`].
    pub fn update(&mut self, raw_delta: Point) -> Option<Point> {
        let DragState::Dragging(context) = &mut self.state else {
            return None;
        };

        context.raw_delta = raw_delta;
        context.visual_offset =
            self.geometry
                .snapped_transform(raw_delta, context.container, context.origin);
        Some(context.visual_offset)
    }

    /// Release the gesture and commit the move into `table`
    pub fn end(&mut self, raw_delta: Point, table: &mut ScheduleTable) -> DropOutcome {
        let DragState::Dragging(context) = std::mem::take(&mut self.state) else {
            return DropOutcome::NoGesture;
        };

        if table.id != self.table_id {
            let rejection = MoveRejection::CrossTable {
                expected: self.table_id.clone(),
                actual: table.id.clone(),
            };
            log::debug!("Rejected drop: {rejection}");
            return DropOutcome::Rejected(rejection);
        }

        let outcome = move_in_table(
            &mut table.schedules,
            context.schedule_index,
            raw_delta,
            &self.geometry,
        );
        if let DropOutcome::Rejected(rejection) = &outcome {
            log::debug!("Rejected drop in table {}: {rejection}", self.table_id);
        }
        outcome
    }

    /// Abandon the gesture without touching any table
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

/// Compute the moved copy of `schedule`, or why it cannot move.
pub fn apply_move(
    schedule: &PlacedSchedule,
    day_steps: i64,
    slot_steps: i64,
    settings: &GridSettings,
) -> Result<PlacedSchedule, MoveRejection> {
    let (first, last) = match (schedule.first_slot(), schedule.last_slot()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(MoveRejection::EmptyRange),
    };

    let target_column = schedule.day.index() as i64 + day_steps;
    let day = GridGeometry::new(*settings)
        .day_at(target_column)
        .ok_or(MoveRejection::DayOutOfRange(target_column))?;

    for slot in [i64::from(first) + slot_steps, i64::from(last) + slot_steps] {
        if !settings.is_valid_slot(slot) {
            return Err(MoveRejection::SlotOutOfRange(slot));
        }
    }

    // Both ends are within u32 bounds, so every slot in between is too.
    let range = schedule
        .range
        .iter()
        .map(|slot| (i64::from(*slot) + slot_steps) as u32)
        .collect();

    Ok(PlacedSchedule {
        lecture: Arc::clone(&schedule.lecture),
        day,
        range,
        room: schedule.room.clone(),
    })
}

/// Move the entry at `index` by the whole cells covered by `raw_delta`.
///
/// Steps are `floor(delta / cell size)` of the unsnapped delta. Only the moved
/// entry gets a new allocation; every other `Arc` in `schedules` is left as is.
pub fn move_in_table(
    schedules: &mut [Arc<PlacedSchedule>],
    index: usize,
    raw_delta: Point,
    geometry: &GridGeometry,
) -> DropOutcome {
    let Some(current) = schedules.get(index) else {
        return DropOutcome::Rejected(MoveRejection::MissingEntry(index));
    };

    let (day_steps, slot_steps) = geometry.cell_steps(raw_delta);
    if day_steps == 0 && slot_steps == 0 {
        return DropOutcome::Unchanged;
    }

    match apply_move(current, day_steps, slot_steps, geometry.settings()) {
        Ok(moved) => {
            let from = current.record();
            let to = moved.record();
            schedules[index] = Arc::new(moved);
            DropOutcome::Moved { index, from, to }
        }
        Err(rejection) => DropOutcome::Rejected(rejection),
    }
}
