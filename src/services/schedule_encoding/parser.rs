use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::SEGMENT_DELIMITER;
use crate::models::schedule::{Day, TimeSlotRecord};

/// Largest slot number accepted from schedule text
pub(super) const MAX_SLOT_VALUE: u32 = 255;

// Rooms may hold one level of nested parentheses, e.g. `(공학관(A)101)`.
static BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([월화수목금토])(\d+)(?:~(\d+))?(?:\(((?:[^()<]|\([^()<]*\))*)\))?")
        .expect("schedule block pattern is valid")
});

/// Blocks of every delimited segment, in order. A block never spans segments.
pub(super) fn blocks(text: &str) -> Vec<TimeSlotRecord> {
    text.split(SEGMENT_DELIMITER)
        .flat_map(|segment| BLOCK.captures_iter(segment))
        .filter_map(block_from_captures)
        .collect()
}

fn block_from_captures(caps: Captures<'_>) -> Option<TimeSlotRecord> {
    let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();

    let day = caps
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Day::from_glyph)?;

    let start = parse_slot(caps.get(2)?.as_str());
    let end = match caps.get(3) {
        Some(m) => parse_slot(m.as_str()),
        None => start,
    };

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            log::debug!("Skipping schedule block with out-of-range slot: {whole}");
            return None;
        }
    };

    let room = caps.get(4).map(|m| m.as_str()).unwrap_or_default();

    let record = TimeSlotRecord::span(day, start, end, room);
    if record.is_none() {
        log::debug!("Skipping schedule block with empty slot range: {whole}");
    }
    record
}

fn parse_slot(digits: &str) -> Option<u32> {
    digits
        .parse::<u32>()
        .ok()
        .filter(|slot| *slot <= MAX_SLOT_VALUE)
}
