// Schedule encoding
// Parses and writes the catalog's meeting-time text, e.g. `월1~2(101)<p>화3(202)`

mod parser;

use crate::models::schedule::TimeSlotRecord;

/// Separator between meeting blocks in catalog text
pub const SEGMENT_DELIMITER: &str = "<p>";

/// Parse schedule text into meeting blocks.
///
/// Blocks are `<day><start>[~<end>][(<room>)]` and may be joined by
/// [`SEGMENT_DELIMITER`] or written back to back. Anything that does not form
/// a block is skipped; empty or unrecognizable text yields an empty vector.
///
/// # Examples
/// ```
/// use timetable_planner::models::schedule::Day;
/// use timetable_planner::services::schedule_encoding::parse;
///
/// let records = parse("월1~2(101)");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].day, Day::Mon);
/// assert_eq!(records[0].range, vec![1, 2]);
/// assert_eq!(records[0].room, "101");
/// ```
pub fn parse(text: &str) -> Vec<TimeSlotRecord> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    parser::blocks(text)
}

/// Write meeting blocks back into catalog text.
///
/// Single-slot blocks omit the `~end` part and blocks without a room omit the
/// parentheses, so `parse(&serialize(&records)) == records` for any records
/// `parse` produced.
pub fn serialize(records: &[TimeSlotRecord]) -> String {
    records
        .iter()
        .filter_map(serialize_record)
        .collect::<Vec<_>>()
        .join(SEGMENT_DELIMITER)
}

fn serialize_record(record: &TimeSlotRecord) -> Option<String> {
    let start = record.range.first()?;
    let end = record.range.last()?;

    let mut out = format!("{}{}", record.day, start);
    if end != start {
        out.push_str(&format!("~{}", end));
    }
    if !record.room.is_empty() {
        out.push_str(&format!("({})", record.room));
    }
    Some(out)
}
