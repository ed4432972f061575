// Time slot labels
// Slots 1-18 are 30-minute daytime periods from 09:00; slots 19-24 are
// 50-minute evening periods from 18:00, starting every 55 minutes.

use chrono::{Duration, NaiveTime};

const DAY_SLOTS: u32 = 18;
const EVENING_SLOTS: u32 = 6;
const DAY_PERIOD_MINUTES: i64 = 30;
const EVENING_PERIOD_MINUTES: i64 = 50;
const EVENING_PITCH_MINUTES: i64 = 55;

/// Start and end of a slot, or `None` outside 1..=24
pub fn slot_bounds(slot: u32) -> Option<(NaiveTime, NaiveTime)> {
    if slot == 0 || slot > DAY_SLOTS + EVENING_SLOTS {
        return None;
    }

    if slot <= DAY_SLOTS {
        let start = NaiveTime::from_hms_opt(9, 0, 0)?
            + Duration::minutes(i64::from(slot - 1) * DAY_PERIOD_MINUTES);
        return Some((start, start + Duration::minutes(DAY_PERIOD_MINUTES)));
    }

    let start = NaiveTime::from_hms_opt(18, 0, 0)?
        + Duration::minutes(i64::from(slot - DAY_SLOTS - 1) * EVENING_PITCH_MINUTES);
    Some((start, start + Duration::minutes(EVENING_PERIOD_MINUTES)))
}

/// Row header text for a slot, e.g. `09:00~09:30`
pub fn slot_label(slot: u32) -> Option<String> {
    let (start, end) = slot_bounds(slot)?;
    Some(format!("{}~{}", start.format("%H:%M"), end.format("%H:%M")))
}

/// Labels for `min_slot..=max_slot`, skipping slots without a known time
pub fn slot_labels(min_slot: u32, max_slot: u32) -> Vec<(u32, String)> {
    (min_slot..=max_slot)
        .filter_map(|slot| slot_label(slot).map(|label| (slot, label)))
        .collect()
}
