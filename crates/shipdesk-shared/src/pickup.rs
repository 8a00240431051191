//! Pickup scheduling rules.
//!
//! Pickups happen on Tuesdays and Thursdays at 10:00 local time. The
//! candidate list depends on "today", so callers recompute it each time it is
//! displayed instead of keeping it around.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Weekday};

use crate::constants::{MAX_PICKUP_CANDIDATES, PICKUP_HOUR, PICKUP_WINDOW_DAYS};

pub fn is_pickup_weekday(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Tue | Weekday::Thu)
}

/// The first pickup dates within the window starting at `today`, in
/// chronological order.
pub fn pickup_candidates(today: NaiveDate) -> Vec<NaiveDate> {
    today
        .iter_days()
        .take(PICKUP_WINDOW_DAYS)
        .filter(|d| is_pickup_weekday(d.weekday()))
        .take(MAX_PICKUP_CANDIDATES)
        .collect()
}

/// `date` at 10:00:00.000 in `tz`.
///
/// Ambiguous local times resolve to the earliest instant; a local time that
/// does not exist in `tz` yields `None`.
pub fn pickup_time<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let local = date.and_hms_opt(PICKUP_HOUR, 0, 0)?;
    tz.from_local_datetime(&local).earliest()
}
