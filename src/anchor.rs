use chrono::{Duration, Months, NaiveDate};

use crate::template::PlanEvents;
use crate::types::{AnchorEventType, AnchorType, IntervalUnit};

/// resolve the base date a milestone is anchored to
///
/// an event anchor whose event date has not been recorded falls back to
/// plan start silently, partial plans still generate an estimated schedule
pub fn resolve_anchor_date(
    start_date: NaiveDate,
    events: &PlanEvents,
    anchor_type: AnchorType,
    anchor_event_type: Option<AnchorEventType>,
) -> NaiveDate {
    match anchor_type {
        AnchorType::AbsoluteDate | AnchorType::RelativeToPlanStart => start_date,
        AnchorType::RelativeToEvent => anchor_event_type
            .and_then(|event| events.event_date(event))
            .unwrap_or(start_date),
    }
}

/// apply the day offset, then the month offset, to an anchor date
///
/// month addition clamps the day-of-month when the target month is
/// shorter (jan 31 + 1 month = feb 28/29); None only on calendar overflow
pub fn apply_anchor_offsets(
    date: NaiveDate,
    offset_days: Option<i64>,
    offset_months: Option<i32>,
) -> Option<NaiveDate> {
    let shifted = date.checked_add_signed(Duration::days(offset_days.unwrap_or(0)))?;
    add_months(shifted, offset_months.unwrap_or(0))
}

/// advance a recurring milestone's due date by one interval step
pub fn advance_due_date(date: NaiveDate, unit: IntervalUnit, step: i64) -> Option<NaiveDate> {
    match unit {
        IntervalUnit::Days => date.checked_add_signed(Duration::days(step)),
        IntervalUnit::Months => add_months(date, i32::try_from(step).ok()?),
    }
}

fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    }
}
