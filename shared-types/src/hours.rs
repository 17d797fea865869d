use serde::{Deserialize, Serialize};

use crate::place::OpeningHours;

pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const CLOSED: &str = "Closed";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DayHours {
    pub day: String,
    pub hours: String,
}

/// One entry per weekday, Sunday first, or nothing when hours or periods are
/// missing. An empty period list reads as closed all week.
///
/// A weekday uses the first period that opens on it. Times are printed as the
/// source reports them, without timezone conversion.
pub fn format_opening_hours(hours: Option<&OpeningHours>) -> Vec<DayHours> {
    let Some(periods) = hours.and_then(|h| h.periods.as_deref()) else {
        return Vec::new();
    };

    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(index, day)| {
            let period = periods.iter().find(|p| {
                p.open.as_ref().and_then(|o| o.day).map(usize::from) == Some(index)
            });
            let hours = match period {
                None => CLOSED.to_string(),
                Some(period) => format!(
                    "{} to {}",
                    period.open.as_ref().map(|o| o.time_of_day()).unwrap_or_default(),
                    period.close.as_ref().map(|c| c.time_of_day()).unwrap_or_default()
                ),
            };
            DayHours {
                day: day.to_string(),
                hours,
            }
        })
        .collect()
}
