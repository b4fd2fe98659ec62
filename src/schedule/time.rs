use crate::{
    foundation::error::{TimetableError, TimetableResult},
    schedule::model::Timetable,
};

/// Minutes-of-day value of `24:00`.
pub const END_OF_DAY: u32 = 24 * 60;

/// Convert `HH:MM` into minutes-of-day.
pub fn to_minutes(text: &str) -> TimetableResult<u32> {
    let malformed = || TimetableError::malformed_time(format!("expected HH:MM, got \"{text}\""));

    let mut parts = text.split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let hours: u32 = hours.trim().parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| malformed())?;
    if minutes >= 60 {
        return Err(malformed());
    }

    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .filter(|total| *total <= END_OF_DAY)
        .ok_or_else(malformed)
}

/// Zero-padded `HH:MM` for a minutes-of-day value.
pub fn minutes_to_time(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Earliest start and latest end over a whole timetable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct TimeWindow {
    pub from: u32,
    pub to: u32,
}

impl TimeWindow {
    /// Window length in minutes; an empty or inverted window cannot be laid out.
    pub fn span(self) -> TimetableResult<u32> {
        if self.to <= self.from {
            return Err(TimetableError::invalid_layout(format!(
                "time window {}-{} is empty",
                minutes_to_time(self.from),
                minutes_to_time(self.to)
            )));
        }
        Ok(self.to - self.from)
    }
}

/// Scan every entry; an empty timetable yields the inverted window `24:00-00:00`.
pub fn compute_window(timetable: &Timetable) -> TimeWindow {
    let mut window = TimeWindow {
        from: END_OF_DAY,
        to: 0,
    };
    for entry in timetable.entries() {
        window.from = window.from.min(entry.from()).min(entry.to());
        window.to = window.to.max(entry.from()).max(entry.to());
    }
    window
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/time.rs"]
mod tests;
