use std::fmt::{Debug, Display, Formatter};

use chrono::{NaiveTime, TimeDelta, Timelike};

use crate::prelude::*;

/// 12-hour clock with an AM/PM marker, as found in rate tables and profiles.
pub const CLOCK_FORMAT: &str = "%I:%M %p";

const SECONDS_PER_DAY: u32 = 86_400;

/// Half-open wall-clock span `[start, stop)` with second resolution.
///
/// The span wraps midnight iff `start > stop`. A span with `start == stop`
/// is degenerate and rejected on construction: the domain never treats
/// midnight as both the start and the end of the same instant, so there is
/// no implicit "24 hours" reading.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct ClockSpan {
    start: NaiveTime,
    stop: NaiveTime,
}

/// The vehicle's plug-in interval for one day. Same wrapping rule.
pub type ChargingWindow = ClockSpan;

impl Debug for ClockSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.stop)
    }
}

impl Display for ClockSpan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.start.format(CLOCK_FORMAT), self.stop.format(CLOCK_FORMAT))
    }
}

impl ClockSpan {
    pub fn new(start: NaiveTime, stop: NaiveTime) -> Result<Self> {
        ensure!(
            start != stop,
            "degenerate span: start and stop are both {}",
            start.format(CLOCK_FORMAT),
        );
        Ok(Self { start, stop })
    }

    /// Parse from a pair of 12-hour clock strings, for example `"11:00 PM"`.
    pub fn parse(start: &str, stop: &str) -> Result<Self> {
        Self::new(parse_clock(start)?, parse_clock(stop)?)
    }

    pub const fn start(self) -> NaiveTime {
        self.start
    }

    pub const fn stop(self) -> NaiveTime {
        self.stop
    }

    #[must_use]
    pub fn is_wrapping(self) -> bool {
        self.start > self.stop
    }

    /// Decompose into at most two non-wrapping segments on one reference day.
    ///
    /// A wrapping span becomes `[start, 24:00)` and `[00:00, stop)`; the
    /// second segment is omitted when `stop` is exactly midnight, so a span
    /// ending at midnight counts towards the end of the calendar day and a
    /// wrapping counterpart cannot double-count it.
    pub(crate) fn segments(self) -> impl Iterator<Item = Segment> {
        let start = self.start.num_seconds_from_midnight();
        let stop = self.stop.num_seconds_from_midnight();
        let (first, second) = if self.is_wrapping() {
            let overnight = (stop > 0).then_some(Segment { start: 0, end: stop });
            (Segment { start, end: SECONDS_PER_DAY }, overnight)
        } else {
            (Segment { start, end: stop }, None)
        };
        std::iter::once(first).chain(second)
    }

    /// Total time the two spans share, wraparound on either side handled
    /// independently.
    #[must_use]
    pub fn overlap(self, other: Self) -> TimeDelta {
        let seconds = self
            .segments()
            .flat_map(|segment| other.segments().map(move |other| segment.intersection(other)))
            .sum::<u32>();
        TimeDelta::seconds(i64::from(seconds))
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        let seconds = self.segments().map(|segment| segment.end - segment.start).sum::<u32>();
        TimeDelta::seconds(i64::from(seconds))
    }
}

pub fn parse_clock(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT)
        .with_context(|| format!("failed to parse the time `{value}`"))
}

/// Non-wrapping `[start, end)` in seconds since midnight, `end <= 86_400`.
///
/// The end-of-day bound is an exclusive 24:00, not the source data's 23:59:59
/// stand-in, so day-boundary arithmetic is exact to the second.
#[derive(Copy, Clone)]
pub(crate) struct Segment {
    start: u32,
    end: u32,
}

impl Segment {
    /// Length of the intersection, in seconds.
    pub fn intersection(self, other: Self) -> u32 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.saturating_sub(start)
    }
}
