use chrono::TimeDelta;

use crate::{core::window::ChargingWindow, rates::period::RatePeriod};

/// How long a rate period and the charging window coincide.
///
/// Ephemeral: produced by [`resolve`], consumed by the allocator, never
/// stored. The referenced period is left untouched.
#[derive(Copy, Clone)]
#[must_use]
pub struct Overlap<'a> {
    pub period: &'a RatePeriod,
    pub duration: TimeDelta,
}

/// Compute the overlap of the window with every candidate period, keeping
/// only strictly positive overlaps.
///
/// Each side is decomposed into at most two non-wrapping segments and every
/// segment pair is intersected on a shared reference day, so a period may
/// contribute two disjoint stretches (one before midnight, one after) to a
/// single total.
pub fn resolve<'a>(
    window: ChargingWindow,
    periods: &[&'a RatePeriod],
) -> Vec<Overlap<'a>> {
    periods
        .iter()
        .copied()
        .map(|period| Overlap { period, duration: period.span.overlap(window) })
        .filter(|overlap| overlap.duration > TimeDelta::zero())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        prelude::*,
        quantity::rate::KilowattHourRate,
        rates::{period::RatePeriod, tier::Tier},
    };

    fn period(tier: Tier, start: &str, stop: &str, rate: f64) -> Result<RatePeriod> {
        Ok(RatePeriod {
            tier,
            span: ChargingWindow::parse(start, stop)?,
            rate: KilowattHourRate::from(rate),
        })
    }

    #[test]
    fn test_resolve_drops_non_overlapping() -> Result {
        let peak = period(Tier::Peak, "04:00 PM", "09:00 PM", 0.45)?;
        let off_peak = period(Tier::OffPeak, "09:00 PM", "11:00 PM", 0.20)?;
        let window = ChargingWindow::parse("10:00 PM", "07:00 AM")?;

        let overlaps = resolve(window, &[&peak, &off_peak]);

        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].duration, TimeDelta::hours(1));
        assert_eq!(overlaps[0].period.tier, Tier::OffPeak);
        Ok(())
    }

    #[test]
    fn test_resolve_wrapping_period_two_stretches() -> Result {
        // Overlaps the window both before and after midnight.
        let off_peak = period(Tier::OffPeak, "09:00 PM", "06:00 AM", 0.20)?;
        let window = ChargingWindow::parse("11:00 PM", "05:00 AM")?;

        let overlaps = resolve(window, &[&off_peak]);

        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].duration, TimeDelta::hours(6));
        Ok(())
    }

    #[test]
    fn test_resolve_empty_candidates() -> Result {
        let window = ChargingWindow::parse("10:00 PM", "07:00 AM")?;
        assert!(resolve(window, &[]).is_empty());
        Ok(())
    }
}
