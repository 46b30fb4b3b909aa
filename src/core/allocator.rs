use std::{
    cmp::Reverse,
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use crate::{
    core::overlap::Overlap,
    prelude::*,
    quantity::{cost::Cost, power::Kilowatts, time::Hours},
    rates::tier::Tier,
};

/// Charging hardware class. Determines the charge rate in kilowatts.
#[derive(Copy, Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum PowerLevel {
    Level1,
    Level2,
}

impl Display for PowerLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Level1 => write!(f, "Level 1"),
            Self::Level2 => write!(f, "Level 2"),
        }
    }
}

/// One line of the allocation result: how many hours were booked into one
/// rate period, and at what cost.
///
/// `hours` and `cost` are unrounded; the report layer rounds for display.
#[derive(Clone, Debug)]
#[must_use]
pub struct ChargeAllocation {
    pub period_label: String,
    pub tier: Tier,
    pub power_level: PowerLevel,
    pub hours: Hours,
    pub cost: Cost,
}

/// Walk the overlaps cheapest tier first, consuming the required hours.
///
/// Ties within a tier go to the longest overlap, which keeps the number of
/// distinct allocation entries down. The walk stops as soon as the
/// requirement is met: the list is priority-ordered, so nothing further
/// down can be cheaper. When the overlaps cannot cover the requirement,
/// the shortfall stays unallocated and the partial result is returned
/// as-is.
pub fn allocate(
    overlaps: &[Overlap<'_>],
    required_hours: Hours,
    power_level: PowerLevel,
    charging_speed: Kilowatts,
) -> Result<Vec<ChargeAllocation>> {
    ensure!(required_hours >= Hours::ZERO, "required hours must not be negative");
    ensure!(charging_speed.is_positive(), "charging speed must be positive");

    let mut sorted: Vec<&Overlap<'_>> = overlaps.iter().collect();
    sorted.sort_by_key(|overlap| (overlap.period.tier, Reverse(overlap.duration)));

    let mut remaining_hours = required_hours;
    let mut allocations = Vec::new();
    for overlap in sorted {
        if !remaining_hours.is_positive() {
            break;
        }
        let hours = Hours::from_delta(overlap.duration).min(remaining_hours);
        allocations.push(ChargeAllocation {
            period_label: overlap.period.label(),
            tier: overlap.period.tier,
            power_level,
            hours,
            cost: charging_speed * hours * overlap.period.rate,
        });
        remaining_hours -= hours;
    }
    Ok(merge_allocations(allocations))
}

/// Merge entries sharing `(period_label, tier, power_level)` by summing
/// hours and cost.
///
/// A wrapping period met by a wrapping window can produce one entry per
/// stretch of the day, and the multi-day simulation concatenates the
/// per-day results; both collapse here.
pub fn merge_allocations(allocations: Vec<ChargeAllocation>) -> Vec<ChargeAllocation> {
    let mut merged: BTreeMap<(String, Tier, PowerLevel), (Hours, Cost)> = BTreeMap::new();
    for allocation in allocations {
        let entry = merged
            .entry((allocation.period_label, allocation.tier, allocation.power_level))
            .or_insert((Hours::ZERO, Cost::ZERO));
        entry.0 += allocation.hours;
        entry.1 += allocation.cost;
    }
    merged
        .into_iter()
        .map(|((period_label, tier, power_level), (hours, cost))| ChargeAllocation {
            period_label,
            tier,
            power_level,
            hours,
            cost,
        })
        .collect()
}
