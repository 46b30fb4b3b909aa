pub mod allocator;
pub mod overlap;
pub mod window;

use crate::{
    core::{
        allocator::{ChargeAllocation, PowerLevel, allocate},
        overlap::resolve,
        window::ChargingWindow,
    },
    prelude::*,
    quantity::{power::Kilowatts, time::Hours},
    rates::table::RatePlans,
};

/// Resolve the window against the selected plan's periods and greedily
/// allocate the required hours to the cheapest tiers first.
///
/// One invocation covers one simulated day at one power level; the caller
/// concatenates and merges results across days and levels.
pub fn compute_daily_cost(
    rate_plans: &RatePlans,
    plan_name: &str,
    season: &str,
    day_type: &str,
    window: ChargingWindow,
    required_hours: Hours,
    level: PowerLevel,
    charging_speed: Kilowatts,
) -> Result<Vec<ChargeAllocation>> {
    let periods = rate_plans.periods(plan_name, season, day_type)?;
    let overlaps = resolve(window, &periods);
    allocate(&overlaps, required_hours, level, charging_speed)
}
