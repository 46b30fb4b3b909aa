use std::collections::BTreeMap;

use bon::Builder;

use crate::{
    assumptions::DriverProfile,
    core::{
        allocator::{ChargeAllocation, PowerLevel, merge_allocations},
        compute_daily_cost,
    },
    prelude::*,
    quantity::{Quantity, cost::Cost, power::Kilowatts, time::Hours},
    rates::table::RatePlans,
};

const HOURS_PER_DAY: Hours = Quantity(24.0);

/// One charger to simulate: its power level, speed, and the hours it needs
/// per day to cover the commute.
#[derive(Copy, Clone)]
pub struct ChargerSpec {
    pub level: PowerLevel,
    pub speed: Kilowatts,
    pub required_hours: Hours,
}

/// Outcome for one (profile, plan) pair.
pub struct PlanCosts {
    pub total_cost_level_1: Cost,
    pub total_cost_level_2: Cost,
    pub details: Vec<ChargeAllocation>,
}

/// Profile name → plan name → costs.
pub type SimulationOutcome = BTreeMap<String, BTreeMap<String, PlanCosts>>;

/// Runs the daily cost computation for every plan, profile, simulated day,
/// and power level, and merges the results.
#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Simulation<'a> {
    rate_plans: &'a RatePlans,
    profiles: &'a BTreeMap<String, DriverProfile>,
    season: &'a str,
    day_type: &'a str,
    n_days: u32,
    level_1: ChargerSpec,
    level_2: ChargerSpec,
}

impl<S: simulation_builder::IsComplete> SimulationBuilder<'_, S> {
    pub fn run(self) -> Result<SimulationOutcome> {
        self.build().run()
    }
}

impl Simulation<'_> {
    #[instrument(skip_all, fields(season = self.season, day_type = self.day_type))]
    fn run(self) -> Result<SimulationOutcome> {
        let mut outcome = SimulationOutcome::new();
        for (profile_name, profile) in self.profiles {
            let window = profile
                .window()
                .with_context(|| format!("invalid profile `{profile_name}`"))?;
            let plans = outcome.entry(profile_name.clone()).or_default();
            for plan_name in self.rate_plans.plan_names() {
                let mut total_cost_level_1 = Cost::ZERO;
                let mut total_cost_level_2 = Cost::ZERO;
                let mut details = Vec::new();

                for _ in 0..self.n_days {
                    for charger in [self.level_2, self.level_1] {
                        // A charger too slow to cover the commute within a
                        // day is left out of the comparison.
                        if charger.required_hours > HOURS_PER_DAY {
                            continue;
                        }
                        let daily = compute_daily_cost(
                            self.rate_plans,
                            plan_name,
                            self.season,
                            self.day_type,
                            window,
                            charger.required_hours,
                            charger.level,
                            charger.speed,
                        )?;
                        let daily_cost: Cost =
                            daily.iter().map(|allocation| allocation.cost).sum();
                        match charger.level {
                            PowerLevel::Level1 => total_cost_level_1 += daily_cost,
                            PowerLevel::Level2 => total_cost_level_2 += daily_cost,
                        }
                        details.extend(daily);
                    }
                }

                debug!(
                    plan_name,
                    %profile_name,
                    %total_cost_level_1,
                    %total_cost_level_2,
                    "simulated",
                );
                plans.insert(
                    plan_name.to_string(),
                    PlanCosts {
                        total_cost_level_1,
                        total_cost_level_2,
                        details: merge_allocations(details),
                    },
                );
            }
        }
        Ok(outcome)
    }
}
