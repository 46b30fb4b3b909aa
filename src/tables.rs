use std::{collections::BTreeMap, io, path::Path};

use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};
use ordered_float::OrderedFloat;

use crate::{
    prelude::*,
    rates::{table::RatePlans, tier::Tier},
    simulate::{PlanCosts, SimulationOutcome},
};

const fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::SuperOffPeak => Color::Green,
        Tier::OffPeak => Color::DarkYellow,
        Tier::Peak => Color::Red,
        Tier::Unknown => Color::Reset,
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

/// Per-plan daily totals for one profile, cheapest Level 2 plan highlighted.
pub fn build_totals_table(plans: &BTreeMap<String, PlanCosts>) -> Table {
    let cheapest = plans
        .values()
        .map(|costs| OrderedFloat(costs.total_cost_level_2.0))
        .min();

    let mut table = new_table();
    table.set_header(vec!["Plan", "Level 1 total", "Level 2 total"]);
    for (plan_name, costs) in plans {
        table.add_row(vec![
            Cell::new(plan_name),
            Cell::new(costs.total_cost_level_1).set_alignment(CellAlignment::Right),
            Cell::new(costs.total_cost_level_2).set_alignment(CellAlignment::Right).fg(
                if Some(OrderedFloat(costs.total_cost_level_2.0)) == cheapest {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
        ]);
    }
    table
}

/// Every allocation entry for one profile across all plans.
pub fn build_details_table(plans: &BTreeMap<String, PlanCosts>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Plan", "Period", "TOU", "Level", "Hours", "Cost"]);
    for (plan_name, costs) in plans {
        for detail in &costs.details {
            table.add_row(vec![
                Cell::new(plan_name),
                Cell::new(&detail.period_label),
                Cell::new(detail.tier).fg(tier_color(detail.tier)),
                Cell::new(detail.power_level),
                Cell::new(format!("{:.2}", detail.hours.0)).set_alignment(CellAlignment::Right),
                Cell::new(detail.cost).set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table
}

/// The parsed rate table, for the debug command.
pub fn build_rates_table(rate_plans: &RatePlans) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Plan", "Season", "Day type", "TOU", "Period", "Rate"]);
    for (plan, season, day_type, period) in rate_plans.rows() {
        table.add_row(vec![
            Cell::new(plan),
            Cell::new(season),
            Cell::new(day_type),
            Cell::new(period.tier).fg(tier_color(period.tier)),
            Cell::new(period.label()),
            Cell::new(period.rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn write_csv_path(path: &Path, outcome: &SimulationOutcome) -> Result {
    let writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    write_csv(writer, outcome)
}

/// Flat export of every allocation entry. Hours and costs are rounded to
/// two decimals here, and only here.
pub fn write_csv<W: io::Write>(mut writer: csv::Writer<W>, outcome: &SimulationOutcome) -> Result {
    writer
        .write_record(["Profile", "Plan", "Period", "Hours", "Cost", "TOU", "Level"])
        .context("failed to write the header")?;
    for (profile_name, plans) in outcome {
        for (plan_name, costs) in plans {
            for detail in &costs.details {
                let hours = format!("{:.2}", detail.hours.0);
                let cost = format!("{:.2}", detail.cost.0);
                let tier = detail.tier.to_string();
                let level = detail.power_level.to_string();
                writer
                    .write_record([
                        profile_name.as_str(),
                        plan_name.as_str(),
                        detail.period_label.as_str(),
                        hours.as_str(),
                        cost.as_str(),
                        tier.as_str(),
                        level.as_str(),
                    ])
                    .context("failed to write a record")?;
            }
        }
    }
    writer.flush().context("failed to flush the output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::allocator::{ChargeAllocation, PowerLevel},
        quantity::{cost::Cost, time::Hours},
    };

    fn outcome() -> SimulationOutcome {
        let costs = PlanCosts {
            total_cost_level_1: Cost::ZERO,
            total_cost_level_2: Cost::from(2.8),
            details: vec![ChargeAllocation {
                period_label: "12:00 AM - 06:00 AM".to_string(),
                tier: Tier::SuperOffPeak,
                power_level: PowerLevel::Level2,
                hours: Hours::from(5.0),
                cost: Cost::from(2.8),
            }],
        };
        BTreeMap::from([(
            "Night owl".to_string(),
            BTreeMap::from([("Acme EV-TOU".to_string(), costs)]),
        )])
    }

    #[test]
    fn test_write_csv() -> Result {
        let mut buffer = Vec::new();
        write_csv(csv::Writer::from_writer(&mut buffer), &outcome())?;
        let contents = String::from_utf8(buffer)?;
        assert!(contents.starts_with("Profile,Plan,Period,Hours,Cost,TOU,Level"));
        assert!(contents.contains(
            "Night owl,Acme EV-TOU,12:00 AM - 06:00 AM,5.00,2.80,Super Off-Peak,Level 2"
        ));
        Ok(())
    }
}
