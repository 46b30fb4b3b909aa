#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod assumptions;
mod cli;
mod core;
mod prelude;
mod quantity;
mod rates;
mod simulate;
mod tables;

use clap::{Parser, crate_version};
use itertools::Itertools;

use crate::{
    assumptions::Assumptions,
    cli::{Args, Command, EstimateArgs},
    core::allocator::PowerLevel,
    prelude::*,
    rates::table::RatePlans,
    simulate::{ChargerSpec, Simulation},
    tables::{build_details_table, build_rates_table, build_totals_table, write_csv_path},
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Estimate(args) => estimate(&args),

        Command::Rates(args) => {
            let rate_plans = RatePlans::from_csv_path(&args.inputs.rates_file)?;
            println!("{}", build_rates_table(&rate_plans));
            Ok(())
        }
    }
}

fn estimate(args: &EstimateArgs) -> Result {
    let assumptions = Assumptions::from_json_path(&args.inputs.assumptions_file)?;
    let rate_plans = RatePlans::from_csv_path(&args.inputs.rates_file)?;
    info!(plans = %rate_plans.plan_names().join(", "), "loaded the rate table");

    for commute in assumptions.commutes() {
        let daily_energy = assumptions.daily_energy(&commute);
        let outcome = Simulation::builder()
            .rate_plans(&rate_plans)
            .profiles(&assumptions.driver_profiles)
            .season(&args.season)
            .day_type(&args.day_type)
            .n_days(args.days)
            .level_1(ChargerSpec {
                level: PowerLevel::Level1,
                speed: assumptions.charger_kw_level_1,
                required_hours: daily_energy / assumptions.charger_kw_level_1,
            })
            .level_2(ChargerSpec {
                level: PowerLevel::Level2,
                speed: assumptions.charger_kw_level_2,
                required_hours: daily_energy / assumptions.charger_kw_level_2,
            })
            .run()?;

        for (profile_name, plans) in &outcome {
            println!("\n[{}] {profile_name}", commute.name);
            println!("{}", build_totals_table(plans));
            println!("{}", build_details_table(plans));
        }

        let path = args
            .output_dir
            .join(format!("charging_costs_over_one_day_{}.csv", commute.name));
        write_csv_path(&path, &outcome)?;
        info!(path = %path.display(), "saved the results");
    }
    Ok(())
}
