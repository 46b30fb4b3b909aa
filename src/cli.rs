use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: load the rate table and assumptions, simulate the
    /// charging costs, and report them per profile and plan.
    Estimate(EstimateArgs),

    /// Parse the rate table and dump it.
    Rates(RatesArgs),
}

#[derive(Parser)]
pub struct EstimateArgs {
    #[clap(flatten)]
    pub inputs: InputArgs,

    #[clap(long, env = "SEASON", default_value = "Summer")]
    pub season: String,

    #[clap(long = "day-type", env = "DAY_TYPE", default_value = "Weekdays")]
    pub day_type: String,

    /// Number of consecutive charging days to simulate.
    #[clap(long, env = "DAYS_OF_CHARGING", default_value = "1")]
    pub days: u32,

    /// Where to write the per-commute CSV exports.
    #[clap(long = "output-dir", env = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct RatesArgs {
    #[clap(flatten)]
    pub inputs: InputArgs,
}

#[derive(Parser)]
pub struct InputArgs {
    /// Rate table CSV.
    #[clap(long = "rates-file", env = "RATES_FILE", default_value = "rates.csv")]
    pub rates_file: PathBuf,

    /// Household assumptions JSON.
    #[clap(
        long = "assumptions-file",
        env = "ASSUMPTIONS_FILE",
        default_value = "assumptions.json"
    )]
    pub assumptions_file: PathBuf,
}
